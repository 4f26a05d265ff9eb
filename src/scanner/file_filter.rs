use crate::config::FilterConfig;
use regex::Regex;
use std::path::Path;

pub struct FileFilter {
    /// Literal suffixes including the dot, e.g. ".png".
    source_suffixes: Vec<String>,
    case_insensitive: bool,
    exclude_dirs: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let source_suffixes = config
            .source_extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect();

        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self {
            source_suffixes,
            case_insensitive: config.case_insensitive,
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_patterns,
        }
    }

    /// Literal suffix check, not an extension parse: `notapng.png` matches
    /// because it ends in ".png". Case-sensitive unless configured otherwise,
    /// so by default `image.PNG` does not match.
    pub fn is_source_image(&self, filename: &str) -> bool {
        if self.case_insensitive {
            let folded = filename.to_lowercase();
            self.source_suffixes
                .iter()
                .any(|suffix| folded.ends_with(&suffix.to_lowercase()))
        } else {
            self.source_suffixes
                .iter()
                .any(|suffix| filename.ends_with(suffix.as_str()))
        }
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self
                .exclude_dirs
                .iter()
                .any(|exclude| exclude == dir_name)
            {
                return false;
            }

            let path_str = path.to_string_lossy();
            for pattern in &self.exclude_patterns {
                if pattern.is_match(&path_str) {
                    return false;
                }
            }
        }

        true
    }

    pub fn is_excluded_file(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(&path_str))
    }

    pub fn source_suffixes(&self) -> &[String] {
        &self.source_suffixes
    }

    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self::new(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> FilterConfig {
        FilterConfig {
            source_extensions: vec!["png".to_string(), "jpg".to_string()],
            target_extension: "webp".to_string(),
            exclude_dirs: vec![".git".to_string(), "node_modules".to_string()],
            exclude_patterns: vec![r".*\.thumb\..*".to_string()],
            case_insensitive: false,
            max_depth: 128,
        }
    }

    #[test]
    fn test_source_image_detection() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.is_source_image("photo.png"));
        assert!(filter.is_source_image("photo.jpg"));
        assert!(!filter.is_source_image("photo.gif"));
        assert!(!filter.is_source_image("notes.txt"));
        assert!(!filter.is_source_image("photo.webp"));
    }

    #[test]
    fn test_literal_suffix_not_extension_parse() {
        let filter = FileFilter::new(&create_test_config());

        // Anything ending in the suffix matches, extension parsing or not.
        assert!(filter.is_source_image("notapng.png"));
        assert!(filter.is_source_image("somejpg.jpg"));
        assert!(filter.is_source_image("v1.2.png"));
        assert!(filter.is_source_image(".png"));

        // ".jpeg" ends in neither ".png" nor ".jpg".
        assert!(!filter.is_source_image("photo.jpeg"));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let filter = FileFilter::new(&create_test_config());

        assert!(!filter.is_source_image("image.PNG"));
        assert!(!filter.is_source_image("image.Jpg"));
        assert!(!filter.is_source_image("IMAGE.JPG"));
    }

    #[test]
    fn test_case_insensitive_opt_in() {
        let mut config = create_test_config();
        config.case_insensitive = true;
        let filter = FileFilter::new(&config);

        assert!(filter.is_source_image("image.PNG"));
        assert!(filter.is_source_image("image.Jpg"));
        assert!(filter.is_source_image("image.png"));
    }

    #[test]
    fn test_extensions_normalized_with_dot() {
        let mut config = create_test_config();
        config.source_extensions = vec![".png".to_string()];
        let filter = FileFilter::new(&config);

        assert!(filter.is_source_image("photo.png"));
        assert_eq!(filter.source_suffixes(), &[".png".to_string()]);
    }

    #[test]
    fn test_directory_traversal_rules() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.should_traverse_directory(Path::new("assets")));
        assert!(filter.should_traverse_directory(Path::new("assets/icons")));

        assert!(!filter.should_traverse_directory(Path::new(".git")));
        assert!(!filter.should_traverse_directory(Path::new("node_modules")));
        assert!(!filter.should_traverse_directory(Path::new("site/node_modules")));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.is_excluded_file(Path::new("photo.thumb.png")));
        assert!(!filter.is_excluded_file(Path::new("photo.png")));
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let mut config = create_test_config();
        config.exclude_patterns = vec!["[unclosed".to_string()];
        let filter = FileFilter::new(&config);

        assert!(!filter.is_excluded_file(Path::new("photo.png")));
    }
}
