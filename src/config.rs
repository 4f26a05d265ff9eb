use crate::error::{Result, WebpifyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub filters: FilterConfig,
    pub codec: CodecConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Source suffixes matched literally against filenames (without the dot).
    pub source_extensions: Vec<String>,
    pub target_extension: String,
    pub exclude_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
    /// Fold case before suffix matching. Off by default: the literal match
    /// mirrors the historical behavior, so `image.PNG` is skipped.
    pub case_insensitive: bool,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Compression quality handed to the codec, 0-100.
    pub quality: u8,
    pub cwebp_path: String,
    pub extra_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filters: FilterConfig::default(),
            codec: CodecConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            source_extensions: vec!["png".to_string(), "jpg".to_string()],
            target_extension: "webp".to_string(),
            exclude_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                ".cache".to_string(),
            ],
            exclude_patterns: vec![],
            case_insensitive: false,
            max_depth: 128,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            quality: 80,
            cwebp_path: "cwebp".to_string(),
            extra_args: vec![],
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WebpifyError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| WebpifyError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| WebpifyError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["webpify.toml", "webpify.config.toml", ".webpify.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref source_exts) = cli_args.source_exts {
            self.filters.source_extensions = source_exts
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref target_ext) = cli_args.target_ext {
            self.filters.target_extension = target_ext.trim_start_matches('.').to_string();
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.filters.exclude_dirs.extend(exclude.clone());
        }

        if let Some(case_insensitive) = cli_args.case_insensitive {
            self.filters.case_insensitive = case_insensitive;
        }

        if let Some(quality) = cli_args.quality {
            self.codec.quality = quality;
        }

        if let Some(ref codec_path) = cli_args.codec_path {
            self.codec.cwebp_path = codec_path.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| WebpifyError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| WebpifyError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.source_extensions.is_empty() {
            return Err(WebpifyError::Config {
                message: "At least one source extension must be specified".to_string(),
            });
        }

        if self.filters.target_extension.is_empty() {
            return Err(WebpifyError::Config {
                message: "Target extension must not be empty".to_string(),
            });
        }

        if self
            .filters
            .source_extensions
            .iter()
            .any(|ext| ext == &self.filters.target_extension)
        {
            return Err(WebpifyError::Config {
                message: format!(
                    "Target extension '{}' is also listed as a source extension",
                    self.filters.target_extension
                ),
            });
        }

        if self.codec.quality > 100 {
            return Err(WebpifyError::Config {
                message: format!("Quality must be 0-100, got {}", self.codec.quality),
            });
        }

        if self.codec.cwebp_path.is_empty() {
            return Err(WebpifyError::Config {
                message: "Codec path must not be empty".to_string(),
            });
        }

        if self.filters.max_depth == 0 {
            return Err(WebpifyError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source_exts: Option<String>,
    pub target_ext: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub case_insensitive: Option<bool>,
    pub quality: Option<u8>,
    pub codec_path: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_exts(mut self, source_exts: Option<String>) -> Self {
        self.source_exts = source_exts;
        self
    }

    pub fn with_target_ext(mut self, target_ext: Option<String>) -> Self {
        self.target_ext = target_ext;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: Option<bool>) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_quality(mut self, quality: Option<u8>) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_codec_path(mut self, codec_path: Option<String>) -> Self {
        self.codec_path = codec_path;
        self
    }
}
