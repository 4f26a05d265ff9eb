use crate::config::FilterConfig;
use crate::error::{Result, WebpifyError};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One observation made during a scan, handed to the caller as it happens.
#[derive(Debug)]
pub enum ScanEvent {
    /// A file whose name matched a source suffix; convert it now.
    Image { directory: PathBuf, filename: String },
    /// A directory entry that could not be read. The subtree is abandoned,
    /// the rest of the scan continues.
    Unreadable { path: PathBuf, message: String },
}

#[derive(Debug, Default, Clone)]
pub struct ScanSummary {
    pub directories_visited: usize,
    pub files_seen: usize,
    pub images_found: usize,
    pub read_errors: usize,
}

/// Depth-first walker over the asset tree. Eligible images are dispatched to
/// the visitor inline, in listing order, so each conversion finishes before
/// the walk moves on. Entries that are neither regular files nor directories
/// (symlinks, sockets) are ignored.
pub struct ImageScanner {
    filter: FileFilter,
    max_depth: usize,
}

impl ImageScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Walks the tree rooted at `root`, calling `visit` for every matching
    /// image and every contained read failure. Only a missing or non-directory
    /// root is an error; everything below it is recovered locally.
    pub fn scan<F>(&self, root: &Path, mut visit: F) -> Result<ScanSummary>
    where
        F: FnMut(ScanEvent),
    {
        if !root.exists() {
            return Err(WebpifyError::InvalidRoot {
                path: root.display().to_string(),
            });
        }

        if !root.is_dir() {
            return Err(WebpifyError::InvalidRoot {
                path: format!("{} is not a directory", root.display()),
            });
        }

        let mut summary = ScanSummary::default();

        let walker = WalkDir::new(root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    summary.read_errors += 1;
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    visit(ScanEvent::Unreadable {
                        path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                summary.directories_visited += 1;
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            summary.files_seen += 1;

            let Some(filename) = entry.file_name().to_str() else {
                continue;
            };

            if self.filter.is_source_image(filename) && !self.filter.is_excluded_file(entry.path())
            {
                let directory = entry
                    .path()
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());

                summary.images_found += 1;
                visit(ScanEvent::Image {
                    directory,
                    filename: filename.to_string(),
                });
            }
        }

        Ok(summary)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }

        // The root itself is never filtered out.
        if entry.depth() == 0 {
            return true;
        }

        self.filter.should_traverse_directory(entry.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collect_images(scanner: &ImageScanner, root: &Path) -> (Vec<PathBuf>, ScanSummary) {
        let mut images = Vec::new();
        let summary = scanner
            .scan(root, |event| {
                if let ScanEvent::Image {
                    directory,
                    filename,
                } = event
                {
                    images.push(directory.join(filename));
                }
            })
            .unwrap();
        (images, summary)
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let scanner = ImageScanner::new(&FilterConfig::default());
        let result = scanner.scan(Path::new("/definitely/not/here"), |_| {});
        assert!(matches!(result, Err(WebpifyError::InvalidRoot { .. })));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.png");
        fs::write(&file, b"png").unwrap();

        let scanner = ImageScanner::new(&FilterConfig::default());
        let result = scanner.scan(&file, |_| {});
        assert!(matches!(result, Err(WebpifyError::InvalidRoot { .. })));
    }

    #[test]
    fn test_extension_filtering() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("b.jpg"), b"jpg").unwrap();
        fs::write(root.join("c.gif"), b"gif").unwrap();
        fs::write(root.join("d.txt"), b"txt").unwrap();

        let scanner = ImageScanner::new(&FilterConfig::default());
        let (mut images, summary) = collect_images(&scanner, root);
        images.sort();

        assert_eq!(images, vec![root.join("a.png"), root.join("b.jpg")]);
        assert_eq!(summary.images_found, 2);
        assert_eq!(summary.files_seen, 4);
        assert_eq!(summary.read_errors, 0);
    }

    #[test]
    fn test_recursion_visits_every_depth_once() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/sub2")).unwrap();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("sub/b.jpg"), b"jpg").unwrap();
        fs::write(root.join("sub/sub2/c.png"), b"png").unwrap();

        let scanner = ImageScanner::new(&FilterConfig::default());
        let (mut images, summary) = collect_images(&scanner, root);
        images.sort();

        assert_eq!(
            images,
            vec![
                root.join("a.png"),
                root.join("sub/b.jpg"),
                root.join("sub/sub2/c.png"),
            ]
        );
        assert_eq!(summary.images_found, 3);
    }

    #[test]
    fn test_excluded_directories_not_descended() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("node_modules/pkg/b.png"), b"png").unwrap();

        let scanner = ImageScanner::new(&FilterConfig::default());
        let (images, _) = collect_images(&scanner, root);

        assert_eq!(images, vec![root.join("a.png")]);
    }

    #[test]
    fn test_max_depth_limit() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("one/two")).unwrap();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("one/two/deep.png"), b"png").unwrap();

        let mut config = FilterConfig::default();
        config.max_depth = 1;
        let scanner = ImageScanner::new(&config);
        let (images, _) = collect_images(&scanner, root);

        assert_eq!(images, vec![root.join("a.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_contained() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::create_dir_all(root.join("sub2")).unwrap();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("sub/hidden.png"), b"png").unwrap();
        fs::write(root.join("sub2/c.png"), b"png").unwrap();

        fs::set_permissions(root.join("sub"), fs::Permissions::from_mode(0o000)).unwrap();

        let scanner = ImageScanner::new(&FilterConfig::default());
        let mut images = Vec::new();
        let mut errors = Vec::new();
        let summary = scanner
            .scan(root, |event| match event {
                ScanEvent::Image {
                    directory,
                    filename,
                } => images.push(directory.join(filename)),
                ScanEvent::Unreadable { path, .. } => errors.push(path),
            })
            .unwrap();

        // Restore so TempDir cleanup can remove the tree.
        fs::set_permissions(root.join("sub"), fs::Permissions::from_mode(0o755)).unwrap();

        images.sort();
        assert_eq!(images, vec![root.join("a.png"), root.join("sub2/c.png")]);
        assert_eq!(summary.read_errors, 1);
        assert_eq!(errors.len(), 1);
    }
}
