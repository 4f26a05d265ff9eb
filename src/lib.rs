pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, CodecConfig, Config, FilterConfig};
pub use error::{Result, UserFriendlyError, WebpifyError};

// Core functionality re-exports
pub use converter::{
    Codec, ConversionOutcome, ConversionReport, ConversionStats, CwebpCodec, ImageConverter,
};
pub use scanner::{FileFilter, ImageScanner, ScanEvent, ScanSummary};
pub use ui::{OutputFormatter, OutputMode};

use chrono::Utc;
use std::path::Path;

/// Main library interface for Webpify functionality
pub struct Webpify {
    config: Config,
    output_formatter: OutputFormatter,
    force: bool,
}

impl Webpify {
    /// Create a new Webpify instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);

        Self {
            config,
            output_formatter,
            force: false,
        }
    }

    /// Create Webpify instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(
            Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
                .with_force(cli_args.force),
        )
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Convert every eligible image under `root`.
    ///
    /// Fatal setup problems (missing root, unusable codec) surface as errors;
    /// everything encountered during the walk is contained, logged and
    /// tallied. A completed run with per-file failures still returns Ok.
    pub fn convert_tree(&self, root: &Path) -> Result<ConversionReport> {
        // Validate the root before touching the codec: with nothing to scan
        // there is nothing to bootstrap.
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

        // One-time codec check, before the first conversion rather than at
        // the first failing file.
        let codec = CwebpCodec::new(&self.config.codec);
        codec.validate()?;

        self.convert_tree_with_codec(root, Box::new(codec))
    }

    /// Same pipeline with a caller-supplied codec.
    pub fn convert_tree_with_codec(
        &self,
        root: &Path,
        codec: Box<dyn Codec>,
    ) -> Result<ConversionReport> {
        let started_at = Utc::now();

        let image_converter = ImageConverter::new(
            codec,
            &self.config.codec,
            &self.config.filters.target_extension,
        )
        .with_force(self.force);

        let image_scanner = ImageScanner::new(&self.config.filters);

        self.output_formatter
            .start_operation(&format!("Scanning directory: {}", root.display()));

        let mut stats = ConversionStats::new();
        let scan_summary = image_scanner.scan(root, |event| match event {
            ScanEvent::Image {
                directory,
                filename,
            } => {
                let outcome = image_converter.convert(&directory, &filename);
                match &outcome {
                    ConversionOutcome::Converted {
                        source,
                        dest,
                        diagnostic,
                    } => {
                        self.output_formatter.file_converted(source, dest);
                        if !diagnostic.is_empty() {
                            self.output_formatter.debug(diagnostic);
                        }
                    }
                    ConversionOutcome::Skipped { dest, .. } => {
                        self.output_formatter.file_skipped(dest);
                    }
                    ConversionOutcome::Failed { source, message } => {
                        self.output_formatter.file_failed(source, message);
                    }
                }
                stats.record(&outcome);
            }
            ScanEvent::Unreadable { path, message } => {
                let error = WebpifyError::DirectoryRead { path, message };
                self.output_formatter.warning(&error.to_string());
                stats.record_scan_error(error.to_string());
            }
        })?;

        self.output_formatter.print_conversion_summary(&stats);

        Ok(ConversionReport::new(
            root.display().to_string(),
            started_at,
            &scan_summary,
            &stats,
            &self.config,
        ))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(WebpifyError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &WebpifyError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to convert a tree with minimal setup
pub fn convert_tree_simple(
    root: &Path,
    quality: Option<u8>,
    verbose: bool,
) -> Result<ConversionReport> {
    let mut config = Config::default();

    if let Some(quality) = quality {
        config.codec.quality = quality;
    }

    let webpify = Webpify::new(config, OutputMode::Human, if verbose { 1 } else { 0 }, false);

    webpify.convert_tree(root)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct CopyCodec;

    impl Codec for CopyCodec {
        fn name(&self) -> &str {
            "copy"
        }

        fn encode(&self, source: &Path, dest: &Path, _quality: u8) -> Result<String> {
            fs::copy(source, dest)?;
            Ok(String::new())
        }

        fn validate(&self) -> Result<()> {
            Ok(())
        }
    }

    fn quiet_webpify() -> Webpify {
        Webpify::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_webpify_creation() {
        let webpify = quiet_webpify();
        assert_eq!(webpify.config().filters.source_extensions.len(), 2);
        assert_eq!(webpify.config().codec.quality, 80);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let webpify = quiet_webpify();
        let result = webpify.convert_tree(Path::new("/no/such/tree"));
        assert!(matches!(result, Err(WebpifyError::InvalidRoot { .. })));
    }

    #[test]
    fn test_pipeline_converts_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/sub2")).unwrap();
        fs::write(root.join("a.png"), b"png").unwrap();
        fs::write(root.join("sub/b.jpg"), b"jpg").unwrap();
        fs::write(root.join("sub/sub2/c.png"), b"png").unwrap();
        fs::write(root.join("notes.txt"), b"txt").unwrap();

        let webpify = quiet_webpify();
        let report = webpify
            .convert_tree_with_codec(root, Box::new(CopyCodec))
            .unwrap();

        assert_eq!(report.summary.converted, 3);
        assert_eq!(report.summary.skipped, 0);
        assert_eq!(report.summary.failed, 0);
        assert!(root.join("a.webp").exists());
        assert!(root.join("sub/b.webp").exists());
        assert!(root.join("sub/sub2/c.webp").exists());
        assert!(!root.join("notes.webp").exists());
    }

    #[test]
    fn test_second_run_skips_everything() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.png"), b"png").unwrap();

        let webpify = quiet_webpify();
        webpify
            .convert_tree_with_codec(root, Box::new(CopyCodec))
            .unwrap();
        let before = fs::read(root.join("a.webp")).unwrap();

        let report = webpify
            .convert_tree_with_codec(root, Box::new(CopyCodec))
            .unwrap();

        assert_eq!(report.summary.converted, 0);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(fs::read(root.join("a.webp")).unwrap(), before);
    }

    #[test]
    fn test_empty_tree_completes_cleanly() {
        let temp_dir = TempDir::new().unwrap();

        let webpify = quiet_webpify();
        let report = webpify
            .convert_tree_with_codec(temp_dir.path(), Box::new(CopyCodec))
            .unwrap();

        assert_eq!(report.summary.images_found, 0);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        Webpify::generate_sample_config(&config_path).unwrap();
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[filters]"));
        assert!(content.contains("[codec]"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
