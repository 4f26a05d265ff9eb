use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "webpify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch-convert PNG/JPG directory trees to WebP")]
#[command(
    long_about = "Webpify walks a directory tree, finds PNG and JPG images and converts \
                       each one to a sibling WebP file, skipping images that already have one."
)]
#[command(after_help = "EXAMPLES:\n  \
    webpify ./assets\n  \
    webpify ./assets --quality 90 --verbose\n  \
    webpify ./site/static --source-exts png,jpg --exclude thumbs,cache\n  \
    webpify ./assets --config webpify.toml --output-format json\n\n\
    For more information, visit: https://github.com/user/webpify")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Root directory to scan for source images
    pub root_dir: Option<PathBuf>,

    /// Compression quality passed to the codec (0-100)
    #[arg(short = 'Q', long, value_parser = parse_quality)]
    pub quality: Option<u8>,

    /// Source extensions to convert (comma-separated)
    #[arg(short, long, help = "File extensions to convert (e.g. png,jpg)")]
    pub source_exts: Option<String>,

    /// Target extension for converted images
    #[arg(short, long, help = "Output extension (default: webp)")]
    pub target_ext: Option<String>,

    /// Directory names to skip during traversal
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Match source extensions case-insensitively
    #[arg(long, help = "Also match upper/mixed-case suffixes like .PNG")]
    pub ignore_case: bool,

    /// Re-encode even when the target file already exists
    #[arg(long, help = "Overwrite existing converted images")]
    pub force: bool,

    /// Path to the cwebp binary
    #[arg(long, help = "Codec executable to invoke (default: cwebp on PATH)")]
    pub codec_path: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show the conversion plan without invoking the codec")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source_exts(self.source_exts.clone())
            .with_target_ext(self.target_ext.clone())
            .with_exclude(self.exclude.clone())
            .with_case_insensitive(if self.ignore_case { Some(true) } else { None })
            .with_quality(self.quality)
            .with_codec_path(self.codec_path.clone())
    }

    pub fn should_use_colors(&self) -> bool {
        !self.quiet && console::Term::stdout().features().colors_supported()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_quality(s: &str) -> std::result::Result<u8, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid quality value: {}", s))?;

    if !(0..=100).contains(&value) {
        return Err(format!("Quality must be between 0 and 100, got {}", value));
    }

    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            root_dir: Some(PathBuf::from("./assets")),
            quality: None,
            source_exts: None,
            target_ext: None,
            exclude: None,
            ignore_case: false,
            force: false,
            codec_path: None,
            config: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality("0").unwrap(), 0);
        assert_eq!(parse_quality("80").unwrap(), 80);
        assert_eq!(parse_quality("100").unwrap(), 100);

        assert!(parse_quality("101").is_err());
        assert!(parse_quality("-1").is_err());
        assert!(parse_quality("high").is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let mut cli = base_cli();
        cli.quality = Some(65);
        cli.source_exts = Some("png".to_string());
        cli.ignore_case = true;

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.quality, Some(65));
        assert_eq!(overrides.source_exts, Some("png".to_string()));
        assert_eq!(overrides.case_insensitive, Some(true));
    }

    #[test]
    fn test_ignore_case_absent_means_no_override() {
        let cli = base_cli();
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.case_insensitive, None);
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let mut cli = base_cli();
        cli.quality = Some(42);
        cli.target_ext = Some("webp".to_string());

        let config = cli.load_config().unwrap();
        assert_eq!(config.codec.quality, 42);
        assert_eq!(config.filters.target_extension, "webp");
    }

    #[test]
    fn test_verbosity_levels() {
        let mut cli = base_cli();
        cli.verbose = 2;
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.is_verbose());

        cli.quiet = true;
        cli.verbose = 0;
        assert_eq!(cli.verbosity_level(), 0);
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_cli_parses_minimal_invocation() {
        let cli = Cli::try_parse_from(["webpify", "./assets"]).unwrap();
        assert_eq!(cli.root_dir, Some(PathBuf::from("./assets")));
        assert!(!cli.force);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_bad_quality() {
        let result = Cli::try_parse_from(["webpify", "./assets", "--quality", "200"]);
        assert!(result.is_err());
    }
}
