use crate::config::Config;
use crate::converter::image_converter::ConversionStats;
use crate::scanner::ScanSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// End-of-run record of what the scan did, serializable for the JSON output
/// mode. Nothing here is persisted by the tool itself; the converted files on
/// disk are the durable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub summary: ConversionSummary,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub directories_visited: usize,
    pub files_seen: usize,
    pub images_found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub source_extensions: Vec<String>,
    pub target_extension: String,
    pub quality: u8,
    pub case_insensitive: bool,
    pub exclude_dirs: Vec<String>,
}

impl ConfigSnapshot {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_extensions: config.filters.source_extensions.clone(),
            target_extension: config.filters.target_extension.clone(),
            quality: config.codec.quality,
            case_insensitive: config.filters.case_insensitive,
            exclude_dirs: config.filters.exclude_dirs.clone(),
        }
    }
}

impl ConversionReport {
    pub fn new(
        root: String,
        started_at: DateTime<Utc>,
        scan: &ScanSummary,
        stats: &ConversionStats,
        config: &Config,
    ) -> Self {
        Self {
            root,
            started_at,
            summary: ConversionSummary {
                directories_visited: scan.directories_visited,
                files_seen: scan.files_seen,
                images_found: scan.images_found,
                converted: stats.converted,
                skipped: stats.skipped,
                failed: stats.failed,
                duration_ms: stats.elapsed().as_millis(),
            },
            errors: stats.errors.clone(),
            config_used: ConfigSnapshot::from_config(config),
        }
    }

    /// A run is clean when every visited file either converted or was already
    /// done. Failures still leave the run "completed"; this only flags them.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
