use crate::config::CodecConfig;
use crate::converter::cwebp::Codec;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Terminal state of one conversion attempt. There are no retries and no way
/// back: every file ends up exactly one of these.
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted {
        source: PathBuf,
        dest: PathBuf,
        diagnostic: String,
    },
    Skipped {
        source: PathBuf,
        dest: PathBuf,
    },
    Failed {
        source: PathBuf,
        message: String,
    },
}

/// Converts one identified source file to the target format, enforcing
/// idempotence via the destination-existence probe. Codec errors are absorbed
/// into a `Failed` outcome; nothing here can abort the caller's traversal.
pub struct ImageConverter {
    codec: Box<dyn Codec>,
    quality: u8,
    target_extension: String,
    force: bool,
}

impl ImageConverter {
    pub fn new(codec: Box<dyn Codec>, config: &CodecConfig, target_extension: &str) -> Self {
        Self {
            codec,
            quality: config.quality,
            target_extension: target_extension.trim_start_matches('.').to_string(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn codec_name(&self) -> &str {
        self.codec.name()
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Destination is always a sibling of the source: same directory, stem
    /// (text before the last dot) preserved exactly, extension replaced.
    /// Pure function of the input, which is what makes re-runs idempotent.
    pub fn destination_path(&self, directory: &Path, filename: &str) -> PathBuf {
        let stem = match filename.rfind('.') {
            Some(index) => &filename[..index],
            None => filename,
        };
        directory.join(format!("{}.{}", stem, self.target_extension))
    }

    pub fn convert(&self, directory: &Path, filename: &str) -> ConversionOutcome {
        let source = directory.join(filename);
        let dest = self.destination_path(directory, filename);

        // Existence probe, not atomic with the write; an outside writer
        // racing us between probe and encode is accepted.
        if !self.force && dest.exists() {
            return ConversionOutcome::Skipped { source, dest };
        }

        match self.codec.encode(&source, &dest, self.quality) {
            Ok(diagnostic) => ConversionOutcome::Converted {
                source,
                dest,
                diagnostic,
            },
            Err(e) => ConversionOutcome::Failed {
                source,
                message: e.to_string(),
            },
        }
    }
}

/// Running totals for one scan, accumulated outcome by outcome.
#[derive(Debug)]
pub struct ConversionStats {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    start_time: Instant,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self {
            converted: 0,
            skipped: 0,
            failed: 0,
            errors: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, outcome: &ConversionOutcome) {
        match outcome {
            ConversionOutcome::Converted { .. } => self.converted += 1,
            ConversionOutcome::Skipped { .. } => self.skipped += 1,
            ConversionOutcome::Failed { source, message } => {
                self.failed += 1;
                self.errors
                    .push(format!("{}: {}", source.display(), message));
            }
        }
    }

    pub fn record_scan_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn total_attempted(&self) -> usize {
        self.converted + self.skipped + self.failed
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ConversionStats {
    fn default() -> Self {
        Self::new()
    }
}
