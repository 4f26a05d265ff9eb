use crate::converter::{ConversionReport, ConversionStats};
use crate::error::{UserFriendlyError, WebpifyError};
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    #[allow(dead_code)]
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", ROCKET, style(operation).bold());
                } else {
                    println!("> {}", operation);
                }
            }
            OutputMode::Json => self.print_json_message("operation_start", operation),
            OutputMode::Plain => println!("STARTING: {}", operation),
        }
    }

    // Per-file outcome lines. These are the contract-level log output: one
    // line per conversion, per skip, and per failure, shown unless quiet.
    pub fn file_converted(&self, source: &Path, dest: &Path) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!(
                        "{}{} -> {}",
                        CHECKMARK,
                        style(source.display()).green(),
                        style(dest.display()).green().bold()
                    );
                } else {
                    println!("✓ {} -> {}", source.display(), dest.display());
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "converted",
                "source": source.display().to_string(),
                "dest": dest.display().to_string(),
            })),
            OutputMode::Plain => {
                println!("CONVERTED: {} -> {}", source.display(), dest.display())
            }
        }
    }

    pub fn file_skipped(&self, dest: &Path) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!(
                        "- {}",
                        style(format!("already converted: {}", dest.display())).dim()
                    );
                } else {
                    println!("- already converted: {}", dest.display());
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "skipped",
                "dest": dest.display().to_string(),
            })),
            OutputMode::Plain => println!("SKIPPED: {}", dest.display()),
        }
    }

    pub fn file_failed(&self, source: &Path, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(
                MessageType::Error,
                &format!("{}: {}", source.display(), message),
            ),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "failed",
                "source": source.display().to_string(),
                "message": message,
            })),
            OutputMode::Plain => eprintln!("FAILED: {}: {}", source.display(), message),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &WebpifyError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    println!();
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    println!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_conversion_summary(&self, stats: &ConversionStats) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(stats),
            OutputMode::Json => self.print_json_summary(stats),
            OutputMode::Plain => self.print_plain_summary(stats),
        }
    }

    pub fn print_conversion_report(&self, report: &ConversionReport) {
        match self.mode {
            OutputMode::Human => {} // Summary already printed per run
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                println!("REPORT: scan of {}", report.root);
                println!("Images found: {}", report.summary.images_found);
                println!("Converted: {}", report.summary.converted);
                println!("Skipped: {}", report.summary.skipped);
                println!("Failed: {}", report.summary.failed);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, stats: &ConversionStats) {
        println!();
        self.print_separator();

        if self.use_colors {
            println!("{}{}", CHECKMARK, style("Scan completed").green().bold());
        } else {
            println!("✓ Scan completed");
        }

        println!();
        println!(
            "  Converted: {}",
            if self.use_colors {
                style(stats.converted).cyan().bold().to_string()
            } else {
                stats.converted.to_string()
            }
        );
        println!(
            "  Skipped:   {}",
            if self.use_colors {
                style(stats.skipped).cyan().bold().to_string()
            } else {
                stats.skipped.to_string()
            }
        );
        if stats.failed > 0 {
            println!(
                "  Failed:    {}",
                if self.use_colors {
                    style(stats.failed).red().bold().to_string()
                } else {
                    stats.failed.to_string()
                }
            );
        }
        println!(
            "  Time:      {}",
            if self.use_colors {
                style(format_duration(stats.elapsed())).cyan().to_string()
            } else {
                format_duration(stats.elapsed())
            }
        );

        self.print_separator();
    }

    fn print_json_summary(&self, stats: &ConversionStats) {
        let summary = serde_json::json!({
            "type": "summary",
            "converted": stats.converted,
            "skipped": stats.skipped,
            "failed": stats.failed,
            "duration_ms": stats.elapsed().as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        println!(
            "{}",
            serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_plain_summary(&self, stats: &ConversionStats) {
        println!("COMPLETED: scan");
        println!("Converted: {}", stats.converted);
        println!("Skipped: {}", stats.skipped);
        println!("Failed: {}", stats.failed);
        println!("Duration: {:?}", stats.elapsed());
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
