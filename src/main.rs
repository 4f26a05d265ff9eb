use clap::Parser;
use std::path::PathBuf;
use std::process;
use webpify::{
    Cli, OutputFormatter, OutputMode, UserFriendlyError, Webpify, WebpifyError,
};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let root = match cli.root_dir.as_ref() {
        Some(root) => root.clone(),
        None => {
            eprintln!("Error: missing root directory argument");
            eprintln!("Usage: webpify <root-directory> [OPTIONS]");
            return 2;
        }
    };

    // Create Webpify instance
    let webpify = match Webpify::from_cli(&cli) {
        Ok(webpify) => webpify,
        Err(e) => {
            print_startup_error(&e);
            return 4;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&root, &webpify);
    }

    // Execute main conversion workflow
    match webpify.convert_tree(&root) {
        Ok(report) => {
            // Display final report based on output format
            webpify.output_formatter().print_conversion_report(&report);

            // Per-file failures were contained and reported along the way;
            // a completed walk is a successful run.
            0
        }
        Err(e) => {
            webpify.handle_error(&e);

            // Map fatal error types to exit codes
            match e {
                WebpifyError::InvalidRoot { .. } => 2,
                WebpifyError::CodecNotFound { .. } => 3,
                WebpifyError::Config { .. } => 4,
                WebpifyError::Permission { .. } => 7,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "webpify.toml".to_string());

    match Webpify::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  webpify <root-directory> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(root: &PathBuf, webpify: &Webpify) -> i32 {
    let formatter = webpify.output_formatter();

    formatter.info("DRY RUN MODE - No files will be converted");
    formatter.print_separator();

    if !root.is_dir() {
        formatter.error(&format!(
            "Root directory does not exist or is not a directory: {}",
            root.display()
        ));
        return 2;
    }
    formatter.success(&format!("Root directory is valid: {}", root.display()));

    // Display configuration that would be used
    formatter.info("Configuration that would be used:");
    let config = webpify.config();

    println!(
        "  Source extensions: {}",
        config.filters.source_extensions.join(", ")
    );
    println!("  Target extension: {}", config.filters.target_extension);
    println!("  Quality: {}", config.codec.quality);
    println!("  Codec: {}", config.codec.cwebp_path);
    println!(
        "  Exclude directories: {}",
        config.filters.exclude_dirs.join(", ")
    );
    println!(
        "  Case-insensitive matching: {}",
        config.filters.case_insensitive
    );

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform actual conversion");

    0
}

fn print_startup_error(error: &WebpifyError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
