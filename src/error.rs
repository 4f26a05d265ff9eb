use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebpifyError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Root directory not usable: {path}")]
    InvalidRoot { path: String },

    #[error("Failed to read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    #[error("Codec binary not found: {path}")]
    CodecNotFound { path: String },

    #[error("Codec failed for {path}: {message}")]
    CodecFailed { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for WebpifyError {
    fn user_message(&self) -> String {
        match self {
            WebpifyError::InvalidRoot { path } => {
                format!("Root directory not usable: {}", path)
            }
            WebpifyError::DirectoryRead { path, message } => {
                format!("Failed to read directory {}: {}", path.display(), message)
            }
            WebpifyError::CodecNotFound { path } => {
                format!("Codec binary not found: {}", path)
            }
            WebpifyError::CodecFailed { path, message } => {
                format!("Conversion failed for {}: {}", path.display(), message)
            }
            WebpifyError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            WebpifyError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            WebpifyError::InvalidRoot { .. } => Some(
                "Pass an existing, readable directory as the first argument (e.g. webpify ./assets).".to_string()
            ),
            WebpifyError::CodecNotFound { .. } => Some(
                "Install the WebP tools (the cwebp binary) or point --codec-path at an existing cwebp executable.".to_string()
            ),
            WebpifyError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            WebpifyError::Permission { .. } => Some(
                "Ensure you have read permission on the source tree and write permission next to the source images.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for WebpifyError {
    fn from(error: toml::de::Error) -> Self {
        WebpifyError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WebpifyError>;
