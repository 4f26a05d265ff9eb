use crate::config::CodecConfig;
use crate::error::{Result, WebpifyError};
use std::path::Path;
use std::process::{Command, Stdio};

/// An external image codec. The trait is the process boundary: everything on
/// the other side is an opaque collaborator that either produces the output
/// file or reports why it could not.
pub trait Codec: Send + Sync {
    /// Name of this codec implementation, for log lines.
    fn name(&self) -> &str;

    /// Encodes `source` into `dest` at the given quality (0-100). Returns
    /// whatever diagnostic text the codec emitted alongside a successful
    /// encode.
    fn encode(&self, source: &Path, dest: &Path, quality: u8) -> Result<String>;

    /// Checks that the codec is usable. Called once at startup, before any
    /// encode.
    fn validate(&self) -> Result<()>;
}

/// Codec backed by the `cwebp` command-line encoder from libwebp.
pub struct CwebpCodec {
    binary_path: String,
    extra_args: Vec<String>,
}

impl CwebpCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            binary_path: config.cwebp_path.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    fn build_args(&self, source: &Path, dest: &Path, quality: u8) -> Vec<String> {
        let mut args = vec!["-q".to_string(), quality.to_string()];
        args.extend(self.extra_args.iter().cloned());
        args.push(source.to_string_lossy().to_string());
        args.push("-o".to_string());
        args.push(dest.to_string_lossy().to_string());
        args
    }
}

impl Codec for CwebpCodec {
    fn name(&self) -> &str {
        "cwebp"
    }

    fn encode(&self, source: &Path, dest: &Path, quality: u8) -> Result<String> {
        let output = Command::new(&self.binary_path)
            .args(self.build_args(source, dest, quality))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => WebpifyError::CodecNotFound {
                    path: self.binary_path.clone(),
                },
                std::io::ErrorKind::PermissionDenied => WebpifyError::Permission {
                    path: self.binary_path.clone(),
                },
                _ => WebpifyError::Io(e),
            })?;

        // cwebp writes its encode statistics to stderr, success or not.
        let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(WebpifyError::CodecFailed {
                path: source.to_path_buf(),
                message: if diagnostic.is_empty() {
                    format!("cwebp exited with code {:?}", output.status.code())
                } else {
                    diagnostic
                },
            });
        }

        Ok(diagnostic)
    }

    fn validate(&self) -> Result<()> {
        let result = Command::new(&self.binary_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(WebpifyError::CodecNotFound {
                    path: self.binary_path.clone(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(WebpifyError::Permission {
                    path: self.binary_path.clone(),
                })
            }
            Err(e) => Err(WebpifyError::Io(e)),
        }
    }
}
