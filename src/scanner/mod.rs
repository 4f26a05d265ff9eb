pub mod file_filter;
pub mod image_scanner;

pub use file_filter::FileFilter;
pub use image_scanner::{ImageScanner, ScanEvent, ScanSummary};
