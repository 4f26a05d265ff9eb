pub mod cwebp;
pub mod image_converter;
pub mod report;

pub use cwebp::{Codec, CwebpCodec};
pub use image_converter::{ConversionOutcome, ConversionStats, ImageConverter};
pub use report::{ConfigSnapshot, ConversionReport, ConversionSummary};
