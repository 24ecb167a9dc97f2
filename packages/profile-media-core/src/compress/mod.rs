pub mod compressor;
pub mod raster;

pub use compressor::{CompressedImage, CompressionAttempt, Compressor};
pub use raster::{ImageRasterEncoder, RasterEncoder};
