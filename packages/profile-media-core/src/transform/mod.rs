pub mod crop;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod quality;
pub mod resize;

pub use crop::{apply_crop, CropRegion};
pub use decode::decode_source;
pub use dimensions::ScaledDimensions;
pub use encode::{encode_jpeg, JPEG_CONTENT_TYPE};
pub use quality::Quality;
pub use resize::draw_scaled;
