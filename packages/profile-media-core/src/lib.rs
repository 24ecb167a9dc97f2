pub mod compress;
pub mod constants;
pub mod errors;
pub mod profile;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use compress::{CompressedImage, CompressionAttempt, Compressor, ImageRasterEncoder, RasterEncoder};
pub use constants::{BANNER_MAX_BYTES, MAX_EDGE, MAX_TAGS, PROFILE_MAX_BYTES};
pub use errors::{MediaError, StorageError, TransformError};
pub use profile::{ImageKind, ProfileEditor, ProfileForm, ProfileRecord, TagInput};
pub use storage::{HttpObjectStore, HttpProfileStore, ObjectStore, PicCache, ProfileStore};
pub use transform::{CropRegion, Quality, ScaledDimensions};
pub use validation::{validate_key, validate_uid};
