pub mod key;
pub mod params;

pub use key::{validate_key, validate_uid};
pub use params::validate_max_bytes;
