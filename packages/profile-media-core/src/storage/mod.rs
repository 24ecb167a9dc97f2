pub mod cache;
pub mod document;
mod http;
pub mod object;
pub mod traits;

pub use cache::PicCache;
pub use document::HttpProfileStore;
pub use object::HttpObjectStore;
pub use traits::{ObjectStore, ProfileStore};
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;
