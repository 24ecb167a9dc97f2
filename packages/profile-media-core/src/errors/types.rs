use thiserror::Error;

/// プロフィール編集フローの統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("a profile update is already in flight for {uid}")]
    SubmitInFlight { uid: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// オブジェクトストレージ・ドキュメントストアのアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied")]
    Forbidden,

    #[error("storage error: {0}")]
    Internal(String),
}

/// 画像の切り抜き・縮小・圧縮エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("JPEG encode produced no data at quality {quality}%")]
    EncodeFailed { quality: u8 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
