use crate::errors::TransformError;

/// 圧縮のバイト数上限を検証する
pub fn validate_max_bytes(max_bytes: usize) -> Result<(), TransformError> {
    if max_bytes == 0 {
        return Err(TransformError::InvalidParams(
            "max_bytes must be positive".to_string(),
        ));
    }
    Ok(())
}
