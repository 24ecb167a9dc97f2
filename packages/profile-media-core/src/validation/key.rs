use crate::errors::MediaError;

/// ユーザー ID の最大長
const MAX_UID_LEN: usize = 128;

/// ユーザー ID を検証する
///
/// ストレージキーとドキュメントパスに埋め込むため、英数字・ハイフン・
/// アンダースコアのみ許可する
pub fn validate_uid(uid: &str) -> Result<(), MediaError> {
    if uid.is_empty() {
        return Err(MediaError::Validation("uid is empty".to_string()));
    }

    if uid.len() > MAX_UID_LEN {
        return Err(MediaError::Validation(format!(
            "uid is too long (max {MAX_UID_LEN})"
        )));
    }

    if !uid
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MediaError::Validation("invalid characters in uid".to_string()));
    }

    Ok(())
}

/// オブジェクトキーを検証する
/// パストラバーサルを防止し、不正な文字を検出する
pub fn validate_key(key: &str) -> Result<(), MediaError> {
    if key.is_empty() {
        return Err(MediaError::Validation("key is empty".to_string()));
    }

    if key.len() > 1024 {
        return Err(MediaError::Validation("key is too long (max 1024)".to_string()));
    }

    let decoded = urlencoding::decode(key)
        .map_err(|_| MediaError::Validation("invalid URL encoding".to_string()))?;

    if decoded.contains("..")
        || decoded.starts_with('/')
        || decoded.contains("//")
        || decoded.contains('\\')
    {
        return Err(MediaError::Validation("path traversal detected".to_string()));
    }

    if !decoded
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err(MediaError::Validation("invalid characters in key".to_string()));
    }

    Ok(())
}
