use reqwest::{RequestBuilder, Response, StatusCode};

use crate::errors::StorageError;

/// Bearer トークンがあれば付与する
pub(crate) fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// レスポンスのステータスを StorageError に変換する
pub(crate) fn check_status(response: &Response, key: &str) -> Result<(), StorageError> {
    match response.status() {
        status if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(StorageError::NotFound {
            key: key.to_string(),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            tracing::error!(key = %key, "access denied by storage backend");
            Err(StorageError::Forbidden)
        }
        status => {
            tracing::error!(key = %key, status = %status, "unexpected response from storage backend");
            Err(StorageError::Internal(format!("unexpected status: {status}")))
        }
    }
}
