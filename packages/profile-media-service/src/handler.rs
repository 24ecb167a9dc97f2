use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::form::read_profile_form;
use crate::AppState;
use profile_media_core::{
    validate_uid, CropRegion, ImageKind, MediaError, ProfileRecord, StorageError, TransformError,
};

#[derive(Debug, Deserialize)]
pub struct CompressQuery {
    pub kind: String,
    pub x: Option<u32>,
    pub y: Option<u32>,
    #[serde(rename = "w")]
    pub width: Option<u32>,
    #[serde(rename = "h")]
    pub height: Option<u32>,
}

impl CompressQuery {
    /// 4つ全て指定されている場合のみ切り抜き範囲とする
    fn crop(&self) -> Option<CropRegion> {
        Some(CropRegion {
            x: self.x?,
            y: self.y?,
            width: self.width?,
            height: self.height?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ImageKindInfo {
    pub kind: ImageKind,
    pub aspect_ratio: f64,
    pub max_bytes: usize,
    pub storage_prefix: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// 切り抜きツールに渡すアスペクト比と圧縮上限
pub async fn image_kinds() -> Json<Vec<ImageKindInfo>> {
    Json(
        ImageKind::ALL
            .iter()
            .map(|kind| ImageKindInfo {
                kind: *kind,
                aspect_ratio: kind.aspect_ratio(),
                max_bytes: kind.max_bytes(),
                storage_prefix: match kind {
                    ImageKind::Banner => "user-banners",
                    ImageKind::Profile => "user-profile-pics",
                },
            })
            .collect(),
    )
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ProfileRecord>, AppError> {
    tracing::info!(uid = %uid, "fetching profile");
    let record = state.editor.fetch_profile(&uid).await?;
    Ok(Json(record))
}

pub async fn put_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    multipart: Multipart,
) -> Result<Json<ProfileRecord>, AppError> {
    validate_uid(&uid)?;
    let form = read_profile_form(multipart).await?;

    tracing::info!(
        uid = %uid,
        banner = form.selection(ImageKind::Banner).is_some(),
        profile = form.selection(ImageKind::Profile).is_some(),
        "updating profile"
    );
    let record = state.editor.submit(&uid, form).await?;
    Ok(Json(record))
}

/// ミラーしたプロフィール画像 URL
pub async fn get_pic(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_uid(&uid)?;
    let url = state
        .editor
        .pic_cache()
        .get(&uid)
        .ok_or_else(|| AppError::NotFound("no cached picture".to_string()))?;
    Ok(Json(serde_json::json!({ "userPic": url })))
}

/// 画像を種類ごとの上限で圧縮して返す
pub async fn compress(
    State(state): State<AppState>,
    Query(query): Query<CompressQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let kind = ImageKind::from_str(&query.kind)
        .ok_or_else(|| AppError::BadRequest(format!("unknown image kind: {}", query.kind)))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(
            "please select a valid image file (JPEG/PNG)".to_string(),
        ));
    }

    let compressed = state.editor.compress(kind, body, query.crop()).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, compressed.content_type().to_string()),
            (
                header::HeaderName::from_static("x-compression-quality"),
                compressed.quality.to_string(),
            ),
            (
                header::HeaderName::from_static("x-compression-attempts"),
                compressed.attempts.len().to_string(),
            ),
            (
                header::HeaderName::from_static("x-image-dimensions"),
                format!(
                    "{}x{}",
                    compressed.dimensions.width, compressed.dimensions.height
                ),
            ),
        ],
        compressed.data,
    )
        .into_response())
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    TransformFailed(String),
    StorageUnavailable(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error");
                AppError::BadRequest(msg)
            }
            MediaError::SubmitInFlight { uid } => {
                tracing::warn!(uid = %uid, "profile update already in flight");
                AppError::Conflict("a profile update is already in progress".to_string())
            }
            MediaError::Storage(storage_err) => storage_err.into(),
            MediaError::Transform(transform_err) => transform_err.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => {
                tracing::warn!(key = %key, "object not found");
                AppError::NotFound("object not found".to_string())
            }
            StorageError::Forbidden => {
                tracing::error!("access denied by storage backend (check store tokens)");
                AppError::StorageUnavailable("storage access denied".to_string())
            }
            StorageError::Internal(msg) => {
                tracing::error!(error = %msg, "storage error");
                AppError::StorageUnavailable("storage error".to_string())
            }
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidParams(msg) => {
                tracing::warn!(error = %msg, "invalid image parameters");
                AppError::BadRequest(msg)
            }
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(format!("image resolution {width}x{height} is too large"))
            }
            TransformError::DecodeFailed(msg) => {
                tracing::warn!(error = %msg, "image decode failed");
                AppError::TransformFailed("the selected file could not be read as an image".to_string())
            }
            TransformError::EncodeFailed { quality } => {
                tracing::error!(quality = %quality, "image encode failed");
                AppError::TransformFailed(
                    "an error occurred while compressing the image".to_string(),
                )
            }
            TransformError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "image processing failed");
                AppError::TransformFailed(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::TransformFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "storage unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "an error occurred while updating user details".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_of(MediaError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MediaError::SubmitInFlight { uid: "u1".to_string() }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(TransformError::EncodeFailed { quality: 10 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(TransformError::DecodeFailed("eof".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(StorageError::Internal("timeout".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(StorageError::Forbidden), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_compress_query_crop_requires_all_fields() {
        let query = CompressQuery {
            kind: "banner".to_string(),
            x: Some(0),
            y: Some(10),
            width: Some(160),
            height: Some(90),
        };
        assert_eq!(
            query.crop(),
            Some(CropRegion { x: 0, y: 10, width: 160, height: 90 })
        );

        let query = CompressQuery { height: None, ..query };
        assert_eq!(query.crop(), None);
    }

    #[tokio::test]
    async fn test_image_kinds() {
        let Json(kinds) = image_kinds().await;
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0].kind, ImageKind::Banner);
        assert_eq!(kinds[0].max_bytes, 200_000);
        assert_eq!(kinds[1].aspect_ratio, 1.0);
    }
}
