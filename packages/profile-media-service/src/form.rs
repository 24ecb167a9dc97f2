use axum::extract::Multipart;
use bytes::Bytes;

use crate::handler::AppError;
use profile_media_core::{CropRegion, ImageKind, ProfileForm, TagInput};

/// multipart の画像フィールド（切り抜き範囲は別フィールドで後から届くことがある）
struct PendingImage {
    content_type: String,
    data: Bytes,
}

/// multipart リクエストを ProfileForm に変換する
///
/// テキスト: name, headline, tags, website, email
/// ファイル: banner, profile
/// 切り抜き: banner_crop, profile_crop（CropRegion の JSON）
pub async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileForm, AppError> {
    let mut form = ProfileForm::new();
    let mut banner: Option<PendingImage> = None;
    let mut profile: Option<PendingImage> = None;
    let mut banner_crop: Option<CropRegion> = None;
    let mut profile_crop: Option<CropRegion> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "banner" | "profile" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let no_file = field.file_name() == Some("");
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read {name}: {e}")))?;

                // ファイル未選択の input は空のパートとして届く
                if no_file || data.is_empty() {
                    tracing::debug!(field = %name, "no file selected");
                    continue;
                }
                let image = PendingImage { content_type, data };
                if name == "banner" {
                    banner = Some(image);
                } else {
                    profile = Some(image);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read {name}: {e}")))?;
                match name.as_str() {
                    "name" => form.name = value,
                    "headline" => form.headline = value,
                    "website" => form.website = value,
                    "tags" => form.tags = TagInput::parse(&value)?,
                    "email" => form.email = Some(value).filter(|v| !v.is_empty()),
                    "banner_crop" => banner_crop = parse_crop(&name, &value)?,
                    "profile_crop" => profile_crop = parse_crop(&name, &value)?,
                    _ => tracing::debug!(field = %name, "ignoring unknown form field"),
                }
            }
        }
    }

    for (kind, image, crop) in [
        (ImageKind::Banner, banner, banner_crop),
        (ImageKind::Profile, profile, profile_crop),
    ] {
        if let Some(image) = image {
            form.select_image(kind, &image.content_type, image.data, crop)?;
        }
    }

    Ok(form)
}

/// 空文字は切り抜きなし
fn parse_crop(field: &str, value: &str) -> Result<Option<CropRegion>, AppError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(value)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("invalid {field}: {e}")))
}
