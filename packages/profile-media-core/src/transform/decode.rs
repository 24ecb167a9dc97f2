use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// 画像バイト列をデコードし、EXIF の向きを反映したソース画像を返す
///
/// ブラウザが `<img>` を描画するときと同じく、撮影時の回転を適用した状態を
/// 以降の切り抜き・縮小の基準にする
pub fn decode_source(input: &[u8]) -> Result<DynamicImage, TransformError> {
    let (width, height) = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to guess format: {e}")))?
        .into_dimensions()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to read dimensions: {e}")))?;

    // デコード前にピクセル数を確認し、メモリ枯渇を防ぐ
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }

    let img = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to guess format: {e}")))?
        .decode()
        .map_err(|e| TransformError::DecodeFailed(e.to_string()))?;

    Ok(match read_orientation(input) {
        Some(tag) => apply_orientation(img, tag),
        None => img,
    })
}

/// EXIF Orientation タグ（1-8）を読み取る
fn read_orientation(data: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(data))
        .ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

fn apply_orientation(img: DynamicImage, tag: u32) -> DynamicImage {
    match tag {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
