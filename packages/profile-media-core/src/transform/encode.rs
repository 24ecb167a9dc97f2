use crate::errors::TransformError;
use crate::transform::quality::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::io::Cursor;

/// 出力の Content-Type（JPEG 固定）
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// キャンバスを指定品質で JPEG エンコードする
///
/// エンコーダがデータを返さなかった場合は EncodeFailed
pub fn encode_jpeg(canvas: &RgbImage, quality: Quality) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());

    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.percent());
    canvas.write_with_encoder(encoder).map_err(|e| {
        tracing::warn!(quality = %quality, error = %e, "JPEG encoder failed");
        TransformError::EncodeFailed {
            quality: quality.percent(),
        }
    })?;

    let data = buf.into_inner();
    if data.is_empty() {
        return Err(TransformError::EncodeFailed {
            quality: quality.percent(),
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg() {
        let canvas = RgbImage::new(10, 10);
        let data = encode_jpeg(&canvas, Quality::INITIAL).unwrap();

        assert!(!data.is_empty());
        // JPEG マジックナンバー確認
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_lower_quality_is_not_larger() {
        let canvas = RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        });
        let high = encode_jpeg(&canvas, Quality::INITIAL).unwrap();
        let low = encode_jpeg(&canvas, Quality::FLOOR).unwrap();
        assert!(low.len() <= high.len());
    }
}
