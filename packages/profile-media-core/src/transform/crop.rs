use crate::errors::TransformError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// ユーザーが確定した切り抜き範囲（ソース画像のピクセル座標）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// 画像の範囲内に収まっているか検証する
    pub fn validate(&self, src_w: u32, src_h: u32) -> Result<(), TransformError> {
        if self.width == 0 || self.height == 0 {
            return Err(TransformError::InvalidParams(
                "crop region must not be empty".to_string(),
            ));
        }

        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        if right > src_w as u64 || bottom > src_h as u64 {
            return Err(TransformError::InvalidParams(format!(
                "crop region {}x{}+{}+{} exceeds image {src_w}x{src_h}",
                self.width, self.height, self.x, self.y
            )));
        }
        Ok(())
    }
}

/// 切り抜きを適用する
pub fn apply_crop(img: &DynamicImage, region: CropRegion) -> Result<DynamicImage, TransformError> {
    region.validate(img.width(), img.height())?;
    Ok(img.crop_imm(region.x, region.y, region.width, region.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_crop() {
        let img = DynamicImage::new_rgb8(400, 300);
        let region = CropRegion { x: 50, y: 10, width: 160, height: 90 };
        let cropped = apply_crop(&img, region).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (160, 90));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let img = DynamicImage::new_rgb8(100, 100);
        let region = CropRegion { x: 60, y: 0, width: 50, height: 50 };
        assert!(matches!(
            apply_crop(&img, region),
            Err(TransformError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_crop_empty_region() {
        let region = CropRegion { x: 0, y: 0, width: 0, height: 10 };
        assert!(region.validate(100, 100).is_err());
    }
}
