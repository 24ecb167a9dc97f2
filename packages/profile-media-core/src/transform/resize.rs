use crate::errors::TransformError;
use crate::transform::dimensions::ScaledDimensions;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage};

/// 画像を指定寸法の RGB キャンバスに描画する
///
/// JPEG 出力前提のためアルファは落とす。寸法が同じ場合は変換のみ行う
pub fn draw_scaled(
    img: &DynamicImage,
    dims: ScaledDimensions,
) -> Result<RgbImage, TransformError> {
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    if dims.is_unchanged(width, height) {
        return Ok(rgb_img);
    }

    let src_image = Image::from_vec_u8(width, height, rgb_img.into_raw(), PixelType::U8x3)
        .map_err(|e| {
            TransformError::ProcessingFailed(format!("failed to create source image: {e}"))
        })?;

    let mut dst_image = Image::new(dims.width, dims.height, PixelType::U8x3);

    // Lanczos3 で縮小
    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    RgbImage::from_raw(dims.width, dims.height, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}
