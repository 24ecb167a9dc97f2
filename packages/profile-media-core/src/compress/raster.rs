use crate::errors::TransformError;
use crate::transform::{
    apply_crop, decode_source, draw_scaled, encode_jpeg, CropRegion, Quality, ScaledDimensions,
};
use image::{DynamicImage, RgbImage};

/// ラスタ画像のデコード・描画・エンコードを提供するバックエンド
///
/// Compressor はこのトレイトだけに依存するため、ネイティブの画像ライブラリでも
/// プラットフォームのコーデックでも差し替えられる
pub trait RasterEncoder: Send + Sync {
    /// デコード済みのソース画像
    type Source: Send;
    /// 縮小後の描画先キャンバス
    type Canvas: Send;

    fn decode(&self, input: &[u8]) -> Result<Self::Source, TransformError>;

    fn dimensions(&self, source: &Self::Source) -> (u32, u32);

    fn crop(&self, source: Self::Source, region: CropRegion)
        -> Result<Self::Source, TransformError>;

    /// ソースを指定寸法のキャンバスへ描画する
    fn scale_draw(
        &self,
        source: &Self::Source,
        dims: ScaledDimensions,
    ) -> Result<Self::Canvas, TransformError>;

    /// キャンバスを指定品質でエンコードする（キャンバスは変更しない）
    fn encode_at(&self, canvas: &Self::Canvas, quality: Quality)
        -> Result<Vec<u8>, TransformError>;
}

/// `image` + `fast_image_resize` による標準実装
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterEncoder;

impl RasterEncoder for ImageRasterEncoder {
    type Source = DynamicImage;
    type Canvas = RgbImage;

    fn decode(&self, input: &[u8]) -> Result<DynamicImage, TransformError> {
        decode_source(input)
    }

    fn dimensions(&self, source: &DynamicImage) -> (u32, u32) {
        (source.width(), source.height())
    }

    fn crop(&self, source: DynamicImage, region: CropRegion) -> Result<DynamicImage, TransformError> {
        apply_crop(&source, region)
    }

    fn scale_draw(
        &self,
        source: &DynamicImage,
        dims: ScaledDimensions,
    ) -> Result<RgbImage, TransformError> {
        draw_scaled(source, dims)
    }

    fn encode_at(&self, canvas: &RgbImage, quality: Quality) -> Result<Vec<u8>, TransformError> {
        encode_jpeg(canvas, quality)
    }
}
