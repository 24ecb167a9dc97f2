use bytes::Bytes;
use serde::Serialize;

use crate::compress::raster::{ImageRasterEncoder, RasterEncoder};
use crate::constants::MAX_EDGE;
use crate::errors::TransformError;
use crate::transform::{CropRegion, Quality, ScaledDimensions, JPEG_CONTENT_TYPE};
use crate::validation::validate_max_bytes;

/// 1回のエンコード試行の記録
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionAttempt {
    pub quality: Quality,
    pub size: usize,
}

/// 圧縮結果（JPEG 固定）
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Bytes,
    pub dimensions: ScaledDimensions,
    pub quality: Quality,
    pub attempts: Vec<CompressionAttempt>,
}

impl CompressedImage {
    pub fn content_type(&self) -> &'static str {
        JPEG_CONTENT_TYPE
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn within_budget(&self, max_bytes: usize) -> bool {
        self.data.len() <= max_bytes
    }
}

/// バイト数の上限に収まるまで JPEG 品質を下げながら再エンコードする
///
/// 1. 長辺を `max_edge` に収める（拡大はしない）
/// 2. 呼び出しごとに専用のキャンバスへ一度だけ描画する
/// 3. 品質 0.80 から 0.05 ずつ下げてエンコードし、上限以下になるか
///    下限 0.10 に達したら終了する
///
/// 下限でも上限を超える場合はその結果を返す（ベストエフォート）
#[derive(Debug, Clone)]
pub struct Compressor<E = ImageRasterEncoder> {
    encoder: E,
    max_edge: u32,
}

impl Default for Compressor<ImageRasterEncoder> {
    fn default() -> Self {
        Self::new(ImageRasterEncoder)
    }
}

impl<E: RasterEncoder> Compressor<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            max_edge: MAX_EDGE,
        }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// デコード済みのソース画像を圧縮する
    pub fn compress(
        &self,
        source: &E::Source,
        max_bytes: usize,
    ) -> Result<CompressedImage, TransformError> {
        validate_max_bytes(max_bytes)?;

        let (src_w, src_h) = self.encoder.dimensions(source);
        let dims = ScaledDimensions::fit(src_w, src_h, self.max_edge);
        let canvas = self.encoder.scale_draw(source, dims)?;

        let mut attempts = Vec::new();
        let mut quality = Quality::INITIAL;
        loop {
            let data = self.encoder.encode_at(&canvas, quality)?;
            if data.is_empty() {
                return Err(TransformError::EncodeFailed {
                    quality: quality.percent(),
                });
            }
            attempts.push(CompressionAttempt {
                quality,
                size: data.len(),
            });

            let next = if data.len() > max_bytes {
                quality.next_lower()
            } else {
                None
            };

            match next {
                Some(lower) => {
                    tracing::debug!(
                        quality = %quality,
                        size = data.len(),
                        max_bytes,
                        "encoded image over budget, lowering quality"
                    );
                    quality = lower;
                }
                None => {
                    if data.len() > max_bytes {
                        tracing::warn!(
                            size = data.len(),
                            max_bytes,
                            "quality floor reached, returning over-budget image"
                        );
                    }
                    tracing::debug!(
                        width = dims.width,
                        height = dims.height,
                        quality = %quality,
                        size = data.len(),
                        attempts = attempts.len(),
                        "image compressed"
                    );
                    return Ok(CompressedImage {
                        data: Bytes::from(data),
                        dimensions: dims,
                        quality,
                        attempts,
                    });
                }
            }
        }
    }

    /// バイト列をデコードし、切り抜き範囲があれば適用してから圧縮する
    pub fn compress_bytes(
        &self,
        input: &[u8],
        crop: Option<CropRegion>,
        max_bytes: usize,
    ) -> Result<CompressedImage, TransformError> {
        let source = self.encoder.decode(input)?;
        let source = match crop {
            Some(region) => self.encoder.crop(source, region)?,
            None => source,
        };
        self.compress(&source, max_bytes)
    }
}
