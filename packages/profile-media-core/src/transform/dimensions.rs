use serde::Serialize;

/// 長辺を上限に収めた出力寸法
///
/// アスペクト比を維持し、拡大はしない（withoutEnlargement）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaledDimensions {
    pub width: u32,
    pub height: u32,
}

impl ScaledDimensions {
    /// ソース寸法と長辺の上限から出力寸法を計算する
    pub fn fit(src_w: u32, src_h: u32, max_edge: u32) -> Self {
        let scale = calculate_scale_factor(src_w, src_h, max_edge);
        let (width, height) = apply_scale(src_w, src_h, scale);
        Self { width, height }
    }

    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn is_unchanged(&self, src_w: u32, src_h: u32) -> bool {
        self.width == src_w && self.height == src_h
    }
}

/// 縮小倍率を計算する（最大1.0）
///
/// 横長なら幅、それ以外（正方形を含む）は高さを上限に合わせる
fn calculate_scale_factor(src_w: u32, src_h: u32, max_edge: u32) -> f64 {
    let longer = if src_w > src_h { src_w } else { src_h };
    if longer == 0 {
        return 1.0;
    }
    (max_edge as f64 / longer as f64).min(1.0)
}

/// 倍率を適用して新しい寸法を計算する
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    if scale >= 1.0 {
        return (src_w, src_h);
    }
    // 切り捨てではなく四捨五入（3000x2000 → 1024x683）
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}
