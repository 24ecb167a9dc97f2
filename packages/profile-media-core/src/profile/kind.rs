use serde::{Deserialize, Serialize};

use crate::constants::{BANNER_MAX_BYTES, PROFILE_MAX_BYTES};

/// アップロードする画像の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Banner,
    Profile,
}

impl ImageKind {
    pub const ALL: [ImageKind; 2] = [ImageKind::Banner, ImageKind::Profile];

    /// 文字列から ImageKind を作成
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "banner" => Some(Self::Banner),
            "profile" | "pic" => Some(Self::Profile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Profile => "profile",
        }
    }

    /// 切り抜き時の幅/高さ
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            Self::Banner => 16.0 / 9.0,
            Self::Profile => 1.0,
        }
    }

    /// 圧縮後のバイト数上限
    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Banner => BANNER_MAX_BYTES,
            Self::Profile => PROFILE_MAX_BYTES,
        }
    }

    /// ユーザーごと・種類ごとに固定のストレージキー（上書き保存）
    pub fn storage_key(&self, uid: &str) -> String {
        match self {
            Self::Banner => format!("user-banners/banner-{uid}"),
            Self::Profile => format!("user-profile-pics/user-profile-pic-{uid}"),
        }
    }
}
