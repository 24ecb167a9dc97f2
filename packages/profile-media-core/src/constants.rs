/// 圧縮後の長辺の上限（px）
pub const MAX_EDGE: u32 = 1024;

/// デコードを許可するソース画像の最大ピクセル数（100MP）
pub const MAX_PIXELS: u64 = 100_000_000;

/// JPEG エンコードの初期品質（%）
pub const INITIAL_QUALITY: u8 = 80;

/// これ以上は品質を下げない下限（%）
pub const QUALITY_FLOOR: u8 = 10;

/// 1回の再試行で下げる品質（%）
pub const QUALITY_STEP: u8 = 5;

/// バナー画像のバイト数上限
pub const BANNER_MAX_BYTES: usize = 200_000;

/// プロフィール画像のバイト数上限
pub const PROFILE_MAX_BYTES: usize = 100_000;

/// タグの最大個数
pub const MAX_TAGS: usize = 5;

/// プロフィール画像 URL をミラーするローカルキャッシュのキー
pub const USER_PIC_CACHE_KEY: &str = "userPic";
