/// multipart で受け付ける最大サイズの既定値（20MB）
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// サービス設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub log_json: bool,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 任意の環境変数:
    /// - BIND_ADDR（既定 0.0.0.0:8080）
    /// - MAX_UPLOAD_BYTES（既定 20MB）
    /// - LOG_FORMAT（`json` で JSON ログ）
    ///
    /// ストレージの接続先は各クライアントの from_env で読む
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| format!("MAX_UPLOAD_BYTES must be a positive integer, got {value}"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let log_json = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            max_upload_bytes,
            log_json,
        })
    }
}
