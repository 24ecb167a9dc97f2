use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::errors::StorageError;
use crate::storage::http::{check_status, with_token};
use crate::storage::traits::ObjectStore;

/// HTTP のオブジェクトストレージクライアント
///
/// `PUT {base_url}/{key}` で保存し、`{public_url}/{key}` を公開 URL とする
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    public_url: String,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: String, public_url: Option<String>, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let public_url = public_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());

        Self {
            client: Client::new(),
            base_url,
            public_url,
            token,
        }
    }

    /// 環境変数から HttpObjectStore を作成する
    ///
    /// 必須の環境変数:
    /// - OBJECT_STORE_URL
    ///
    /// 任意:
    /// - OBJECT_STORE_PUBLIC_URL（未設定なら OBJECT_STORE_URL）
    /// - OBJECT_STORE_TOKEN
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("OBJECT_STORE_URL")
            .map_err(|_| "OBJECT_STORE_URL is not set".to_string())?;
        let public_url = std::env::var("OBJECT_STORE_PUBLIC_URL").ok();
        let token = std::env::var("OBJECT_STORE_TOKEN").ok();

        Ok(Self::new(base_url, public_url, token))
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size = data.len();
        let request = self
            .client
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .body(data);

        let response = with_token(request, self.token.as_deref())
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        check_status(&response, key)?;

        tracing::info!(key = %key, size, "object uploaded");
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<String, StorageError> {
        Ok(format!("{}/{}", self.public_url, key))
    }
}
