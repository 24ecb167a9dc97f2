use async_trait::async_trait;
use reqwest::Client;

use crate::errors::StorageError;
use crate::profile::ProfileRecord;
use crate::storage::http::{check_status, with_token};
use crate::storage::traits::ProfileStore;

/// REST のドキュメントストアクライアント
///
/// `GET/PUT {base_url}/users/{uid}.json`。存在しないドキュメントは `null`
#[derive(Clone)]
pub struct HttpProfileStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpProfileStore {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// 環境変数から HttpProfileStore を作成する
    ///
    /// 必須の環境変数:
    /// - PROFILE_STORE_URL
    ///
    /// 任意:
    /// - PROFILE_STORE_TOKEN
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("PROFILE_STORE_URL")
            .map_err(|_| "PROFILE_STORE_URL is not set".to_string())?;
        let token = std::env::var("PROFILE_STORE_TOKEN").ok();

        Ok(Self::new(base_url, token))
    }

    fn document_url(&self, uid: &str) -> String {
        format!("{}/users/{}.json", self.base_url, uid)
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch(&self, uid: &str) -> Result<Option<ProfileRecord>, StorageError> {
        let response = with_token(self.client.get(self.document_url(uid)), self.token.as_deref())
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        match check_status(&response, uid) {
            Ok(()) => {}
            Err(StorageError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        }

        // 存在しないドキュメントは null が返る
        response
            .json::<Option<ProfileRecord>>()
            .await
            .map_err(|e| StorageError::Internal(format!("invalid profile document: {e}")))
    }

    async fn replace(&self, uid: &str, record: &ProfileRecord) -> Result<(), StorageError> {
        let response = with_token(
            self.client.put(self.document_url(uid)).json(record),
            self.token.as_deref(),
        )
        .send()
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?;
        check_status(&response, uid)?;

        tracing::info!(uid = %uid, "profile document replaced");
        Ok(())
    }
}
