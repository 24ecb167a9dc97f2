use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::StorageError;
use crate::profile::ProfileRecord;

/// 画像のアップロード先
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// キーにオブジェクトを保存する（既存のオブジェクトは上書き）
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// キーを取得可能な URL に解決する
    async fn download_url(&self, key: &str) -> Result<String, StorageError>;
}

/// ユーザー ID をキーとするプロフィールのドキュメントストア
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// 保存済みのレコード。存在しなければ None
    async fn fetch(&self, uid: &str) -> Result<Option<ProfileRecord>, StorageError>;

    /// レコード全体を置き換える
    async fn replace(&self, uid: &str, record: &ProfileRecord) -> Result<(), StorageError>;
}
