use serde::{Deserialize, Serialize};

use crate::constants::MAX_TAGS;
use crate::errors::MediaError;

/// カンマ区切りのタグ入力
///
/// 入力欄と同じく `,` で分割した個数で数えるため、空の要素も1個になる
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagInput(String);

impl TagInput {
    pub fn parse(value: &str) -> Result<Self, MediaError> {
        let count = value.split(',').count();
        if count > MAX_TAGS {
            return Err(MediaError::Validation(format!(
                "at most {MAX_TAGS} tags are allowed, got {count}"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// 入力を更新する。上限を超える場合は現在の値を保持したままエラー
    pub fn update(&mut self, value: &str) -> Result<(), MediaError> {
        *self = Self::parse(value)?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 前後の空白を除いた空でないタグ
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}
