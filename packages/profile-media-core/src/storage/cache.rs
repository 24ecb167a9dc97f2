use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::constants::USER_PIC_CACHE_KEY;

/// プロフィール画像 URL のローカルミラー
///
/// 他の画面から素早く参照できるよう、書き込み成功後の URL を保持する
#[derive(Debug, Clone, Default)]
pub struct PicCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

fn cache_key(uid: &str) -> String {
    format!("{USER_PIC_CACHE_KEY}:{uid}")
}

impl PicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, uid: &str, url: &str) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(cache_key(uid), url.to_string());
    }

    pub fn get(&self, uid: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&cache_key(uid))
            .cloned()
    }
}
