use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::errors::MediaError;

/// ユーザーごとの送信中フラグ
///
/// 送信中は同じユーザーの再送信を拒否する。フラグは成功・失敗に関わらず
/// ガードの破棄時に解除される
#[derive(Debug, Clone, Default)]
pub struct InFlightSubmissions {
    active: Arc<Mutex<HashSet<String>>>,
}

#[derive(Debug)]
pub struct SubmissionGuard {
    active: Arc<Mutex<HashSet<String>>>,
    uid: String,
}

impl InFlightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, uid: &str) -> Result<SubmissionGuard, MediaError> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(uid.to_string()) {
            return Err(MediaError::SubmitInFlight {
                uid: uid.to_string(),
            });
        }
        Ok(SubmissionGuard {
            active: Arc::clone(&self.active),
            uid: uid.to_string(),
        })
    }

    pub fn is_in_flight(&self, uid: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(uid)
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.uid);
    }
}
