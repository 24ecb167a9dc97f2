use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ドキュメントストアに保存するプロフィール
///
/// 知らないフィールドも `extra` に保持し、書き戻し時に失わない
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub pic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub uid: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// フォームから送信されたテキスト項目
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: String,
    pub headline: String,
    pub tags: String,
    pub website: String,
    pub email: Option<String>,
}

/// 空でなければ新しい値、空なら保存済みの値
fn prefer(new: &str, stored: String) -> String {
    if new.is_empty() { stored } else { new.to_string() }
}

impl ProfileRecord {
    /// 保存済みレコードに変更をマージした新しいレコードを作る
    pub fn merged(
        self,
        uid: &str,
        changes: &ProfileChanges,
        banner_url: String,
        pic_url: String,
    ) -> Self {
        let email = match changes.email.as_deref() {
            Some(email) if !email.is_empty() => Some(email.to_string()),
            _ => self.email,
        };

        Self {
            name: prefer(&changes.name, self.name),
            headline: prefer(&changes.headline, self.headline),
            tags: prefer(&changes.tags, self.tags),
            website: prefer(&changes.website, self.website),
            banner: banner_url,
            pic: pic_url,
            email,
            uid: uid.to_string(),
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> ProfileRecord {
        serde_json::from_value(json!({
            "name": "Old Name",
            "headline": "Engineer",
            "tags": "rust",
            "website": "https://old.example",
            "banner": "https://cdn/banner",
            "pic": "https://cdn/pic",
            "email": "old@example.com",
            "uid": "u1",
            "followers": 42
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_fields_fall_back_to_stored() {
        let changes = ProfileChanges {
            name: "New Name".to_string(),
            ..Default::default()
        };
        let record = stored().merged(
            "u1",
            &changes,
            "https://cdn/banner".to_string(),
            "https://cdn/pic2".to_string(),
        );

        assert_eq!(record.name, "New Name");
        assert_eq!(record.headline, "Engineer");
        assert_eq!(record.tags, "rust");
        assert_eq!(record.website, "https://old.example");
        assert_eq!(record.pic, "https://cdn/pic2");
        assert_eq!(record.email.as_deref(), Some("old@example.com"));
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let record = stored().merged("u1", &ProfileChanges::default(), String::new(), String::new());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["followers"], 42);
        assert_eq!(value["uid"], "u1");
    }

    #[test]
    fn test_missing_fields_default() {
        let record: ProfileRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, ProfileRecord::default());

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("email").is_none());
    }
}
