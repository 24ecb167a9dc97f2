use bytes::Bytes;

use crate::errors::MediaError;
use crate::profile::kind::ImageKind;
use crate::profile::record::ProfileChanges;
use crate::profile::tags::TagInput;
use crate::transform::CropRegion;

/// 選択された画像（切り抜きツールの出力）
#[derive(Debug, Clone)]
pub struct ImageSelection {
    pub data: Bytes,
    pub content_type: String,
    pub crop: Option<CropRegion>,
}

/// プロフィール編集フォームの送信内容
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub headline: String,
    pub tags: TagInput,
    pub website: String,
    pub email: Option<String>,
    banner: Option<ImageSelection>,
    profile: Option<ImageSelection>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像を選択する
    ///
    /// `image/` 以外のファイルは拒否し、既存の選択状態は変更しない
    pub fn select_image(
        &mut self,
        kind: ImageKind,
        content_type: &str,
        data: Bytes,
        crop: Option<CropRegion>,
    ) -> Result<(), MediaError> {
        if !content_type.starts_with("image/") {
            return Err(MediaError::Validation(format!(
                "please select a valid image file for {} (got {content_type})",
                kind.as_str()
            )));
        }
        if data.is_empty() {
            return Err(MediaError::Validation(format!(
                "{} image is empty",
                kind.as_str()
            )));
        }

        let selection = ImageSelection {
            data,
            content_type: content_type.to_string(),
            crop,
        };
        match kind {
            ImageKind::Banner => self.banner = Some(selection),
            ImageKind::Profile => self.profile = Some(selection),
        }
        Ok(())
    }

    pub fn selection(&self, kind: ImageKind) -> Option<&ImageSelection> {
        match kind {
            ImageKind::Banner => self.banner.as_ref(),
            ImageKind::Profile => self.profile.as_ref(),
        }
    }

    /// テキスト項目と画像選択に分解する
    pub(crate) fn into_parts(
        self,
    ) -> (ProfileChanges, Option<ImageSelection>, Option<ImageSelection>) {
        let changes = ProfileChanges {
            name: self.name,
            headline: self.headline,
            tags: self.tags.as_str().to_string(),
            website: self.website,
            email: self.email,
        };
        (changes, self.banner, self.profile)
    }
}
