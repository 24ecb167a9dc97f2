use std::sync::Arc;

use crate::compress::{CompressedImage, Compressor, ImageRasterEncoder, RasterEncoder};
use crate::errors::{MediaError, TransformError};
use crate::profile::form::{ImageSelection, ProfileForm};
use crate::profile::in_flight::InFlightSubmissions;
use crate::profile::kind::ImageKind;
use crate::profile::record::ProfileRecord;
use crate::storage::{ObjectStore, PicCache, ProfileStore};
use crate::transform::CropRegion;
use crate::validation::{validate_key, validate_uid};

/// プロフィール編集の送信処理
///
/// 1. 選択された画像をそれぞれ圧縮する（ブロッキングプールで並行）
/// 2. 圧縮結果を種類ごとの固定キーへ並行アップロードし URL を得る
/// 3. 保存済みレコードにマージして丸ごと書き戻す
/// 4. プロフィール画像 URL をローカルキャッシュへミラーする
///
/// 途中で失敗した場合レコードは書き込まない。片方のアップロードだけ
/// 成功していてもロールバックはしない
pub struct ProfileEditor<E: RasterEncoder = ImageRasterEncoder> {
    compressor: Arc<Compressor<E>>,
    objects: Arc<dyn ObjectStore>,
    profiles: Arc<dyn ProfileStore>,
    pic_cache: PicCache,
    in_flight: InFlightSubmissions,
}

impl ProfileEditor<ImageRasterEncoder> {
    pub fn new(objects: Arc<dyn ObjectStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self::with_compressor(Compressor::default(), objects, profiles)
    }
}

impl<E> ProfileEditor<E>
where
    E: RasterEncoder + 'static,
{
    pub fn with_compressor(
        compressor: Compressor<E>,
        objects: Arc<dyn ObjectStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            compressor: Arc::new(compressor),
            objects,
            profiles,
            pic_cache: PicCache::new(),
            in_flight: InFlightSubmissions::new(),
        }
    }

    pub fn pic_cache(&self) -> &PicCache {
        &self.pic_cache
    }

    /// フォームの初期値として保存済みのレコードを取得する
    pub async fn fetch_profile(&self, uid: &str) -> Result<ProfileRecord, MediaError> {
        validate_uid(uid)?;
        Ok(self.profiles.fetch(uid).await?.unwrap_or_default())
    }

    /// 画像を種類ごとのバイト数上限で圧縮する
    pub async fn compress(
        &self,
        kind: ImageKind,
        data: bytes::Bytes,
        crop: Option<CropRegion>,
    ) -> Result<CompressedImage, MediaError> {
        let compressor = Arc::clone(&self.compressor);
        let max_bytes = kind.max_bytes();

        let compressed = tokio::task::spawn_blocking(move || {
            compressor.compress_bytes(&data, crop, max_bytes)
        })
        .await
        .map_err(|e| TransformError::ProcessingFailed(format!("compression task failed: {e}")))??;

        tracing::info!(
            kind = kind.as_str(),
            width = compressed.dimensions.width,
            height = compressed.dimensions.height,
            quality = %compressed.quality,
            size = compressed.len(),
            attempts = compressed.attempts.len(),
            "image compressed"
        );
        Ok(compressed)
    }

    /// プロフィールを更新する
    pub async fn submit(&self, uid: &str, form: ProfileForm) -> Result<ProfileRecord, MediaError> {
        validate_uid(uid)?;
        let _guard = self.in_flight.try_begin(uid)?;

        let (changes, banner, profile) = form.into_parts();

        let (banner, profile) = tokio::try_join!(
            self.compress_selection(ImageKind::Banner, banner),
            self.compress_selection(ImageKind::Profile, profile),
        )?;

        let current = self.profiles.fetch(uid).await?.unwrap_or_default();

        let (banner_url, pic_url) = tokio::try_join!(
            self.upload(uid, ImageKind::Banner, banner, &current.banner),
            self.upload(uid, ImageKind::Profile, profile, &current.pic),
        )?;

        let record = current.merged(uid, &changes, banner_url, pic_url);
        self.profiles.replace(uid, &record).await?;
        self.pic_cache.set(uid, &record.pic);

        tracing::info!(uid = %uid, "profile updated");
        Ok(record)
    }

    async fn compress_selection(
        &self,
        kind: ImageKind,
        selection: Option<ImageSelection>,
    ) -> Result<Option<CompressedImage>, MediaError> {
        match selection {
            Some(selection) => {
                tracing::debug!(
                    kind = kind.as_str(),
                    content_type = %selection.content_type,
                    size = selection.data.len(),
                    cropped = selection.crop.is_some(),
                    "compressing selected image"
                );
                let compressed = self.compress(kind, selection.data, selection.crop).await?;
                Ok(Some(compressed))
            }
            None => Ok(None),
        }
    }

    /// 新しい画像があればアップロードして URL を返す。なければ保存済みの URL
    async fn upload(
        &self,
        uid: &str,
        kind: ImageKind,
        image: Option<CompressedImage>,
        previous_url: &str,
    ) -> Result<String, MediaError> {
        let Some(image) = image else {
            return Ok(previous_url.to_string());
        };

        let key = kind.storage_key(uid);
        validate_key(&key)?;

        let content_type = image.content_type();
        self.objects.put_object(&key, image.data, content_type).await?;
        Ok(self.objects.download_url(&key).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use image::{DynamicImage, ImageFormat};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryObjects {
        objects: Mutex<HashMap<String, (Bytes, String)>>,
        fail_keys: Vec<String>,
    }

    #[async_trait]
    impl ObjectStore for MemoryObjects {
        async fn put_object(
            &self,
            key: &str,
            data: Bytes,
            content_type: &str,
        ) -> Result<(), StorageError> {
            if self.fail_keys.iter().any(|k| k == key) {
                return Err(StorageError::Internal("upload refused".to_string()));
            }
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (data, content_type.to_string()));
            Ok(())
        }

        async fn download_url(&self, key: &str) -> Result<String, StorageError> {
            Ok(format!("https://cdn.test/{key}"))
        }
    }

    #[derive(Default)]
    struct MemoryProfiles {
        records: Mutex<HashMap<String, ProfileRecord>>,
        writes: Mutex<usize>,
    }

    #[async_trait]
    impl ProfileStore for MemoryProfiles {
        async fn fetch(&self, uid: &str) -> Result<Option<ProfileRecord>, StorageError> {
            Ok(self.records.lock().unwrap().get(uid).cloned())
        }

        async fn replace(&self, uid: &str, record: &ProfileRecord) -> Result<(), StorageError> {
            *self.writes.lock().unwrap() += 1;
            self.records
                .lock()
                .unwrap()
                .insert(uid.to_string(), record.clone());
            Ok(())
        }
    }

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn editor(
        objects: Arc<MemoryObjects>,
        profiles: Arc<MemoryProfiles>,
    ) -> ProfileEditor<ImageRasterEncoder> {
        ProfileEditor::new(objects, profiles)
    }

    fn existing_record() -> ProfileRecord {
        ProfileRecord {
            name: "Old".to_string(),
            headline: "Hello".to_string(),
            banner: "https://cdn.test/old-banner".to_string(),
            pic: "https://cdn.test/old-pic".to_string(),
            uid: "u1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_uploads_both_images() {
        let objects = Arc::new(MemoryObjects::default());
        let profiles = Arc::new(MemoryProfiles::default());
        let editor = editor(objects.clone(), profiles.clone());

        let mut form = ProfileForm::new();
        form.name = "New".to_string();
        form.email = Some("new@example.com".to_string());
        form.select_image(ImageKind::Banner, "image/png", png_bytes(1600, 1200), None)
            .unwrap();
        form.select_image(
            ImageKind::Profile,
            "image/png",
            png_bytes(300, 200),
            Some(CropRegion { x: 50, y: 0, width: 200, height: 200 }),
        )
        .unwrap();

        let record = editor.submit("u1", form).await.unwrap();

        assert_eq!(record.banner, "https://cdn.test/user-banners/banner-u1");
        assert_eq!(
            record.pic,
            "https://cdn.test/user-profile-pics/user-profile-pic-u1"
        );
        assert_eq!(record.name, "New");
        assert_eq!(record.email.as_deref(), Some("new@example.com"));
        assert_eq!(record.uid, "u1");

        let stored = objects.objects.lock().unwrap();
        let (banner, content_type) = &stored["user-banners/banner-u1"];
        assert_eq!(content_type, "image/jpeg");
        assert!(banner.len() <= ImageKind::Banner.max_bytes());
        let banner = image::load_from_memory(banner).unwrap();
        assert_eq!((banner.width(), banner.height()), (1024, 768));

        let (pic, _) = &stored["user-profile-pics/user-profile-pic-u1"];
        let pic = image::load_from_memory(pic).unwrap();
        assert_eq!((pic.width(), pic.height()), (200, 200));

        assert_eq!(
            editor.pic_cache().get("u1").as_deref(),
            Some("https://cdn.test/user-profile-pics/user-profile-pic-u1")
        );
    }

    #[tokio::test]
    async fn test_submit_without_images_keeps_urls() {
        let objects = Arc::new(MemoryObjects::default());
        let profiles = Arc::new(MemoryProfiles::default());
        profiles
            .records
            .lock()
            .unwrap()
            .insert("u1".to_string(), existing_record());
        let editor = editor(objects.clone(), profiles.clone());

        let mut form = ProfileForm::new();
        form.website = "https://new.example".to_string();

        let record = editor.submit("u1", form).await.unwrap();

        assert_eq!(record.banner, "https://cdn.test/old-banner");
        assert_eq!(record.pic, "https://cdn.test/old-pic");
        assert_eq!(record.name, "Old");
        assert_eq!(record.website, "https://new.example");
        assert!(objects.objects.lock().unwrap().is_empty());
        assert_eq!(
            editor.pic_cache().get("u1").as_deref(),
            Some("https://cdn.test/old-pic")
        );
    }

    #[tokio::test]
    async fn test_upload_failure_writes_nothing_and_releases_flag() {
        let objects = Arc::new(MemoryObjects {
            fail_keys: vec!["user-profile-pics/user-profile-pic-u1".to_string()],
            ..Default::default()
        });
        let profiles = Arc::new(MemoryProfiles::default());
        let editor = editor(objects.clone(), profiles.clone());

        let mut form = ProfileForm::new();
        form.select_image(ImageKind::Profile, "image/png", png_bytes(64, 64), None)
            .unwrap();

        let result = editor.submit("u1", form).await;
        assert!(matches!(result, Err(MediaError::Storage(_))));
        assert_eq!(*profiles.writes.lock().unwrap(), 0);
        assert!(editor.pic_cache().get("u1").is_none());

        // フラグは解除されている
        assert!(editor.submit("u1", ProfileForm::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_undecodable_image_aborts_before_upload() {
        let objects = Arc::new(MemoryObjects::default());
        let profiles = Arc::new(MemoryProfiles::default());
        let editor = editor(objects.clone(), profiles.clone());

        let mut form = ProfileForm::new();
        form.select_image(
            ImageKind::Banner,
            "image/png",
            Bytes::from_static(b"broken"),
            None,
        )
        .unwrap();
        form.select_image(ImageKind::Profile, "image/png", png_bytes(64, 64), None)
            .unwrap();

        let result = editor.submit("u1", form).await;
        assert!(matches!(
            result,
            Err(MediaError::Transform(TransformError::DecodeFailed(_)))
        ));
        assert!(objects.objects.lock().unwrap().is_empty());
        assert_eq!(*profiles.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_submit_rejected() {
        let editor = editor(
            Arc::new(MemoryObjects::default()),
            Arc::new(MemoryProfiles::default()),
        );

        let _guard = editor.in_flight.try_begin("u1").unwrap();
        let result = editor.submit("u1", ProfileForm::new()).await;
        assert!(matches!(result, Err(MediaError::SubmitInFlight { .. })));
    }

    #[tokio::test]
    async fn test_invalid_uid_rejected() {
        let editor = editor(
            Arc::new(MemoryObjects::default()),
            Arc::new(MemoryProfiles::default()),
        );
        let result = editor.submit("../u1", ProfileForm::new()).await;
        assert!(matches!(result, Err(MediaError::Validation(_))));
    }

    #[tokio::test]
    async fn test_fetch_missing_profile_is_default() {
        let editor = editor(
            Arc::new(MemoryObjects::default()),
            Arc::new(MemoryProfiles::default()),
        );
        let record = editor.fetch_profile("nobody").await.unwrap();
        assert_eq!(record, ProfileRecord::default());
    }
}
