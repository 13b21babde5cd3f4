//! Image uploads to the object-storage bucket.

use crate::api::client::{build_http_client, check_status};
use crate::config::AppConfig;
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Bucket folder for product images
pub const PRODUCTS_FOLDER: &str = "products";
/// Bucket folder for property images
pub const PROPERTIES_FOLDER: &str = "properties";

/// A file picked on the client, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name).extension().and_then(|e| e.to_str())
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Unique object path inside `folder`, keeping the original extension
pub fn object_name(folder: &str, image: &LocalImage) -> String {
    match image.extension() {
        Some(ext) => format!("{}/{}.{}", folder, Uuid::new_v4(), ext),
        None => format!("{}/{}", folder, Uuid::new_v4()),
    }
}

/// Bucket-based file storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `image` at `path`, returning the stored path
    async fn upload(&self, path: &str, image: &LocalImage) -> Result<String>;

    /// Public URL for a stored path
    fn public_url(&self, path: &str) -> String;
}

/// Upload every image under `folder` and return their public URLs in input order.
///
/// Uploads are started in order and awaited together. If any fails the whole call
/// fails; the error lists the paths that did get stored.
pub async fn upload_all(
    storage: &dyn ObjectStorage,
    folder: &str,
    images: &[LocalImage],
) -> Result<Vec<String>> {
    let pending = images.iter().map(|image| {
        let path = object_name(folder, image);
        async move {
            let outcome = storage.upload(&path, image).await;
            (image, outcome)
        }
    });

    let results = join_all(pending).await;

    let mut stored = Vec::with_capacity(results.len());
    let mut failure: Option<(String, String)> = None;
    for (image, outcome) in results {
        match outcome {
            Ok(path) => stored.push(path),
            Err(err) => {
                warn!("Upload of {} failed: {}", image.file_name, err);
                if failure.is_none() {
                    failure = Some((image.file_name.clone(), err.to_string()));
                }
            }
        }
    }

    if let Some((file, reason)) = failure {
        if !stored.is_empty() {
            warn!("{} uploaded file(s) left in storage: {:?}", stored.len(), stored);
        }
        return Err(MarketError::Upload {
            file,
            reason,
            orphaned: stored,
        });
    }

    info!("Uploaded {} image(s) to {}/", stored.len(), folder);
    Ok(stored.iter().map(|path| storage.public_url(path)).collect())
}

/// Supabase-compatible storage REST API
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: Client,
    url: String,
    key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let url = config
            .storage
            .url
            .clone()
            .ok_or_else(|| MarketError::Config("storage URL is not set".to_string()))?;
        let key = config
            .storage
            .key
            .clone()
            .ok_or_else(|| MarketError::Config("storage key is not set".to_string()))?;

        Ok(Self {
            client: build_http_client(config)?,
            url: url.trim_end_matches('/').to_string(),
            key,
            bucket: config.storage.bucket.clone(),
        })
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(&self, path: &str, image: &LocalImage) -> Result<String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.url, self.bucket, path);
        debug!("Uploading {} ({} bytes) to {}", image.file_name, image.bytes.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, &image.content_type)
            .body(image.bytes.clone())
            .send()
            .await?;
        check_status(response).await?;

        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.url, self.bucket, path)
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;

    fn image(name: &str) -> LocalImage {
        LocalImage::new(name, vec![1, 2, 3])
    }

    #[test]
    fn object_names_keep_extension_and_are_unique() {
        let a = object_name(PRODUCTS_FOLDER, &image("desk.JPG"));
        let b = object_name(PRODUCTS_FOLDER, &image("desk.JPG"));
        assert!(a.starts_with("products/"));
        assert!(a.ends_with(".JPG"));
        assert_ne!(a, b);
        assert!(!object_name("x", &image("README")).contains('.'));
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(image("a.png").content_type, "image/png");
        assert_eq!(image("a.jpeg").content_type, "image/jpeg");
        assert_eq!(image("a.heic").content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn upload_all_returns_public_urls_in_order() {
        let storage = MemoryStorage::default();
        let urls = upload_all(&storage, PROPERTIES_FOLDER, &[image("a.png"), image("b.png")])
            .await
            .unwrap();

        let stored = storage.stored.lock().unwrap().clone();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], format!("https://cdn.test/public/{}", stored[0]));
        assert!(urls[1].starts_with("https://cdn.test/public/properties/"));
    }

    #[tokio::test]
    async fn failed_upload_reports_orphans() {
        let storage = MemoryStorage {
            fail: vec!["bad.png".to_string()],
            ..Default::default()
        };
        let err = upload_all(&storage, PRODUCTS_FOLDER, &[image("ok.png"), image("bad.png")])
            .await
            .unwrap_err();

        match err {
            MarketError::Upload { file, orphaned, .. } => {
                assert_eq!(file, "bad.png");
                assert_eq!(orphaned.len(), 1);
                assert!(orphaned[0].starts_with("products/"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn local_image_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lamp.webp");
        tokio::fs::write(&path, b"webp").await.unwrap();

        let image = LocalImage::from_path(&path).await.unwrap();
        assert_eq!(image.file_name, "lamp.webp");
        assert_eq!(image.content_type, "image/webp");
        assert_eq!(image.bytes, b"webp");
    }

    #[test]
    fn supabase_requires_credentials() {
        let config = AppConfig::default();
        assert!(matches!(SupabaseStorage::new(&config), Err(MarketError::Config(_))));
    }

    #[test]
    fn supabase_public_url_layout() {
        let mut config = AppConfig::default();
        config.storage.url = Some("https://abc.supabase.co/".to_string());
        config.storage.key = Some("anon".to_string());
        let storage = SupabaseStorage::new(&config).unwrap();
        assert_eq!(
            storage.public_url("products/x.png"),
            "https://abc.supabase.co/storage/v1/object/public/products/products/x.png"
        );
    }
}
