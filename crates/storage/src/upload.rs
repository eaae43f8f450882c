//! Upload validation, key naming and public URLs.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::StorageConfig;
use crate::error::UploadError;
use crate::store::ObjectStore;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]+").expect("static pattern compiles"));

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Each run of characters outside `[A-Za-z0-9_.-]` becomes one `_`.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

pub struct UploadService<S> {
    config: StorageConfig,
    store: S,
}

impl<S: ObjectStore> UploadService<S> {
    pub fn new(config: StorageConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Upload and return the object's public URL.
    pub async fn upload(&self, file: UploadFile) -> Result<String, UploadError> {
        self.upload_with_timestamp(file, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Same as [`upload`](Self::upload) with the key timestamp supplied.
    pub async fn upload_with_timestamp(&self, file: UploadFile, millis: i64) -> Result<String, UploadError> {
        if file.size() > self.config.max_size_bytes() {
            return Err(UploadError::SizeExceeded(self.config.max_size_mb));
        }
        if !self.config.allows(&file.content_type) {
            return Err(UploadError::TypeNotAllowed(file.content_type));
        }

        let key = format!(
            "{}{}-{}",
            self.config.key_prefix(),
            millis,
            sanitize_file_name(&file.name)
        );
        let content_type = if file.content_type.is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            file.content_type.as_str()
        };

        self.store.put(&key, content_type, file.bytes).await?;

        let url = format!("{}/{}", self.config.public_base(), key);
        tracing::info!(%key, %url, "logo uploaded");
        Ok(url)
    }
}
