use serde::Deserialize;

/// Where uploads go and what they may contain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub prefix: String,
    pub max_size_mb: u64,
    pub allowed_types: Vec<String>,
    /// CDN or custom domain; empty means the bucket's S3 URL.
    pub public_base_url: String,
    /// Endpoint accepting `PUT {upload_endpoint}/{key}`.
    pub upload_endpoint: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "products-logos".to_string(),
            region: "us-east-2".to_string(),
            prefix: "products/".to_string(),
            max_size_mb: 5,
            allowed_types: ["image/png", "image/jpeg", "image/webp", "image/gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            public_base_url: String::new(),
            upload_endpoint: "http://localhost:3002/uploads".to_string(),
        }
    }
}

impl StorageConfig {
    /// Saturates at `u64::MAX` for absurdly large limits.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn allows(&self, content_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == content_type)
    }

    /// Key prefix with exactly one trailing `/`, or empty.
    pub fn key_prefix(&self) -> String {
        match self.prefix.as_str() {
            "" => String::new(),
            p if p.ends_with('/') => p.to_string(),
            p => format!("{p}/"),
        }
    }

    pub fn public_base(&self) -> String {
        let custom = self.public_base_url.trim();
        if custom.is_empty() {
            format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
        } else {
            custom.trim_end_matches('/').to_string()
        }
    }
}
