//! Local files picked for upload.

use std::path::Path;

use catalog_storage::UploadFile;

/// MIME type from the file extension; unknown extensions are
/// `application/octet-stream` and will be refused by the allow-list.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub async fn read_upload(path: &Path) -> std::io::Result<UploadFile> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadFile::new(name, content_type_for(path), bytes))
}
