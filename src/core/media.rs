//! Image uploads are stored inline as `data:` URLs in the owning record's `image` field.

use crate::errors::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::Path;
use tracing::debug;

/// MIME type for an image path, judged by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Encodes `bytes` as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> Result<String> {
    if !mime.starts_with("image/") {
        return Err(Error::validation("Please select an image file"));
    }
    if bytes.is_empty() {
        return Err(Error::validation("Image file is empty"));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Reads an image from disk and returns it as a `data:` URL.
pub async fn image_data_url_from_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mime = mime_for_path(path).ok_or_else(|| Error::validation("Please select an image file"))?;
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), size = bytes.len(), "Encoding image upload");
    encode_data_url(mime, &bytes)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("lawn.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("a/b/tree.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("logo.svg")), Some("image/svg+xml"));
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("README")), None);
    }

    #[test]
    fn test_encode_data_url() -> Result<()> {
        assert_eq!(
            encode_data_url("image/gif", b"GIF89a")?,
            "data:image/gif;base64,R0lGODlh"
        );
        assert!(matches!(
            encode_data_url("image/png", &[]),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            encode_data_url("application/pdf", b"%PDF"),
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_image_data_url_from_file() -> Result<()> {
        let dir = std::env::temp_dir();
        let image = dir.join(format!("zentra-media-{}.png", std::process::id()));
        tokio::fs::write(&image, [0x89, b'P', b'N', b'G']).await?;

        let url = image_data_url_from_file(&image).await?;
        tokio::fs::remove_file(&image).await?;
        assert!(url.starts_with("data:image/png;base64,"));

        let err = image_data_url_from_file(dir.join("notes.txt")).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        Ok(())
    }
}
