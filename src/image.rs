//! Image file descriptors and data-URL ingestion.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use std::path::Path;

use base64::Engine;

/// A user-selected image: declared media type plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    #[must_use]
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { media_type: media_type.into(), bytes }
    }

    /// Read `path`, declaring its media type from the file extension.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(media_type_for(path), bytes))
    }

    /// Byte size of the file.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Encode `file` as `data:<media_type>;base64,<payload>`.
#[must_use]
pub fn to_data_url(file: &ImageFile) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
    format!("data:{};base64,{payload}", file.media_type)
}

/// Guess a media type from a path's extension. Unknown extensions map to
/// `application/octet-stream`, which image validation rejects.
#[must_use]
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
