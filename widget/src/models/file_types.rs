use crate::error::ClassifyError;
use image::ImageFormat;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Extensions accepted when the bytes themselves don't identify the format.
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

/// The image the user picked. The payload is shared so retries and
/// snapshots don't copy it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl SelectedFile {
    /// Drag-drop path: the host supplies the MIME type, and anything that is
    /// not `image/*` is refused.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ClassifyError> {
        let name = name.into();
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return Err(ClassifyError::InvalidFile(format!(
                "{} has type {:?}, expected an image",
                name, mime
            )));
        }
        if bytes.is_empty() {
            return Err(ClassifyError::InvalidFile(format!("{} is empty", name)));
        }
        Ok(Self {
            name,
            mime,
            bytes: Arc::new(bytes),
        })
    }

    /// File-picker path: reads the file and works out its MIME type from the
    /// magic bytes, falling back to the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ClassifyError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClassifyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mime = sniff_mime(&bytes, path).ok_or_else(|| {
            ClassifyError::InvalidFile(format!("{} is not a recognised image", name))
        })?;

        Self::from_bytes(name, mime, bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            mime: self.mime.clone(),
            size: self.size(),
        }
    }
}

pub fn sniff_mime(bytes: &[u8], path: &Path) -> Option<String> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }

    let ext = path.extension()?.to_str()?.to_lowercase();
    if let Some(format) = ImageFormat::from_extension(&ext) {
        return Some(format.to_mime_type().to_string());
    }
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| mime.to_string())
}
