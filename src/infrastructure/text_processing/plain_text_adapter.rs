use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

/// Decodes text files, replacing invalid UTF-8 sequences.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_str().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(data).trim().to_string())
    }
}

/// Best-effort decode for files with an unrecognised extension.
///
/// Accepts the payload only if it is valid UTF-8; anything else is reported as
/// an unsupported format rather than an extraction failure.
pub struct RawDecodeAdapter;

#[async_trait]
impl FileLoader for RawDecodeAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        std::str::from_utf8(data)
            .map(|text| text.trim().to_string())
            .map_err(|_| FileLoaderError::UnsupportedContentType(document.filename.clone()))
    }
}
