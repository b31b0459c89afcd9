use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

/// Routes each upload to the adapter registered for its content type.
///
/// Adapter failures are logged and absorbed into an empty string, so the only
/// error a caller sees is an unsupported format.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.adapters.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        let adapter = self
            .adapters
            .get(&document.content_type)
            .ok_or_else(|| FileLoaderError::UnsupportedContentType(document.filename.clone()))?;

        tracing::info!(
            filename = %document.filename,
            content_type = document.content_type.as_str(),
            bytes = data.len(),
            "Extracting text"
        );

        match adapter.extract_text(data, document).await {
            Ok(text) => Ok(text),
            Err(FileLoaderError::UnsupportedContentType(detail)) => {
                Err(FileLoaderError::UnsupportedContentType(detail))
            }
            Err(e) => {
                tracing::warn!(
                    filename = %document.filename,
                    error = %e,
                    "Text extraction failed, continuing with empty text"
                );
                Ok(String::new())
            }
        }
    }
}
