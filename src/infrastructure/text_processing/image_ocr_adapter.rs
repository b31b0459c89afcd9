use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

/// Runs the Tesseract CLI over an uploaded raster image.
///
/// The upload is decoded first, so corrupt or non-image bytes fail before any
/// process is spawned, then re-encoded as PNG into a scoped temp file that the
/// OCR binary reads.
pub struct ImageOcrAdapter {
    binary_path: PathBuf,
    language: String,
    timeout: Duration,
}

impl ImageOcrAdapter {
    pub fn new(binary_path: impl Into<PathBuf>, language: &str, timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            language: language.to_string(),
            timeout,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn decode_to_png(data: &[u8]) -> Result<NamedTempFile, FileLoaderError> {
        let image = image::load_from_memory(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to decode image: {e}")))?;

        let temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
            })?;

        image
            .save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to write PNG: {e}")))?;

        Ok(temp_file)
    }

    async fn run_ocr(&self, image_file: &NamedTempFile) -> Result<String, FileLoaderError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.binary_path)
                .arg(image_file.path())
                .arg("stdout")
                .arg("-l")
                .arg(&self.language)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("OCR timed out".to_string()))?
        .map_err(|e| {
            FileLoaderError::ExtractionFailed(format!(
                "failed to run {}: {e}",
                self.binary_path.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FileLoaderError::ExtractionFailed(format!(
                "OCR exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl FileLoader for ImageOcrAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(filename = %document.filename, language = %self.language)
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Image {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_str().to_string(),
            ));
        }

        let data_owned = data.to_vec();
        let image_file = tokio::task::spawn_blocking(move || Self::decode_to_png(&data_owned))
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = self.run_ocr(&image_file).await?;
        tracing::info!(chars = text.chars().count(), "OCR complete");

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
