use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileLoader;
use crate::domain::ContentType;
use crate::presentation::config::ExtractionSettings;

use super::composite_file_loader::CompositeFileLoader;
use super::image_ocr_adapter::ImageOcrAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::{PlainTextAdapter, RawDecodeAdapter};

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Builds the extension-dispatched extractor. Word documents get no adapter
    /// and are therefore rejected as unsupported.
    pub fn create(settings: &ExtractionSettings) -> CompositeFileLoader {
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::with_timeout(Duration::from_secs(
            settings.pdf.timeout_secs,
        )));
        let ocr: Arc<dyn FileLoader> = Arc::new(ImageOcrAdapter::new(
            &settings.ocr.binary_path,
            &settings.ocr.language,
            Duration::from_secs(settings.ocr.timeout_secs),
        ));

        tracing::info!(
            ocr_binary = %settings.ocr.binary_path,
            ocr_language = %settings.ocr.language,
            "Text extractors configured"
        );

        let plain_text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let raw_decode: Arc<dyn FileLoader> = Arc::new(RawDecodeAdapter);

        CompositeFileLoader::new(vec![
            (ContentType::Pdf, pdf),
            (ContentType::Image, ocr),
            (ContentType::Text, plain_text),
            (ContentType::Unknown, raw_decode),
        ])
    }
}
