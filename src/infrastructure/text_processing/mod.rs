mod composite_file_loader;
mod extractor_factory;
mod image_ocr_adapter;
mod mock_file_loader;
mod pdf_adapter;
mod plain_text_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use extractor_factory::ExtractorFactory;
pub use image_ocr_adapter::ImageOcrAdapter;
pub use mock_file_loader::MockFileLoader;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::{PlainTextAdapter, RawDecodeAdapter};
pub use text_sanitizer::sanitize_extracted_text;
