use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

/// Extraction family of an upload, derived from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Image,
    Text,
    WordProcessing,
    Unknown,
}

impl ContentType {
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "bmp" | "tiff" | "tif" => Self::Image,
            "txt" | "text" | "md" | "csv" | "log" => Self::Text,
            "doc" | "docx" => Self::WordProcessing,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
            Self::WordProcessing => "word-processing",
            Self::Unknown => "unknown",
        }
    }
}

impl UploadedDocument {
    pub fn new(filename: String, size_bytes: u64) -> Self {
        let content_type = ContentType::from_filename(&filename);
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }
}
