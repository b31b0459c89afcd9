mod analysis;
mod document;

pub use analysis::{Action, AnalysisResult, Medication, RAW_PREVIEW_CHARS, raw_preview};
pub use document::{ContentType, UploadedDocument};
