mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, ExtractionSettings, LlmSettings, LoggingSettings, OcrSettings,
    PdfExtractionSettings, ServerSettings, Settings,
};
