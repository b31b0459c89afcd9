mod analysis_service;
mod medical_prompt;
mod response_normalizer;

pub use analysis_service::{AnalysisError, AnalysisOptions, AnalysisService, MissingApiKeyPolicy};
pub use medical_prompt::{SYSTEM_PROMPT, build_user_prompt};
pub use response_normalizer::{normalize, strip_code_fences};
