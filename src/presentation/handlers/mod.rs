mod analyze;
mod analyze_input;
mod error;
mod health;

pub use analyze::{AnalyzeResponse, analyze_handler};
pub use analyze_input::AnalyzeInput;
pub use error::AnalyzeError;
pub use health::{HealthResponse, health_handler};
