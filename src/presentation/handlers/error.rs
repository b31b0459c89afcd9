use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::AnalysisError;
use crate::domain::AnalysisResult;

use super::analyze::AnalyzeResponse;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("No file or text provided")]
    MissingInput,
    #[error("Empty filename")]
    EmptyFilename,
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error(transparent)]
    Rejected(#[from] AnalysisError),
    /// Failure after text was extracted; the text is echoed back to the client.
    #[error("{source}")]
    AnalysisFailed { text: String, source: AnalysisError },
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput | Self::EmptyFilename | Self::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Rejected(AnalysisError::UnsupportedFormat(_))
            | Self::Rejected(AnalysisError::ExtractionTooShort { .. }) => StatusCode::BAD_REQUEST,
            Self::Rejected(_) | Self::AnalysisFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Analyze request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Analyze request rejected");
        }

        let body = match self {
            Self::AnalysisFailed { text, .. } => AnalyzeResponse {
                success: false,
                analysis: Some(AnalysisResult::degraded(&text, message.clone())),
                text: Some(text),
                error: Some(message),
            },
            _ => AnalyzeResponse::failure(message),
        };

        (status, Json(body)).into_response()
    }
}
