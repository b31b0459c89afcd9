use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{AnalysisResult, UploadedDocument};
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::state::AppState;

use super::analyze_input::AnalyzeInput;
use super::error::AnalyzeError;

/// Response envelope shared by `/analyze` and `/api/extract`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn success(text: String, analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            text: Some(text),
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            text: None,
            analysis: None,
            error: Some(error),
        }
    }
}

#[tracing::instrument(skip(state, input))]
pub async fn analyze_handler<F, L>(
    State(state): State<AppState<F, L>>,
    input: AnalyzeInput,
) -> Result<Json<AnalyzeResponse>, AnalyzeError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let service = &state.analysis_service;

    let text = match input {
        AnalyzeInput::File { filename, data } => {
            let document = UploadedDocument::new(filename, data.len() as u64);
            tracing::info!(
                filename = %document.filename,
                content_type = document.content_type.as_str(),
                bytes = document.size_bytes,
                "Processing upload"
            );
            service.extract(&data, &document).await?
        }
        AnalyzeInput::Text(text) => {
            tracing::info!("Processing inline text");
            text.trim().to_string()
        }
    };

    service.ensure_sufficient_text(&text)?;

    tracing::info!(
        chars = text.chars().count(),
        preview = %sanitize_for_log(&text),
        "Text extracted"
    );

    match service.analyze(&text).await {
        Ok(analysis) => Ok(Json(AnalyzeResponse::success(text, analysis))),
        Err(source) => Err(AnalyzeError::AnalysisFailed { text, source }),
    }
}
