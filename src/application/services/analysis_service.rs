use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError};
use crate::domain::{AnalysisResult, UploadedDocument};

use super::medical_prompt::{SYSTEM_PROMPT, build_user_prompt};
use super::response_normalizer::normalize;

const SKIPPED_ANALYSIS_NOTE: &str = "analysis skipped: no API key configured";

/// What to do when a request reaches the analysis stage without an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingApiKeyPolicy {
    /// Answer with the extracted text and a placeholder analysis.
    #[default]
    Degrade,
    /// Treat the request as a server-side failure.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub min_text_chars: usize,
    pub max_input_chars: usize,
    pub missing_api_key: MissingApiKeyPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_text_chars: 10,
            max_input_chars: 12_000,
            missing_api_key: MissingApiKeyPolicy::Degrade,
        }
    }
}

pub struct AnalysisService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    file_loader: Arc<F>,
    llm_client: Option<Arc<L>>,
    options: AnalysisOptions,
}

impl<F, L> AnalysisService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    /// `llm_client` is `None` when no API key is configured.
    pub fn new(file_loader: Arc<F>, llm_client: Option<Arc<L>>, options: AnalysisOptions) -> Self {
        Self {
            file_loader,
            llm_client,
            options,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn has_llm_client(&self) -> bool {
        self.llm_client.is_some()
    }

    /// Extracts text from an upload. Only an unusable format is an error;
    /// decoding problems come back as an empty string from the loader.
    pub async fn extract(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, AnalysisError> {
        match self.file_loader.extract_text(data, document).await {
            Ok(text) => Ok(text),
            Err(FileLoaderError::UnsupportedContentType(detail)) => {
                Err(AnalysisError::UnsupportedFormat(detail))
            }
            Err(e) => {
                tracing::warn!(error = %e, filename = %document.filename, "Extraction failed");
                Ok(String::new())
            }
        }
    }

    /// Rejects text that is empty or shorter than the configured minimum.
    pub fn ensure_sufficient_text(&self, text: &str) -> Result<(), AnalysisError> {
        let char_count = text.trim().chars().count();
        if char_count < self.options.min_text_chars {
            return Err(AnalysisError::ExtractionTooShort {
                char_count,
                min_chars: self.options.min_text_chars,
            });
        }
        Ok(())
    }

    /// Sends `text` to the model and returns its raw reply content.
    pub async fn request_analysis(&self, text: &str) -> Result<String, AnalysisError> {
        let client = self
            .llm_client
            .as_ref()
            .ok_or(AnalysisError::MissingApiKey)?;

        let user_prompt = build_user_prompt(text, self.options.max_input_chars);
        client
            .complete(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(AnalysisError::Upstream)
    }

    #[tracing::instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if self.llm_client.is_none() {
            return match self.options.missing_api_key {
                MissingApiKeyPolicy::Degrade => {
                    tracing::warn!("No API key configured, returning extraction-only result");
                    Ok(AnalysisResult::placeholder(text, SKIPPED_ANALYSIS_NOTE))
                }
                MissingApiKeyPolicy::Fail => Err(AnalysisError::MissingApiKey),
            };
        }

        let content = self.request_analysis(text).await?;
        let result = normalize(&content, text);

        tracing::info!(
            dates = result.dates.len(),
            medications = result.medications.len(),
            actions = result.actions.len(),
            degraded = result.error.is_some(),
            "Analysis complete"
        );

        Ok(result)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error(
        "Could not extract text from document (empty or too short: {char_count} < {min_chars} chars)"
    )]
    ExtractionTooShort { char_count: usize, min_chars: usize },
    #[error("No API key configured for analysis")]
    MissingApiKey,
    #[error("Analysis request failed: {0}")]
    Upstream(#[from] LlmClientError),
}
