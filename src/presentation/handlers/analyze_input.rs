use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;

use super::error::AnalyzeError;

const FILE_FIELD: &str = "file";
const TEXT_FIELD: &str = "text";

/// What the client asked to analyze: an uploaded file or inline text.
#[derive(Debug)]
pub enum AnalyzeInput {
    File { filename: String, data: Bytes },
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct TextBody {
    #[serde(default)]
    text: Option<String>,
}

impl AnalyzeInput {
    /// A named file wins over inline text. A file part without a filename is
    /// only an error when there is no usable text either.
    fn resolve(file: Option<(String, Bytes)>, text: Option<String>) -> Result<Self, AnalyzeError> {
        let text = text.filter(|t| !t.trim().is_empty());

        match (file, text) {
            (Some((filename, data)), _) if !filename.trim().is_empty() => {
                Ok(Self::File { filename, data })
            }
            (_, Some(text)) => Ok(Self::Text(text)),
            (Some(_), None) => Err(AnalyzeError::EmptyFilename),
            (None, None) => Err(AnalyzeError::MissingInput),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AnalyzeError> {
        let mut file = None;
        let mut text = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?;
                    tracing::debug!(filename = %filename, bytes = data.len(), "File part received");
                    file = Some((filename, data));
                }
                Some(TEXT_FIELD) => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?;
                    text = Some(value);
                }
                other => tracing::debug!(field = ?other, "Ignoring unknown multipart field"),
            }
        }

        Self::resolve(file, text)
    }
}

impl<S> FromRequest<S> for AnalyzeInput
where
    S: Send + Sync,
{
    type Rejection = AnalyzeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<TextBody>::from_request(req, state)
                .await
                .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?;
            return Self::resolve(None, body.text);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<TextBody>::from_request(req, state)
                .await
                .map_err(|e| AnalyzeError::InvalidUpload(e.body_text()))?;
            return Self::resolve(None, body.text);
        }

        Err(AnalyzeError::MissingInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_file_takes_precedence_over_text() {
        let input = AnalyzeInput::resolve(
            Some(("brief.pdf".to_string(), Bytes::from_static(b"%PDF"))),
            Some("Aspirin 100mg".to_string()),
        );
        assert!(matches!(input, Ok(AnalyzeInput::File { filename, .. }) if filename == "brief.pdf"));
    }

    #[test]
    fn unnamed_file_falls_back_to_text() {
        let input = AnalyzeInput::resolve(
            Some((String::new(), Bytes::new())),
            Some("Aspirin 100mg".to_string()),
        );
        assert!(matches!(input, Ok(AnalyzeInput::Text(_))));
    }

    #[test]
    fn unnamed_file_without_text_is_empty_filename() {
        let input = AnalyzeInput::resolve(Some((String::new(), Bytes::new())), None);
        assert!(matches!(input, Err(AnalyzeError::EmptyFilename)));
    }

    #[test]
    fn blank_text_without_file_is_missing_input() {
        let input = AnalyzeInput::resolve(None, Some("   ".to_string()));
        assert!(matches!(input, Err(AnalyzeError::MissingInput)));
    }
}
