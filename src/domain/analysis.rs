use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Number of source characters echoed back in `raw` when the model omits it.
pub const RAW_PREVIEW_CHARS: usize = 500;

/// Structured medical-record fields extracted from a document.
///
/// `dates`, `medications`, `actions` and `raw` are always present once a value
/// reaches a caller. Keys the model adds beyond those are kept in `extra` and
/// serialized back at the top level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub actions: Vec<Action>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Medication {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dose: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Empty result carrying a preview of the source text and an error message.
    pub fn degraded(original_text: &str, error: impl Into<String>) -> Self {
        Self {
            raw: raw_preview(original_text),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Result returned when analysis was skipped, e.g. no API key configured.
    pub fn placeholder(original_text: &str, note: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("note".to_string(), Value::String(note.into()));
        Self {
            raw: raw_preview(original_text),
            extra,
            ..Self::default()
        }
    }
}

/// First [`RAW_PREVIEW_CHARS`] characters of `text`, split on a char boundary.
pub fn raw_preview(text: &str) -> String {
    text.chars().take(RAW_PREVIEW_CHARS).collect()
}

/// Text form of a scalar model value. `null` has none; numbers and booleans
/// are rendered, nested values keep their JSON text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Accepts a list of strings, dropping `null` and nested entries and rendering
/// numbers. A bare string counts as a one-element list.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s]),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter(|item| !item.is_array() && !item.is_object())
            .filter_map(scalar_text)
            .collect()),
        other => Err(D::Error::custom(format!(
            "expected a list of strings, got {other}"
        ))),
    }
}

/// List of objects where `null` entries are skipped.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    items
        .unwrap_or_default()
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| T::deserialize(item).map_err(D::Error::custom))
        .collect()
}
