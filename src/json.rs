//! JSON import/export boundary shared by command and info documents.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::error::Category;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    MalformedDocument(#[source] serde_json::Error),
    #[error("schema violation at `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl DocumentError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DocumentError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let field = err.path().to_string();
        let inner = err.into_inner();
        match inner.classify() {
            Category::Data => DocumentError::SchemaViolation {
                field,
                reason: inner.to_string(),
            },
            Category::Io | Category::Syntax | Category::Eof => {
                DocumentError::MalformedDocument(inner)
            }
        }
    }
}

/// Decodes `text` into the wire representation `T`, keeping the path of the
/// offending field for data errors.
pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, DocumentError> {
    let jd = &mut serde_json::Deserializer::from_str(text);
    let value =
        serde_path_to_error::deserialize(&mut *jd).map_err(DocumentError::from_path_error)?;
    jd.end().map_err(DocumentError::MalformedDocument)?;
    Ok(value)
}

pub(crate) fn encode<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
