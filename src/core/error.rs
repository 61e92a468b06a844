use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, filtering, or writing an export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML, or serialization failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// The customer table could not be serialized as JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// An action was triggered before the state it needs exists.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A row index or identifier does not address a customer row.
    #[error("selection error: {0}")]
    Selection(String),
}

impl FilterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
