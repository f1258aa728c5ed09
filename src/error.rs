use thiserror::Error;

/// Errors surfaced by the vehicle repository.
///
/// A missing row is not an error: lookups and mutations report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store could not be opened.
    #[error("failed to connect to '{path}': {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed to prepare or execute on an open connection.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A write affected an unexpected number of rows or yielded no identifier.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// A stored value does not map to the expected type.
    #[error("cannot decode column '{column}' from value '{value}': {reason}")]
    Decode {
        column: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
