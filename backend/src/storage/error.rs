use thiserror::Error;

/// Failures raised by the record store.
///
/// A missing record is not an error: lookups return `Option` instead.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened, created or upgraded. Fatal for the
    /// session; callers may retry by opening the store again.
    #[error("record store unavailable at {location}: {source}")]
    Unavailable {
        location: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("store '{store}' has no index named '{index}'")]
    UnknownIndex { store: &'static str, index: String },

    /// A stored document no longer matches its entity shape
    #[error("record '{id}' in store '{store}' could not be decoded: {source}")]
    Corrupt {
        store: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record for store '{store}' could not be encoded: {source}")]
    Encode {
        store: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Query(#[from] sqlx::Error),
}
