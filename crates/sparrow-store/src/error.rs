//! Error types for the store layer.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stored document's version no longer matches the version the
    /// caller read. Expected under contention and recoverable: the
    /// caller re-reads the document and reissues the write if the
    /// mutation still applies. Never retried inside the store.
    #[error("version conflict on {key}: expected {expected}, found {found}")]
    VersionConflict {
        key: String,
        expected: u64,
        found: u64,
    },

    /// No document exists under this key.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document already exists under this key.
    #[error("document already exists: {0}")]
    AlreadyExists(String),

    /// The item is not a JSON object, so it cannot carry a version field.
    #[error("document {0} is not a JSON object")]
    NotAnObject(String),

    /// The stored item carries no usable `version` field. Indicates a
    /// write that bypassed the store's versioning, which is forbidden.
    #[error("document {0} has no version field")]
    MissingVersion(String),

    /// Serialization failed crossing the typed document boundary.
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
