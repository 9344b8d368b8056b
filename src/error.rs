//! Error type shared by the preference store, the DOM layer, and the panel.
//!
//! None of these errors are fatal. Callers at a DOM callback boundary log
//! them and leave the page as it was.

/// Error returned by fallible storage and DOM operations.
#[derive(Debug, thiserror::Error)]
pub enum TweakError {
    /// `window.localStorage` could not be obtained (disabled, sandboxed frame, etc.).
    #[error("local storage is unavailable")]
    StorageUnavailable,
    /// The store rejected a write, typically because the quota is exhausted.
    #[error("failed to write preference {key}: {reason}")]
    StorageWrite { key: String, reason: String },
    /// A value could not be serialized to JSON before storing it.
    #[error("failed to encode preference {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// A DOM call failed (element creation, insertion, attribute write).
    #[error("dom operation failed: {0}")]
    Dom(String),
}
