//! # Content Errors

use thiserror::Error;

/// Errors raised by content stores and bundle loading.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The backing store could not answer.
    #[error("content store {store} unavailable: {reason}")]
    Unavailable {
        /// Which store failed (e.g. "documents", "guidance").
        store: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A content bundle could not be read from disk.
    #[error("failed to read content bundle {path}: {source}")]
    Io {
        /// The bundle path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A content bundle could not be parsed.
    #[error("failed to parse content bundle {path}: {reason}")]
    Parse {
        /// The bundle path.
        path: String,
        /// Parser message.
        reason: String,
    },
}
