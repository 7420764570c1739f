// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in pinchpad return `error::Result<T>`.  Gesture and
// mode-resolution paths never fail; only the editor engine and configuration
// loading produce errors, and those are fatal for one view instance only.

use thiserror::Error;

/// Every error that pinchpad can produce.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The embedded editor engine rejected a construction, reconfiguration or
    /// edit request.
    #[error("editor engine failed to {op}: {reason}")]
    Engine {
        /// The engine operation that failed, for display purposes.
        op: &'static str,
        /// Engine-supplied description of the failure.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A standard I/O error (config or document read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON config or touch trace could not be parsed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    /// Shorthand for an engine failure.
    pub fn engine(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Engine {
            op,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display() {
        let e = EditorError::engine("reconfigure", "engine destroyed");
        assert_eq!(
            e.to_string(),
            "editor engine failed to reconfigure: engine destroyed"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: EditorError = io.into();
        assert!(matches!(e, EditorError::Io(_)));
        assert!(e.to_string().starts_with("I/O error"));
    }
}
