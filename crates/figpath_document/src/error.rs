//! Document conversion error types

use figpath_core::MalformedPathError;
use thiserror::Error;

/// Errors that can occur when converting a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A path record holds data that cannot be parsed
    #[error("path at {pointer}: {source}")]
    Path {
        /// JSON pointer to the offending record
        pointer: String,
        #[source]
        source: MalformedPathError,
    },

    /// A conversion thread panicked
    #[error("conversion worker panicked")]
    WorkerPanicked,
}

impl DocumentError {
    /// Pointer of the failing record, if the error is tied to one
    pub fn pointer(&self) -> Option<&str> {
        match self {
            DocumentError::Path { pointer, .. } => Some(pointer),
            DocumentError::WorkerPanicked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figpath_core::MalformedReason;

    #[test]
    fn test_path_error_names_pointer() {
        let err = DocumentError::Path {
            pointer: "/children/0/vectorPaths/1".to_string(),
            source: MalformedPathError::new(2, "B", MalformedReason::UnknownCommand('B')),
        };
        assert_eq!(err.pointer(), Some("/children/0/vectorPaths/1"));
        assert!(err
            .to_string()
            .starts_with("path at /children/0/vectorPaths/1: malformed path at offset 2"));
    }
}
