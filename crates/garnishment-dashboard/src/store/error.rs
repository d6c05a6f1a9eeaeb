//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`Storage`](super::Storage) backend.
///
/// None of these are fatal to the board: the store logs them and keeps
/// working from memory.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A stored value could not be read.
    #[error("Failed to read {key} from {path}")]
    Read {
        /// Storage key.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be written.
    #[error("Failed to write {key} to {path}")]
    Write {
        /// Storage key.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The final rename of an atomic write failed.
    #[error("Failed to write {path} atomically - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Target file.
        path: PathBuf,
        /// Temporary file left behind with the new contents.
        temp_path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The widget collection could not be serialized.
    #[error("Failed to serialize widgets: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_read_error_includes_key_and_path() {
        let err = StorageError::Read {
            key: "analytics-widgets-u1".to_string(),
            path: PathBuf::from("/data/analytics-widgets-u1"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("analytics-widgets-u1"));
        assert!(msg.contains("/data/"));
    }

    #[test]
    fn display_write_atomic_mentions_safety_copy() {
        let err = StorageError::WriteAtomic {
            path: PathBuf::from("/data/user-id"),
            temp_path: PathBuf::from("/data/user-id.tmp.1"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "rename failed"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Safety copy"));
        assert!(msg.contains("user-id.tmp.1"));
    }

    #[test]
    fn write_error_chains_source() {
        let err = StorageError::Write {
            key: "k".to_string(),
            path: PathBuf::from("/k"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
