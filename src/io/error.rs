//! Error types for catalog loading, matching, and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Candidate catalog or persisted tree was unavailable or malformed
    CatalogLoad {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying JSON parse error
        source: serde_json::Error,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A write targeted an index beyond a declared capacity
    ///
    /// Always a caller-ordering bug: capacities are declared up front and
    /// never grow.
    Capacity {
        /// Which storage was addressed ("node" or "tile")
        what: &'static str,
        /// The out-of-range index
        index: usize,
        /// The declared capacity
        capacity: usize,
    },

    /// An engine call was issued before its prerequisites completed
    ///
    /// Covers queries against a partially populated engine, a root set
    /// while node slots remain unwritten, and result reads before a batch
    /// has run. Same fatal class as [`MosaicError::Capacity`].
    EngineState {
        /// The call that was rejected
        operation: &'static str,
        /// What prerequisite was missing
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogLoad { path, source } => {
                write!(f, "Failed to load catalog '{}': {source}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::Capacity {
                what,
                index,
                capacity,
            } => {
                write!(
                    f,
                    "{what} index {index} is out of bounds (declared capacity: {capacity})"
                )
            }
            Self::EngineState { operation, reason } => {
                write!(f, "Engine rejected {operation}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad { source, .. } => Some(source),
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an engine state violation error
pub fn engine_state(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::EngineState {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a generic path error (temporary compatibility helper)
pub fn io_error(msg: &str) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
