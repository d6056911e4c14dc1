use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for amalgamation runs
#[derive(Error, Debug)]
pub enum AmalgamateError {
    /// IO error not tied to a specific source or output path
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Scan root is missing or is not a directory
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Selected source disappeared or stopped being a regular file
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Source file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Amalgamation could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Include pattern failed to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// `WalkDir` error when listing the scan root
    #[error("Directory listing error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AmalgamateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AmalgamateError::DirectoryNotFound {
            path: PathBuf::from("/lib/ail"),
        };
        assert_eq!(format!("{err}"), "Directory not found: /lib/ail");

        let err = AmalgamateError::FileNotFound {
            path: PathBuf::from("/lib/ail/ail_fs.h"),
        };
        assert_eq!(format!("{err}"), "File not found: /lib/ail/ail_fs.h");

        let err = AmalgamateError::Read {
            path: PathBuf::from("ail_sv.h"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to read ail_sv.h: permission denied"
        );

        let err = AmalgamateError::Write {
            path: PathBuf::from("ail_all.h"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(format!("{err}").starts_with("Failed to write ail_all.h"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: AmalgamateError = io_err.into();
        assert!(matches!(err, AmalgamateError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: AmalgamateError = json_err.into();
        assert!(matches!(err, AmalgamateError::Json(_)));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = AmalgamateError::Read {
            path: PathBuf::from("ail.h"),
            source: io::Error::other("boom"),
        };
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("boom"));
    }
}
