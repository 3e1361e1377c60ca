//! Error types for txcheck.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for txcheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in txcheck.
#[derive(Error, Debug)]
pub enum Error {
    /// No input was provided (no file, no stdin).
    #[error("No input provided. Use: txcheck view --request <file> <view-file>, or pipe the view to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The `transaction view` output is not valid YAML/JSON.
    #[error("Failed to parse transaction view: {0}")]
    ViewParse(String),

    /// The transaction request could not be deserialized.
    #[error("Invalid transaction request: {0}")]
    InvalidRequest(String),

    /// A field the view must carry is absent.
    #[error("Field not found in transaction view: '{0}'")]
    MissingField(String),

    /// A view field is present but has an unusable shape.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Era name outside the known eras.
    #[error("Unknown era: '{0}'")]
    UnknownEra(String),

    /// A reward address could not be decoded.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The requested and viewed transaction disagree on a property.
    #[error("{property}: {expected} != {actual}")]
    Mismatch {
        property: &'static str,
        expected: String,
        actual: String,
    },

    /// A certificate carries fields its kind does not allow.
    #[error("The output of the certificate '{kind}' doesn't have the expected fields: unexpected {unexpected:?}")]
    CertificateShape {
        kind: String,
        unexpected: Vec<String>,
    },

    /// The `kes-period-info` output is malformed.
    #[error("Invalid KES period info: {0}")]
    InvalidKesInfo(String),

    /// The KES period info does not match the expected scenario.
    #[error("KES scenario mismatch: expected {expected}, got {actual}{}", detail.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
    KesScenarioMismatch {
        expected: String,
        actual: String,
        detail: Option<String>,
    },

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Verification failure
            Error::Mismatch { .. }
            | Error::CertificateShape { .. }
            | Error::KesScenarioMismatch { .. } => 1,
            // Parse/decode errors
            Error::ViewParse(_)
            | Error::MissingField(_)
            | Error::InvalidField { .. }
            | Error::UnknownEra(_)
            | Error::InvalidAddress { .. }
            | Error::InvalidKesInfo(_) => 2,
            // I/O errors
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            // Request errors
            Error::InvalidRequest(_) => 4,
            // Format errors
            Error::FormatError(_) => 5,
        }
    }
}
