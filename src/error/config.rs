//! Configuration and record file errors

use super::CacheMergerError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> CacheMergerError {
    CacheMergerError::ConfigNotFound { path: path.into() }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> CacheMergerError {
    CacheMergerError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates the error returned when the user declines regenerating the config
pub fn rejected(path: impl Into<String>) -> CacheMergerError {
    CacheMergerError::ConfigRejected { path: path.into() }
}

/// Creates a record file parse failed error
pub fn records_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> CacheMergerError {
    CacheMergerError::RecordsParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
