//! Size check and download errors

use super::CacheMergerError;

/// Creates an invalid source URL error
pub fn invalid_url(url: impl Into<String>) -> CacheMergerError {
    CacheMergerError::InvalidSourceUrl { url: url.into() }
}

/// Creates a request failed error (connection refused, DNS, TLS, ...)
pub fn request_failed(url: impl Into<String>, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::RequestFailed {
        url: url.into(),
        reason: reason.to_string(),
    }
}

/// Creates an HTTP status error
pub fn http_status(url: impl Into<String>, status: u16) -> CacheMergerError {
    CacheMergerError::HttpStatus {
        url: url.into(),
        status,
    }
}

/// Creates a missing Content-Length error
pub fn missing_content_length(url: impl Into<String>) -> CacheMergerError {
    CacheMergerError::MissingContentLength { url: url.into() }
}

/// Creates a download failed error
pub fn download_failed(url: impl Into<String>, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::DownloadFailed {
        url: url.into(),
        reason: reason.to_string(),
    }
}
