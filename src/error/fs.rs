//! File system errors

use std::path::Path;

use super::CacheMergerError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a copy failed error
pub fn copy_failed(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    reason: impl ToString,
) -> CacheMergerError {
    CacheMergerError::FileCopyFailed {
        from: from.as_ref().display().to_string(),
        to: to.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a work directory creation error
pub fn work_dir_create_failed(path: &Path, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::WorkDirCreateFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
