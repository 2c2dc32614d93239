//! Merge tool errors

use super::CacheMergerError;

/// Creates an error for a merge tool that could not be started
pub fn spawn_failed(tool: impl Into<String>, reason: impl ToString) -> CacheMergerError {
    CacheMergerError::MergeToolSpawnFailed {
        tool: tool.into(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a merge tool that exited unsuccessfully
pub fn tool_failed(status: impl Into<String>, output: impl Into<String>) -> CacheMergerError {
    CacheMergerError::MergeToolFailed {
        status: status.into(),
        output: output.into(),
    }
}
