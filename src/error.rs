/*
 * Error type shared by every layer of the crate. Surface operations, screen
 * manager commands and method dispatch all return `Result<T>` so that a failed
 * OS call travels back to the channel as an error reply instead of being lost.
 */
use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The native window handle is null or no longer refers to a live window.
    #[error("invalid window handle: {0}")]
    InvalidHandle(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
    #[error("window {0:?} not found")]
    WindowNotFound(WindowId),
    /// A screen-manager method was called before `ensureScreenInitialized`.
    #[error("screen manager is not initialized")]
    ScreenNotInitialized,
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl PlatformError {
    /// Stable error code sent back over the method channel.
    pub fn code(&self) -> &'static str {
        match self {
            PlatformError::InvalidHandle(_) => "INVALID_HANDLE",
            PlatformError::OperationFailed(_) => "OPERATION_FAILED",
            PlatformError::InitializationFailed(_) => "INITIALIZATION_FAILED",
            PlatformError::WindowNotFound(_) => "WINDOW_NOT_FOUND",
            PlatformError::ScreenNotInitialized => "SCREEN_NOT_INITIALIZED",
            PlatformError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            PlatformError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(error: windows::core::Error) -> Self {
        PlatformError::OperationFailed(format!("{error} ({:?})", error.code()))
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(error: serde_json::Error) -> Self {
        PlatformError::InvalidArguments(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
