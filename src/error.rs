use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Assistant service error: {0}")]
    RemoteService(String),
}
