use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrfError {
    #[error("invalid document path '{path}': paths need non-empty dot-separated segments")]
    InvalidPath { path: String },

    #[error("path '{path}' collides with a non-container value at segment '{segment}'")]
    PathCollision { path: String, segment: String },

    #[error("failed to compile pattern for label '{label}': {message}")]
    Pattern { label: String, message: String },
}

pub type Result<T> = std::result::Result<T, CrfError>;
