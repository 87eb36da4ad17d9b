use thiserror::Error;

/// Errors raised when a raw table token does not name a known model value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown relation '{0}' (expected isa or partof)")]
    UnknownRelation(String),
    #[error("unknown entity kind '{0}' (expected family or complex)")]
    UnknownEntityKind(String),
    #[error("unknown prefix category '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
