use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown rule: {0}")]
    UnknownRule(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
