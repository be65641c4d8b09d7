use crate::seq::SeqError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeqlabError {
    #[error(transparent)]
    Seq(#[from] SeqError),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown binding: {0}")]
    UnknownBinding(String),

    #[error("Binding {name} is {found}, expected {expected}")]
    WrongKind {
        name: String,
        found: &'static str,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SeqlabError>;
