use thiserror::Error;

use crate::selection::SelectionError;

#[derive(Error, Debug)]
pub enum PipehandError {
    #[error("Failed to establish AWS session: {0}")]
    Session(String),

    #[error("CodePipeline API error: {0}")]
    Api(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipehandError>;
