use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("tag resolution failed: {0}")]
    TagResolution(String),
    #[error("no prior stable tag: {0}")]
    NoPriorTag(String),
    // Surfaced as-is: the message already names the failing git invocation.
    #[error("{0}")]
    CommandExecution(String),
    #[error("output error: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
