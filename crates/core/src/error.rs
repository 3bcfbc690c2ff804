use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjgenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to parse file, downloaded from {url}: {message}")]
    Parse { url: String, message: String },
    #[error("unable to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid kubernetes extension on definition {definition}: {message}")]
    Extension { definition: String, message: String },
    #[error("Template error: {0}")]
    Template(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ObjgenError {
    pub fn parse(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ObjgenError::Parse {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ObjgenError::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ObjgenError>;
