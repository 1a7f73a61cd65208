use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
}

pub type Result<T> = std::result::Result<T, SignatureError>;
