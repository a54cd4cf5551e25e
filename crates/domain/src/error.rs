use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewIdError {
    #[error("review id must be 24 hex characters, got {0}")]
    WrongLength(usize),
    #[error("review id contains non-hex characters")]
    InvalidHex,
    #[error("review id must be a string")]
    NotText,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    // 展示给客户端的文案固定，不泄露具体原因
    #[error("Invalid review ID format.")]
    InvalidId(#[from] ReviewIdError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
