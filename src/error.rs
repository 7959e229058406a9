use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    #[error("Storage error")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal Error")]
    Internal(#[from] anyhow::Error),
}

impl CartError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CartError::NotFound)
    }
}

pub type CartResult<T> = Result<T, CartError>;
