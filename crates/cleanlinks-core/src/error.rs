use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanLinksError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Delivery failed ({op}): {reason}")]
    Delivery { op: &'static str, reason: String },
}

impl CleanLinksError {
    /// Short error code string used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            CleanLinksError::Config(_) => "CONFIG_ERROR",
            CleanLinksError::Io(_) => "IO_ERROR",
            CleanLinksError::Serialization(_) => "SERIALIZATION_ERROR",
            CleanLinksError::Delivery { .. } => "DELIVERY_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanLinksError>;
