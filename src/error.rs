use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Please calculate Inflation Value first.")]
    MissingInflationValue,

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FinanceResult<T> = Result<T, FinanceError>;
