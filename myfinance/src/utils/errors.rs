use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Domain error: {0}")]
    DomainError(String),
    #[error("Shape error: expected length {expected}, found {found}")]
    ShapeError { expected: usize, found: usize },
    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<FinanceError> for String {
    fn from(e: FinanceError) -> Self {
        e.to_string()
    }
}
