use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),
}
