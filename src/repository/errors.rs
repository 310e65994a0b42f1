use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
    #[error("Not found")]
    NotFound,
}
