use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A row limit given as text was not a positive integer.
    #[error("invalid row limit '{0}': expected a positive integer")]
    InvalidLimit(String),

    /// The document has no structured query to carry a limit.
    #[error("cannot change the limit of this query: {0}")]
    LimitNotApplied(&'static str),

    #[error("invalid query JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
