use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] registry::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
