//! Registry error types.

use thiserror::Error;

/// Registry errors.
///
/// Lookups never fail; only strict registration does. This enum is marked
/// `#[non_exhaustive]` to allow adding new variants in future versions
/// without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A key was registered twice through [`RegistryBuilder::register_unique`].
    ///
    /// [`RegistryBuilder::register_unique`]: crate::RegistryBuilder::register_unique
    #[error("capability '{key}' already registered by {existing}, refusing registration from {incoming}")]
    Conflict {
        key: String,
        existing: String,
        incoming: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
