//! Row-limit helpers over an external query library.
//!
//! The query library owns query structure; this crate only forwards the
//! limit accessors through [`LimitOps`] and derives [`has_limit`].
//! [`MbqlQuery`] implements the accessors for MBQL-style JSON queries.

mod error;
mod limit;
mod mbql;

pub use error::{Error, Result};
pub use limit::{Limit, LimitOps, current_limit, has_limit, limit, parse_limit};
pub use mbql::{Mbql, MbqlQuery};
