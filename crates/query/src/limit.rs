use serde_json::Value;

use crate::{Error, Result};

/// A row limit as reported by the query library.
///
/// Usually a number or `null`, but the library makes no promise.
pub type Limit = Value;

/// The limit accessors of an external query library.
pub trait LimitOps {
    type Query;

    fn current_limit(&self, query: &Self::Query) -> Limit;

    /// Return `query` with its limit replaced; `null` clears it.
    fn limit(&self, query: Self::Query, limit: Limit) -> Self::Query;
}

pub fn current_limit<L: LimitOps>(lib: &L, query: &L::Query) -> Limit {
    lib.current_limit(query)
}

pub fn limit<L: LimitOps>(lib: &L, query: L::Query, value: Limit) -> L::Query {
    lib.limit(query, value)
}

/// True iff the current limit is a number strictly greater than zero.
pub fn has_limit<L: LimitOps>(lib: &L, query: &L::Query) -> bool {
    lib.current_limit(query)
        .as_f64()
        .is_some_and(|n| n > 0.0)
}

/// Parse a user-supplied row limit.
pub fn parse_limit(input: &str) -> Result<Limit> {
    match input.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Value::from(n)),
        _ => Err(Error::InvalidLimit(input.to_string())),
    }
}
