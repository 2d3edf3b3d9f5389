//! Access predicates stored in guard registries.

use std::fmt;
use std::sync::Arc;

/// A shareable predicate deciding access to a named resource.
pub struct Guard<S: ?Sized> {
    check: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: ?Sized> Guard<S> {
    pub fn new(check: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Self {
            check: Arc::new(check),
        }
    }

    pub fn allow_all() -> Self {
        Self::new(|_| true)
    }

    pub fn deny_all() -> Self {
        Self::new(|_| false)
    }

    pub fn check(&self, subject: &S) -> bool {
        (self.check)(subject)
    }
}

impl<S: ?Sized> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
