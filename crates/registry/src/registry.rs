//! Keyed extension-point storage.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry as MapEntry;
use std::fmt;

use tracing::debug;

use crate::{Error, Guard, Result};

const BASE_ORIGIN: &str = "base";

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    origin: Option<String>,
}

/// Mutable registration phase of a registry.
///
/// Entries are inserted or overwritten (last writer wins) until
/// [`build`](Self::build) freezes them into a [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder<K, V> {
    entries: BTreeMap<K, Entry<V>>,
}

impl<K: Ord, V> Default for RegistryBuilder<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + fmt::Display, V> RegistryBuilder<K, V> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with base defaults.
    pub fn with_defaults(defaults: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut builder = Self::new();
        builder.extend(defaults);
        builder
    }

    /// Insert or overwrite the entry for `key`, returning the previous value.
    pub fn register(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value, None)
    }

    /// Like [`register`](Self::register), recording which module installed the entry.
    pub fn register_from(&mut self, origin: &str, key: K, value: V) -> Option<V> {
        self.insert(key, value, Some(origin.to_string()))
    }

    /// Insert an entry that must not already exist.
    pub fn register_unique(&mut self, origin: &str, key: K, value: V) -> Result<()> {
        match self.entries.entry(key) {
            MapEntry::Occupied(existing) => Err(Error::Conflict {
                key: existing.key().to_string(),
                existing: existing
                    .get()
                    .origin
                    .clone()
                    .unwrap_or_else(|| BASE_ORIGIN.to_string()),
                incoming: origin.to_string(),
            }),
            MapEntry::Vacant(slot) => {
                debug!(key = %slot.key(), origin, "registered capability");
                slot.insert(Entry {
                    value,
                    origin: Some(origin.to_string()),
                });
                Ok(())
            }
        }
    }

    /// Register every pair, in iteration order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (K, V)>) {
        for (key, value) in entries {
            self.register(key, value);
        }
    }

    /// Freeze the registrations.
    pub fn build(self) -> Registry<K, V> {
        Registry {
            entries: self
                .entries
                .into_iter()
                .map(|(key, entry)| (key, entry.value))
                .collect(),
        }
    }

    fn insert(&mut self, key: K, value: V, origin: Option<String>) -> Option<V> {
        let label = origin.as_deref().unwrap_or(BASE_ORIGIN);
        match self.entries.entry(key) {
            MapEntry::Occupied(mut existing) => {
                let previous_origin = existing.get().origin.as_deref().unwrap_or(BASE_ORIGIN);
                debug!(
                    key = %existing.key(),
                    previous = previous_origin,
                    origin = label,
                    "overwrote capability"
                );
                let previous = std::mem::replace(existing.get_mut(), Entry { value, origin });
                Some(previous.value)
            }
            MapEntry::Vacant(slot) => {
                debug!(key = %slot.key(), origin = label, "registered capability");
                slot.insert(Entry { value, origin });
                None
            }
        }
    }
}

/// An immutable key → implementation mapping.
///
/// Absence of a key is not an error; callers choose the fallback.
#[derive(Debug, Clone)]
pub struct Registry<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Registry<K, V> {
    /// Look up the implementation registered for `key`.
    pub fn resolve<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord, S: ?Sized> Registry<K, Guard<S>> {
    /// Evaluate `fallback(subject)`, and only if it denies, the guard
    /// registered under `key`. Unregistered keys deny.
    pub fn resolve_with_fallback<Q>(
        &self,
        key: &Q,
        fallback: impl FnOnce(&S) -> bool,
        subject: &S,
    ) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        fallback(subject) || self.resolve(key).is_some_and(|guard| guard.check(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct User {
        is_superuser: bool,
        can_access_data_model: bool,
    }

    fn superuser(user: &User) -> bool {
        user.is_superuser
    }

    const ANALYST: User = User {
        is_superuser: false,
        can_access_data_model: true,
    };

    const ADMIN: User = User {
        is_superuser: true,
        can_access_data_model: false,
    };

    #[test]
    fn test_resolve_unregistered_is_none() {
        let registry: Registry<String, u32> = RegistryBuilder::new().build();
        assert!(registry.resolve("missing").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut builder = RegistryBuilder::new();
        assert_eq!(builder.register("color".to_string(), 1), None);
        assert_eq!(builder.register_from("premium", "color".to_string(), 2), Some(1));

        let registry = builder.build();
        assert_eq!(registry.resolve("color"), Some(&2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_with_defaults_iterates_in_key_order() {
        let registry = RegistryBuilder::with_defaults([("b".to_string(), 2), ("a".to_string(), 1)])
            .build();
        assert_eq!(registry.resolve("z").copied().unwrap_or(0), 0);
        assert_eq!(
            registry.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
            vec![("a", 1), ("b", 2)]
        );
    }

    #[test]
    fn test_register_unique_rejects_second_writer() {
        let mut builder = RegistryBuilder::new();
        builder.register_unique("feature_a", "database".to_string(), 1).unwrap();
        let err = builder
            .register_unique("feature_b", "database".to_string(), 2)
            .unwrap_err();

        match err {
            Error::Conflict {
                key,
                existing,
                incoming,
            } => {
                assert_eq!(key, "database");
                assert_eq!(existing, "feature_a");
                assert_eq!(incoming, "feature_b");
            }
        }
        assert_eq!(builder.build().resolve("database"), Some(&1));
    }

    #[test]
    fn test_register_unique_over_default_names_base() {
        let mut builder = RegistryBuilder::with_defaults([("settings".to_string(), 1)]);
        let err = builder
            .register_unique("premium", "settings".to_string(), 2)
            .unwrap_err();
        assert!(err.to_string().contains("base"));
    }

    #[test]
    fn test_superuser_always_allowed() {
        let registry: Registry<String, Guard<User>> = RegistryBuilder::with_defaults([(
            "settings".to_string(),
            Guard::deny_all(),
        )])
        .build();

        for key in ["settings", "people", "anything"] {
            assert!(registry.resolve_with_fallback(key, superuser, &ADMIN));
        }
    }

    #[test]
    fn test_unregistered_key_denies_non_superuser() {
        let registry: Registry<String, Guard<User>> = RegistryBuilder::new().build();
        assert!(!registry.resolve_with_fallback("data-model", superuser, &ANALYST));
    }

    #[test]
    fn test_registered_guard_grants_access() {
        let mut builder = RegistryBuilder::new();
        builder.register(
            "data-model".to_string(),
            Guard::new(|u: &User| u.can_access_data_model),
        );
        let registry = builder.build();

        assert!(registry.resolve_with_fallback("data-model", superuser, &ANALYST));
        assert!(!registry.resolve_with_fallback("databases", superuser, &ANALYST));
    }

    #[test]
    fn test_fallback_short_circuits() {
        static GUARD_CALLS: AtomicUsize = AtomicUsize::new(0);

        let mut builder = RegistryBuilder::new();
        builder.register(
            "settings".to_string(),
            Guard::new(|_: &User| {
                GUARD_CALLS.fetch_add(1, Ordering::SeqCst);
                false
            }),
        );
        let registry = builder.build();

        assert!(registry.resolve_with_fallback("settings", superuser, &ADMIN));
        assert_eq!(GUARD_CALLS.load(Ordering::SeqCst), 0);

        assert!(!registry.resolve_with_fallback("settings", superuser, &ANALYST));
        assert_eq!(GUARD_CALLS.load(Ordering::SeqCst), 1);
    }
}
