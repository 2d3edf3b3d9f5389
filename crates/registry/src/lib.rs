//! Capability-gated registries.
//!
//! A base module seeds a [`RegistryBuilder`] with defaults, optional feature
//! modules install overrides through [`CapabilityGate`]s when a flag is
//! enabled, and startup freezes the result into an immutable [`Registry`]
//! that consumers read at decision time.
//!
//! # Example
//!
//! ```
//! use registry::{CapabilityGate, FeatureSet, Gates, Guard, RegistryBuilder};
//!
//! struct User {
//!     is_superuser: bool,
//!     can_access_data_model: bool,
//! }
//!
//! let gates = Gates::new().with(CapabilityGate::new(
//!     "advanced_permissions",
//!     |guards: &mut RegistryBuilder<String, Guard<User>>| {
//!         guards.register(
//!             "data-model".to_string(),
//!             Guard::new(|u: &User| u.can_access_data_model),
//!         );
//!         Ok(())
//!     },
//! ));
//!
//! let flags = FeatureSet::from_iter(["advanced_permissions"]);
//! let mut builder = RegistryBuilder::new();
//! gates.apply_all(&flags, &mut builder)?;
//! let guards = builder.build();
//!
//! let analyst = User { is_superuser: false, can_access_data_model: true };
//! assert!(guards.resolve_with_fallback("data-model", |u: &User| u.is_superuser, &analyst));
//! assert!(!guards.resolve_with_fallback("people", |u: &User| u.is_superuser, &analyst));
//! # Ok::<(), registry::Error>(())
//! ```

mod error;
mod flags;
mod gate;
mod guard;
mod registry;

pub use error::{Error, Result};
pub use flags::{FeatureSet, FeatureSource};
pub use gate::{CapabilityGate, Gates};
pub use guard::Guard;
pub use registry::{Registry, RegistryBuilder};
