//! Licensed capability overrides and startup assembly.
//!
//! [`build_capabilities`] seeds every registry with its defaults, applies
//! the premium [`gates`] against the enabled feature flags, and freezes the
//! result into [`Capabilities`]. It is meant to run once at startup.
//!
//! | flag                   | installs |
//! |------------------------|----------|
//! | `advanced_permissions` | `data-model` / `databases` nav guards, feature-level permissions |
//! | `general_permissions`  | `troubleshooting` nav guard for monitoring access |
//! | `audit_app`            | "Audit" admin nav item |

mod capabilities;
mod error;
mod permissions;

pub use capabilities::{
    ADVANCED_PERMISSIONS, AUDIT_APP, Capabilities, CapabilityBuilder, GENERAL_PERMISSIONS,
    build_capabilities, build_capabilities_with, gates,
};
pub use error::{Error, Result};
pub use permissions::{
    DATA_COLUMNS, FeatureLevelPermissions, PermissionColumn, can_access_data_model,
    can_access_database_management, can_access_monitoring, can_access_settings,
};
