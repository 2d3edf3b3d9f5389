//! Startup assembly of every capability registry.

use nav::{MenuItem, NavBuilder, Navigation};
use notebook::{StepRegistry, StepRegistryBuilder};
use registry::{CapabilityGate, FeatureSource, Gates};
use tracing::info;

use crate::permissions::{
    FeatureLevelPermissions, can_access_data_model, can_access_database_management,
    can_access_monitoring,
};
use crate::Result;

pub const ADVANCED_PERMISSIONS: &str = "advanced_permissions";
pub const GENERAL_PERMISSIONS: &str = "general_permissions";
pub const AUDIT_APP: &str = "audit_app";

/// Everything gates may modify before startup freezes it.
#[derive(Debug)]
pub struct CapabilityBuilder {
    pub nav: NavBuilder,
    pub feature_level: FeatureLevelPermissions,
    pub steps: StepRegistryBuilder,
}

impl CapabilityBuilder {
    /// A builder holding the base defaults.
    pub fn new() -> Self {
        Self {
            nav: NavBuilder::new(),
            feature_level: FeatureLevelPermissions::default(),
            steps: StepRegistry::builder(),
        }
    }

    pub fn build(self) -> Capabilities {
        Capabilities {
            navigation: self.nav.build(),
            feature_level: self.feature_level,
            steps: self.steps.into(),
        }
    }
}

impl Default for CapabilityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The frozen capability registries shared with consumers.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub navigation: Navigation,
    pub feature_level: FeatureLevelPermissions,
    pub steps: StepRegistry,
}

/// The premium gates, in precedence order (later gates win on shared keys).
pub fn gates() -> Gates<CapabilityBuilder> {
    Gates::new()
        .with(CapabilityGate::new(
            ADVANCED_PERMISSIONS,
            |caps: &mut CapabilityBuilder| {
                caps.nav
                    .guard(ADVANCED_PERMISSIONS, "data-model", can_access_data_model);
                // Must match the menu item key "databases", not the singular
                // "database", or the guard never applies.
                caps.nav
                    .guard(ADVANCED_PERMISSIONS, "databases", can_access_database_management);
                caps.feature_level = FeatureLevelPermissions::advanced();
                Ok(())
            },
        ))
        .with(CapabilityGate::new(
            GENERAL_PERMISSIONS,
            |caps: &mut CapabilityBuilder| {
                caps.nav
                    .guard(GENERAL_PERMISSIONS, "troubleshooting", can_access_monitoring);
                Ok(())
            },
        ))
        .with(CapabilityGate::new(AUDIT_APP, |caps: &mut CapabilityBuilder| {
            caps.nav
                .add_item(MenuItem::new("Audit", "/admin/audit", "audit"));
            Ok(())
        }))
}

/// Build the capabilities for `flags`.
pub fn build_capabilities<F>(flags: &F) -> Result<Capabilities>
where
    F: FeatureSource + ?Sized,
{
    build_capabilities_with(flags, Vec::new())
}

/// Like [`build_capabilities`], also splicing `nav_items` into the admin
/// navigation after any items contributed by gates.
pub fn build_capabilities_with<F>(
    flags: &F,
    nav_items: impl IntoIterator<Item = MenuItem>,
) -> Result<Capabilities>
where
    F: FeatureSource + ?Sized,
{
    let mut builder = CapabilityBuilder::new();
    let applied = gates().apply_all(flags, &mut builder)?;
    for item in nav_items {
        builder.nav.add_item(item);
    }

    info!(features = ?applied, "capabilities built");
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav::User;
    use notebook::StepKind;
    use registry::FeatureSet;

    fn analyst() -> User {
        User {
            can_access_data_model: true,
            ..User::new(2)
        }
    }

    fn keys(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_flag_disabled_denies_data_model() {
        let caps = build_capabilities(&FeatureSet::new()).unwrap();

        assert!(caps.navigation.guards().resolve("data-model").is_none());
        assert!(!caps.navigation.can_access_menu_item("data-model", &analyst()));
        assert!(!caps.feature_level.can_access_data_model.check(&analyst()));
        assert!(caps.feature_level.data_columns.is_empty());
    }

    #[test]
    fn test_flag_enabled_grants_data_model() {
        let flags = FeatureSet::from_iter([ADVANCED_PERMISSIONS]);
        let caps = build_capabilities(&flags).unwrap();

        assert!(caps.navigation.can_access_menu_item("data-model", &analyst()));
        assert!(!caps.navigation.can_access_menu_item("databases", &analyst()));
        assert!(!caps.navigation.can_access_menu_item("data-model", &User::new(3)));
        assert!(caps.feature_level.can_access_data_model.check(&analyst()));
        assert_eq!(keys(&caps.navigation.allowed_menu_items(&analyst())), vec!["data-model"]);
    }

    #[test]
    fn test_database_guard_uses_menu_key() {
        let flags = FeatureSet::from_iter([ADVANCED_PERMISSIONS]);
        let caps = build_capabilities(&flags).unwrap();
        let dba = User {
            can_access_db_management: true,
            ..User::new(5)
        };
        assert_eq!(keys(&caps.navigation.allowed_menu_items(&dba)), vec!["databases"]);
    }

    #[test]
    fn test_general_permissions_monitoring() {
        let monitor = User {
            can_access_monitoring: true,
            ..User::new(6)
        };

        let without = build_capabilities(&FeatureSet::new()).unwrap();
        assert!(!without.navigation.can_access_menu_item("troubleshooting", &monitor));

        let with = build_capabilities(&FeatureSet::from_iter([GENERAL_PERMISSIONS])).unwrap();
        assert!(with.navigation.can_access_menu_item("troubleshooting", &monitor));
        assert!(!with.navigation.can_access_menu_item("settings", &monitor));
    }

    #[test]
    fn test_superuser_sees_spliced_items() {
        let flags = FeatureSet::from_iter([AUDIT_APP]);
        let caps = build_capabilities_with(
            &flags,
            [MenuItem::new("Tools", "/admin/tools", "tools")],
        )
        .unwrap();

        assert_eq!(
            keys(&caps.navigation.allowed_menu_items(&User::superuser(1))),
            vec![
                "settings",
                "people",
                "data-model",
                "databases",
                "permissions",
                "audit",
                "tools",
                "troubleshooting"
            ]
        );
    }

    #[test]
    fn test_steps_keep_defaults() {
        let caps = build_capabilities(&FeatureSet::from_iter([ADVANCED_PERMISSIONS])).unwrap();
        assert_eq!(caps.steps.len(), StepKind::ALL.len());
        assert_eq!(caps.steps.priority(StepKind::Filter), 10);
    }

    #[test]
    fn test_closure_flag_source() {
        let caps = build_capabilities(&|name: &str| name == ADVANCED_PERMISSIONS).unwrap();
        assert!(caps.navigation.can_access_menu_item("data-model", &analyst()));
    }
}
