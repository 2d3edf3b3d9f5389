//! Feature-level permission checks.

use nav::User;
use registry::Guard;
use serde::Serialize;

pub fn can_access_settings(user: &User) -> bool {
    user.can_access_settings
}

pub fn can_access_data_model(user: &User) -> bool {
    user.can_access_data_model
}

pub fn can_access_database_management(user: &User) -> bool {
    user.can_access_db_management
}

pub fn can_access_monitoring(user: &User) -> bool {
    user.can_access_monitoring
}

/// A column of the data permissions editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionColumn {
    pub key: &'static str,
    pub name: &'static str,
}

/// Columns added to the data permissions editor under advanced permissions.
pub const DATA_COLUMNS: [PermissionColumn; 3] = [
    PermissionColumn {
        key: "download",
        name: "Download results",
    },
    PermissionColumn {
        key: "data-model",
        name: "Manage table metadata",
    },
    PermissionColumn {
        key: "details",
        name: "Manage database",
    },
];

/// Feature-level permission hooks. Without a license every check denies
/// and no extra columns are shown.
#[derive(Debug, Clone)]
pub struct FeatureLevelPermissions {
    pub can_access_settings: Guard<User>,
    pub can_access_data_model: Guard<User>,
    pub can_access_database_management: Guard<User>,
    pub data_columns: Vec<PermissionColumn>,
}

impl Default for FeatureLevelPermissions {
    fn default() -> Self {
        Self {
            can_access_settings: Guard::deny_all(),
            can_access_data_model: Guard::deny_all(),
            can_access_database_management: Guard::deny_all(),
            data_columns: Vec::new(),
        }
    }
}

impl FeatureLevelPermissions {
    /// The licensed implementation.
    pub fn advanced() -> Self {
        Self {
            can_access_settings: Guard::new(can_access_settings),
            can_access_data_model: Guard::new(can_access_data_model),
            can_access_database_management: Guard::new(can_access_database_management),
            data_columns: DATA_COLUMNS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> User {
        User {
            can_access_settings: true,
            can_access_db_management: true,
            ..User::new(4)
        }
    }

    #[test]
    fn test_default_denies() {
        let plugin = FeatureLevelPermissions::default();
        assert!(!plugin.can_access_settings.check(&manager()));
        assert!(!plugin.can_access_database_management.check(&manager()));
        assert!(plugin.data_columns.is_empty());
    }

    #[test]
    fn test_advanced_reads_user_permissions() {
        let plugin = FeatureLevelPermissions::advanced();
        assert!(plugin.can_access_settings.check(&manager()));
        assert!(plugin.can_access_database_management.check(&manager()));
        assert!(!plugin.can_access_data_model.check(&manager()));
        assert_eq!(plugin.data_columns.len(), 3);
    }
}
