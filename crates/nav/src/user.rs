use serde::{Deserialize, Serialize};

/// The signed-in user as seen by the admin navigation.
///
/// Permission fields missing from the input default to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub is_superuser: bool,
    pub can_access_data_model: bool,
    pub can_access_db_management: bool,
    pub can_access_settings: bool,
    pub can_access_monitoring: bool,
}

impl User {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn superuser(id: u64) -> Self {
        Self {
            id,
            is_superuser: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_permissions_default_to_false() {
        let user: User = serde_json::from_str(r#"{"id": 7, "can_access_data_model": true}"#).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.can_access_data_model);
        assert!(!user.is_superuser);
        assert!(!user.can_access_monitoring);
    }
}
