//! Menu descriptors and the guard registry that filters them.

use registry::{Guard, Registry, RegistryBuilder};
use serde::{Deserialize, Serialize};

use crate::User;

/// Guard registry keyed by menu item key.
pub type NavGuards = Registry<String, Guard<User>>;

/// A link in the admin navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub key: String,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            key: key.into(),
        }
    }
}

// Contributed items are spliced in after "permissions".
const BEFORE_SPLICE: [(&str, &str, &str); 5] = [
    ("Settings", "/admin/settings", "settings"),
    ("People", "/admin/people", "people"),
    ("Data Model", "/admin/data-model", "data-model"),
    ("Databases", "/admin/databases", "databases"),
    ("Permissions", "/admin/permissions", "permissions"),
];

const AFTER_SPLICE: [(&str, &str, &str); 1] = [(
    "Troubleshooting",
    "/admin/troubleshooting",
    "troubleshooting",
)];

/// Access every user gets regardless of registered guards.
pub fn default_guard(user: &User) -> bool {
    user.is_superuser
}

/// Collects guards and contributed menu items before startup completes.
#[derive(Debug, Default)]
pub struct NavBuilder {
    guards: RegistryBuilder<String, Guard<User>>,
    items: Vec<MenuItem>,
}

impl NavBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the guard for a menu key.
    pub fn guard(
        &mut self,
        origin: &str,
        key: impl Into<String>,
        check: impl Fn(&User) -> bool + Send + Sync + 'static,
    ) -> Option<Guard<User>> {
        self.guards.register_from(origin, key.into(), Guard::new(check))
    }

    /// Contribute an item at the splice point, after previously contributed ones.
    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn build(self) -> Navigation {
        Navigation {
            guards: self.guards.build(),
            contributed: self.items,
        }
    }
}

/// The built admin navigation.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    guards: NavGuards,
    contributed: Vec<MenuItem>,
}

impl Navigation {
    pub fn builder() -> NavBuilder {
        NavBuilder::new()
    }

    pub fn guards(&self) -> &NavGuards {
        &self.guards
    }

    /// Superusers always pass; otherwise the guard for `key` decides, and
    /// a missing guard denies.
    pub fn can_access_menu_item(&self, key: &str, user: &User) -> bool {
        self.guards.resolve_with_fallback(key, default_guard, user)
    }

    /// All menu items in display order, contributed items at the splice point.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let fixed = |items: &[(&str, &str, &str)]| -> Vec<MenuItem> {
            items
                .iter()
                .map(|&(name, path, key)| MenuItem::new(name, path, key))
                .collect()
        };

        let mut items = fixed(&BEFORE_SPLICE[..]);
        items.extend(self.contributed.iter().cloned());
        items.extend(fixed(&AFTER_SPLICE[..]));
        items
    }

    /// The menu items `user` may see, in display order.
    pub fn allowed_menu_items(&self, user: &User) -> Vec<MenuItem> {
        self.menu_items()
            .into_iter()
            .filter(|item| self.can_access_menu_item(&item.key, user))
            .collect()
    }
}
