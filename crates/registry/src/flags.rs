//! Feature flags consulted while capabilities are built.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Answers whether a licensed or build-time feature is enabled.
///
/// Queried once per flag while capabilities are built; later changes to the
/// answer are not observed until the capabilities are rebuilt.
pub trait FeatureSource {
    fn has_feature(&self, name: &str) -> bool;
}

impl<F> FeatureSource for F
where
    F: Fn(&str) -> bool,
{
    fn has_feature(&self, name: &str) -> bool {
        self(name)
    }
}

/// A fixed set of enabled feature flags.
///
/// Names are normalized to lowercase with `-` replaced by `_`, so
/// `Advanced-Permissions` and `advanced_permissions` name the same flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSet {
    enabled: BTreeSet<String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, name: &str) {
        self.enabled.insert(normalize(name));
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Enabled flags in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}

impl FeatureSource for FeatureSet {
    fn has_feature(&self, name: &str) -> bool {
        self.enabled.contains(&normalize(name))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.enable(name.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for FeatureSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<FeatureSet> for Vec<String> {
    fn from(set: FeatureSet) -> Self {
        set.enabled.into_iter().collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_normalized() {
        let flags = FeatureSet::from_iter(["Advanced-Permissions"]);
        assert!(flags.has_feature("advanced_permissions"));
        assert!(flags.has_feature("advanced-permissions"));
        assert!(!flags.has_feature("audit_app"));
    }

    #[test]
    fn test_closure_source() {
        let source = |name: &str| name == "sso";
        assert!(source.has_feature("sso"));
        assert!(!source.has_feature("audit_app"));
    }

    #[test]
    fn test_parse_toml_list() {
        #[derive(Deserialize)]
        struct Settings {
            features: FeatureSet,
        }

        let settings: Settings =
            toml::from_str(r#"features = ["advanced_permissions", "audit-app"]"#).unwrap();
        assert_eq!(
            settings.features.iter().collect::<Vec<_>>(),
            vec!["advanced_permissions", "audit_app"]
        );
    }
}
