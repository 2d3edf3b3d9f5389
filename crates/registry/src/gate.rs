//! Flag-conditioned installation of capability overrides.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::{FeatureSource, Result};

type Install<T> = Box<dyn Fn(&mut T) -> Result<()> + Send + Sync>;

/// Installs optional implementations into `T` when a feature flag is enabled.
pub struct CapabilityGate<T> {
    flag: String,
    install: Install<T>,
}

impl<T> CapabilityGate<T> {
    pub fn new(
        flag: impl Into<String>,
        install: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            flag: flag.into(),
            install: Box::new(install),
        }
    }

    /// The flag this gate is conditioned on.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Run the installer if `flags` enables this gate's flag.
    ///
    /// Returns whether the installer ran.
    pub fn apply<F>(&self, flags: &F, target: &mut T) -> Result<bool>
    where
        F: FeatureSource + ?Sized,
    {
        let enabled = flags.has_feature(&self.flag);
        self.install_if(enabled, target)?;
        Ok(enabled)
    }

    fn install_if(&self, enabled: bool, target: &mut T) -> Result<()> {
        if enabled {
            info!(flag = %self.flag, "installing capability overrides");
            (self.install)(target)
        } else {
            debug!(flag = %self.flag, "feature disabled, keeping defaults");
            Ok(())
        }
    }
}

impl<T> fmt::Debug for CapabilityGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityGate")
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}

/// An ordered set of gates over the same target.
///
/// Gates are applied in the order they were added, so when two gates
/// register the same key the later gate wins.
#[derive(Debug)]
pub struct Gates<T> {
    gates: Vec<CapabilityGate<T>>,
}

impl<T> Default for Gates<T> {
    fn default() -> Self {
        Self { gates: Vec::new() }
    }
}

impl<T> Gates<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a gate.
    pub fn with(mut self, gate: CapabilityGate<T>) -> Self {
        self.gates.push(gate);
        self
    }

    /// Flags of every gate, in application order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.gates.iter().map(CapabilityGate::flag)
    }

    /// Apply every gate in order, returning the flags whose installers ran.
    ///
    /// Each distinct flag is queried once, even when several gates share it.
    pub fn apply_all<F>(&self, flags: &F, target: &mut T) -> Result<Vec<String>>
    where
        F: FeatureSource + ?Sized,
    {
        let mut answers: BTreeMap<&str, bool> = BTreeMap::new();
        let mut applied = Vec::new();

        for gate in &self.gates {
            let enabled = *answers
                .entry(gate.flag())
                .or_insert_with(|| flags.has_feature(gate.flag()));
            gate.install_if(enabled, target)?;
            if enabled {
                applied.push(gate.flag.clone());
            }
        }

        Ok(applied)
    }
}
