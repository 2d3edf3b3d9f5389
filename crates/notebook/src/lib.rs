//! UI metadata for the notebook query builder's steps.
//!
//! Each [`StepKind`] maps to a [`StepUi`] descriptor (title, icon, ordering
//! priority, visual style, color and rendering component). The defaults live
//! in [`StepRegistry::builder`]; feature modules may overwrite descriptors
//! before the registry is built.

mod color;
mod error;
mod step;

pub use color::{ColorToken, DefaultPalette, Palette};
pub use error::{Error, Result};
pub use step::{StepKind, StepRegistry, StepRegistryBuilder, StepUi, StepUiBuilder};
