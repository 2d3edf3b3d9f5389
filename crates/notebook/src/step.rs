//! Step descriptors and their registry.

use std::fmt;
use std::str::FromStr;

use registry::{Registry, RegistryBuilder};
use serde::{Deserialize, Serialize};

use crate::{ColorToken, Error, Palette, Result};

/// The kinds of step a notebook query can contain, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Data,
    Join,
    Expression,
    Filter,
    Summarize,
    Aggregate,
    Breakout,
    Sort,
    Limit,
}

impl StepKind {
    pub const ALL: [StepKind; 9] = [
        StepKind::Data,
        StepKind::Join,
        StepKind::Expression,
        StepKind::Filter,
        StepKind::Summarize,
        StepKind::Aggregate,
        StepKind::Breakout,
        StepKind::Sort,
        StepKind::Limit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Data => "data",
            StepKind::Join => "join",
            StepKind::Expression => "expression",
            StepKind::Filter => "filter",
            StepKind::Summarize => "summarize",
            StepKind::Aggregate => "aggregate",
            StepKind::Breakout => "breakout",
            StepKind::Sort => "sort",
            StepKind::Limit => "limit",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StepKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownStep(s.to_string()))
    }
}

/// How a step is presented in the notebook editor.
///
/// Fields are read-only; outside this module only [`StepUiBuilder::build`]
/// creates one, so every descriptor in a registry has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepUi {
    title: String,
    icon: Option<String>,
    priority: i32,
    transparent: bool,
    compact: bool,
    color: ColorToken,
    component: String,
}

impl StepUi {
    pub fn builder(
        title: impl Into<String>,
        component: impl Into<String>,
        color: ColorToken,
    ) -> StepUiBuilder {
        StepUiBuilder {
            ui: StepUi {
                title: title.into(),
                icon: None,
                priority: 0,
                transparent: false,
                compact: false,
                color,
                component: component.into(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Higher priorities sort first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn color(&self) -> ColorToken {
        self.color
    }

    /// Name of the component that renders the step.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Resolve the step's color through the host palette.
    pub fn resolve_color(&self, palette: &impl Palette) -> String {
        palette.color(self.color)
    }
}

/// Builder for [`StepUi`]; optional attributes default to off / zero.
#[derive(Debug, Clone)]
pub struct StepUiBuilder {
    ui: StepUi,
}

impl StepUiBuilder {
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.ui.icon = Some(icon.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.ui.priority = priority;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.ui.transparent = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.ui.compact = true;
        self
    }

    /// Validate and finish the descriptor.
    pub fn build(self) -> Result<StepUi> {
        if self.ui.title.trim().is_empty() {
            return Err(Error::InvalidDescriptor("title must not be empty".into()));
        }
        if self.ui.component.trim().is_empty() {
            return Err(Error::InvalidDescriptor(format!(
                "step '{}' has no component",
                self.ui.title
            )));
        }
        if matches!(&self.ui.icon, Some(icon) if icon.trim().is_empty()) {
            return Err(Error::InvalidDescriptor(format!(
                "step '{}' has an empty icon name",
                self.ui.title
            )));
        }
        Ok(self.ui)
    }
}

pub type StepRegistryBuilder = RegistryBuilder<StepKind, StepUi>;

/// Step descriptors keyed by step kind.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Registry<StepKind, StepUi>,
}

impl StepRegistry {
    /// A builder seeded with the stock descriptors.
    pub fn builder() -> StepRegistryBuilder {
        StepRegistryBuilder::with_defaults(default_steps())
    }

    pub fn get(&self, kind: StepKind) -> Option<&StepUi> {
        self.steps.resolve(&kind)
    }

    /// Kinds ordered by descending priority; equal priorities keep
    /// declaration order.
    pub fn by_priority(&self) -> Vec<(StepKind, &StepUi)> {
        let mut steps: Vec<_> = self.steps.iter().map(|(kind, ui)| (*kind, ui)).collect();
        steps.sort_by_key(|(_, ui)| std::cmp::Reverse(ui.priority));
        steps
    }

    pub fn priority(&self, kind: StepKind) -> i32 {
        self.get(kind).map_or(0, |ui| ui.priority)
    }

    pub fn is_transparent(&self, kind: StepKind) -> bool {
        self.get(kind).is_some_and(|ui| ui.transparent)
    }

    pub fn is_compact(&self, kind: StepKind) -> bool {
        self.get(kind).is_some_and(|ui| ui.compact)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<StepRegistryBuilder> for StepRegistry {
    fn from(builder: StepRegistryBuilder) -> Self {
        Self {
            steps: builder.build(),
        }
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::builder().into()
    }
}

fn default_steps() -> Vec<(StepKind, StepUi)> {
    use ColorToken::*;

    // The stock descriptors are non-empty literals and always validate.
    let stock = |ui: StepUiBuilder| ui.ui;

    vec![
        (StepKind::Data, stock(StepUi::builder("Data", "DataStep", Brand))),
        (
            StepKind::Join,
            stock(
                StepUi::builder("Join data", "JoinStep", Brand)
                    .icon("join_left_outer")
                    .priority(1),
            ),
        ),
        (
            StepKind::Expression,
            stock(
                StepUi::builder("Custom column", "ExpressionStep", BgDark)
                    .icon("add_data")
                    .transparent(),
            ),
        ),
        (
            StepKind::Filter,
            stock(
                StepUi::builder("Filter", "FilterStep", Filter)
                    .icon("filter")
                    .priority(10),
            ),
        ),
        (
            StepKind::Summarize,
            stock(
                StepUi::builder("Summarize", "SummarizeStep", Summarize)
                    .icon("sum")
                    .priority(5),
            ),
        ),
        (
            StepKind::Aggregate,
            stock(
                StepUi::builder("Aggregate", "AggregateStep", Summarize)
                    .icon("sum")
                    .priority(5),
            ),
        ),
        (
            StepKind::Breakout,
            stock(
                StepUi::builder("Breakout", "BreakoutStep", Accent4)
                    .icon("segment")
                    .priority(1),
            ),
        ),
        (
            StepKind::Sort,
            stock(
                StepUi::builder("Sort", "SortStep", BgDark)
                    .icon("smartscalar")
                    .compact()
                    .transparent(),
            ),
        ),
        (
            StepKind::Limit,
            stock(
                StepUi::builder("Row limit", "LimitStep", BgDark)
                    .icon("list")
                    .compact()
                    .transparent(),
            ),
        ),
    ]
}
