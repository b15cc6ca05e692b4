//! Viewport-width thresholds and their column counts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A named viewport-width threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Short name (`lg`, `md`, ...).
    pub name: String,
    /// Smallest viewport width, in pixels, that selects this breakpoint.
    pub min_width: u32,
    /// Grid column count at this breakpoint.
    pub columns: u16,
}

impl Breakpoint {
    /// Creates a breakpoint.
    pub fn new(name: &str, min_width: u32, columns: u16) -> Self {
        Self {
            name: name.to_string(),
            min_width,
            columns,
        }
    }
}

/// Errors in a breakpoint table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakpointError {
    /// No breakpoints configured.
    #[error("at least one breakpoint is required")]
    Empty,

    /// A breakpoint has zero columns.
    #[error("breakpoint '{0}' must have at least one column")]
    ZeroColumns(String),

    /// Two breakpoints share a name.
    #[error("duplicate breakpoint name '{0}'")]
    DuplicateName(String),

    /// Two breakpoints share a threshold, so one could never be selected.
    #[error("breakpoints '{0}' and '{1}' share the same min_width")]
    DuplicateWidth(String, String),
}

/// Breakpoints sorted widest first.
///
/// The narrowest breakpoint also catches viewports below its own threshold,
/// so every width selects exactly one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Validates and sorts a set of breakpoints.
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Result<Self, BreakpointError> {
        if breakpoints.is_empty() {
            return Err(BreakpointError::Empty);
        }
        let mut names = HashSet::new();
        for bp in &breakpoints {
            if bp.columns == 0 {
                return Err(BreakpointError::ZeroColumns(bp.name.clone()));
            }
            if !names.insert(bp.name.as_str()) {
                return Err(BreakpointError::DuplicateName(bp.name.clone()));
            }
        }
        breakpoints.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        if let Some(pair) = breakpoints
            .windows(2)
            .find(|pair| pair[0].min_width == pair[1].min_width)
        {
            return Err(BreakpointError::DuplicateWidth(
                pair[0].name.clone(),
                pair[1].name.clone(),
            ));
        }
        Ok(Self { breakpoints })
    }

    /// The breakpoint a viewport of `width` pixels falls into.
    pub fn select(&self, width: u32) -> &Breakpoint {
        self.breakpoints
            .iter()
            .find(|bp| width >= bp.min_width)
            .unwrap_or_else(|| &self.breakpoints[self.breakpoints.len() - 1])
    }

    /// Looks up a breakpoint by name.
    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.name == name)
    }

    /// Iterates widest first.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Always `false`; a table holds at least one breakpoint.
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }
}

impl Default for BreakpointTable {
    /// lg ≥1200→12, md ≥996→10, sm ≥768→6, xs ≥480→4, xxs→2.
    fn default() -> Self {
        Self {
            breakpoints: vec![
                Breakpoint::new("lg", 1200, 12),
                Breakpoint::new("md", 996, 10),
                Breakpoint::new("sm", 768, 6),
                Breakpoint::new("xs", 480, 4),
                Breakpoint::new("xxs", 0, 2),
            ],
        }
    }
}
