//! Widget catalog for the dashboard.
//!
//! This module defines the `Widget` render contract, the `WidgetDefinition`
//! metadata every card carries, and the `WidgetRegistry` that is the single
//! source of truth for default presets and removability.
//!
//! # Architecture
//!
//! Widgets are interchangeable dashboard cards. The layout engine only needs
//! their metadata (default preset, size constraints, removability); the
//! rendering collaborator instantiates each card through the definition's
//! factory and hands it a [`WidgetContext`] plus the measured container size.
//! The engine never looks at what a widget draws.
//!
//! # Example
//!
//! ```
//! use dashboard_layout::widgets::{ContainerSize, DashboardData, WidgetRegistry};
//!
//! let registry = WidgetRegistry::builtin();
//! let def = registry.lookup("revenue-kpi").expect("revenue-kpi is built in");
//! assert!(!def.removable);
//!
//! let data = DashboardData::default();
//! let widget = registry.create("revenue-kpi").expect("factory exists");
//! let text = widget.render(&data.context(), ContainerSize::new(20, 4));
//! assert!(!text.lines.is_empty());
//! ```

pub mod catalog;
pub mod chart;
pub mod context;
pub mod kpi;
pub mod list;

pub use context::{ContainerSize, DashboardData, WidgetContext};

use crate::layout::{LayoutModel, SizePreset};
use ratatui::text::Text;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Opaque widget key, drawn from the registry's closed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wraps a raw id. No catalog check happens here; normalization and the
    /// registry decide whether the id is known.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Render contract shared by every dashboard card.
///
/// Widgets must be thread-safe (`Send + Sync`) so a registry can be shared
/// behind an `Arc` across async tasks.
pub trait Widget: Send + Sync {
    /// Unique identifier for this widget, matching its catalog entry.
    fn id(&self) -> &'static str;

    /// Render the widget body for a container of the given measured size.
    ///
    /// # Arguments
    ///
    /// * `context` - Read-only shared data owned by external collaborators.
    /// * `size` - Inner size of the card, in terminal cells.
    fn render(&self, context: &WidgetContext<'_>, size: ContainerSize) -> Text<'static>;
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Immutable catalog entry for one widget.
#[derive(Debug, Clone, Copy)]
pub struct WidgetDefinition {
    /// Catalog key.
    pub id: &'static str,
    /// Human-readable card title.
    pub title: &'static str,
    /// Preset used when the widget is added or its stored preset is invalid.
    pub default_preset: SizePreset,
    /// Widget-specific minimum width in grid columns.
    pub min_w: u16,
    /// Widget-specific minimum height in grid rows.
    pub min_h: u16,
    /// Widget-specific maximum width, if any.
    pub max_w: Option<u16>,
    /// Widget-specific maximum height, if any.
    pub max_h: Option<u16>,
    /// Whether the user may remove this widget from the layout.
    pub removable: bool,
    /// Creates the widget renderer.
    pub factory: WidgetFactory,
}

impl WidgetDefinition {
    /// Creates a removable definition with no extra size constraints.
    pub const fn new(
        id: &'static str,
        title: &'static str,
        default_preset: SizePreset,
        factory: WidgetFactory,
    ) -> Self {
        Self {
            id,
            title,
            default_preset,
            min_w: 1,
            min_h: 1,
            max_w: None,
            max_h: None,
            removable: true,
            factory,
        }
    }

    /// Marks the widget as mandatory.
    pub const fn fixed(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Sets the widget-specific minimum size.
    pub const fn min_size(mut self, w: u16, h: u16) -> Self {
        self.min_w = w;
        self.min_h = h;
        self
    }

    /// Sets the widget-specific maximum size.
    pub const fn max_size(mut self, w: u16, h: u16) -> Self {
        self.max_w = Some(w);
        self.max_h = Some(h);
        self
    }
}

/// Errors raised while assembling a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two definitions share an id.
    #[error("Duplicate widget id in catalog: {0}")]
    DuplicateId(&'static str),

    /// The default order names an id with no definition.
    #[error("Default layout references unknown widget: {0}")]
    UnknownDefault(&'static str),
}

/// Closed catalog of widget definitions.
///
/// Lookups are O(1) by id; [`enumerate`](WidgetRegistry::enumerate) keeps
/// catalog order, which is also the order mandatory widgets are appended in.
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    definitions: Vec<WidgetDefinition>,
    index: HashMap<&'static str, usize>,
    default_order: Vec<&'static str>,
}

impl WidgetRegistry {
    /// Builds a registry from definitions and the default widget order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if two definitions collide and
    /// [`RegistryError::UnknownDefault`] if `default_order` names an id that
    /// is not defined.
    pub fn new(
        definitions: Vec<WidgetDefinition>,
        default_order: &[&'static str],
    ) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(RegistryError::DuplicateId(def.id));
            }
        }
        if let Some(unknown) = default_order.iter().find(|id| !index.contains_key(*id)) {
            return Err(RegistryError::UnknownDefault(*unknown));
        }
        Ok(Self {
            definitions,
            index,
            default_order: default_order.to_vec(),
        })
    }

    /// The built-in business catalog.
    pub fn builtin() -> Self {
        Self::new(catalog::BUILTIN.to_vec(), catalog::DEFAULT_ORDER)
            .expect("built-in widget catalog is consistent")
    }

    /// Looks up a definition by id.
    pub fn lookup(&self, id: &str) -> Option<&WidgetDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    /// All definitions, in catalog order.
    pub fn enumerate(&self) -> &[WidgetDefinition] {
        &self.definitions
    }

    /// Returns `true` if the id is in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Ids of non-removable widgets, in catalog order.
    pub fn mandatory_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions
            .iter()
            .filter(|d| !d.removable)
            .map(|d| d.id)
    }

    /// Instantiates the renderer for `id`.
    ///
    /// Returns `None` if the id is not in the catalog.
    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.lookup(id).map(|def| (def.factory)())
    }

    /// The layout a user starts with: the default order, mandatory widgets
    /// appended, every widget at its default preset.
    pub fn default_layout(&self) -> LayoutModel {
        let mut model = LayoutModel::empty();
        for id in &self.default_order {
            if let Some(def) = self.lookup(id) {
                model.push(WidgetId::from(def.id), def.default_preset);
            }
        }
        model.ensure_mandatory(self);
        model
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Truncates `text` to `width` characters, marking the cut with `…`.
pub(crate) fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
