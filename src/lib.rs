//! Widget layout engine for a responsive business dashboard.
//!
//! Users compose a personal dashboard from interchangeable widgets (KPIs,
//! charts, lists). This crate turns their saved layout, an ordered widget
//! list with a size preset per widget, into gap-free grid placements for
//! any column count, and keeps that layout in sync between a local cache
//! and a remote store.
//!
//! - [`widgets`]: the closed widget catalog and the render contract.
//! - [`layout`]: layout model, schema healing, breakpoints, packing.
//! - [`store`]: local cache plus debounced remote sync.
//! - [`controller`]: VIEW/EDIT state machine driving mutations.
//! - [`config`], [`logging`], [`preview`]: ambient support for the binary.
//!
//! ```
//! use dashboard_layout::layout::pack_model;
//! use dashboard_layout::widgets::WidgetRegistry;
//!
//! let registry = WidgetRegistry::builtin();
//! let model = registry.default_layout();
//! let items = pack_model(&model, 12, &registry);
//! assert_eq!(items.len(), model.len());
//! assert!(items.iter().all(|item| item.x + item.w <= 12));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod layout;
pub mod logging;
pub mod preview;
pub mod store;
pub mod widgets;

pub use controller::{DashboardController, DragPhase, Mode};
pub use layout::{LayoutModel, PlacedItem, SizePreset, SCHEMA_VERSION};
pub use store::{LayoutCache, LayoutStore, RemoteLayout};
pub use widgets::{WidgetId, WidgetRegistry};
