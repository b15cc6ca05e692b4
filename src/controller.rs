//! Dashboard edit-mode state machine.
//!
//! The controller is the only interactive writer of the layout. In VIEW mode
//! every mutation is refused; in EDIT mode mutations go through the
//! [`LayoutStore`], which caches them and schedules the remote save.
//! [`LayoutStore::replace`] is the one administrative write that bypasses
//! the mode check.
//! Placements are always recomputed from the current model, so callers never
//! hold stale coordinates.

use crate::layout::{
    pack_breakpoints, pack_model, BreakpointLayout, BreakpointTable, LayoutModel,
};
use crate::store::{LayoutStore, RemoteLayout};
use crate::widgets::{WidgetDefinition, WidgetId};
use std::collections::HashSet;

/// Whether the dashboard is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Widgets are read-only.
    #[default]
    View,
    /// Drag-reorder, remove and resize are enabled.
    Edit,
}

/// Drag gesture progress reported by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// The user is still dragging; the layout is not committed.
    Moving,
    /// The drag finished; the reported order is committed.
    Stopped,
}

/// Orchestrates edit mode, layout mutations and placement.
#[derive(Debug)]
pub struct DashboardController<R> {
    store: LayoutStore<R>,
    breakpoints: BreakpointTable,
    mode: Mode,
}

impl<R: RemoteLayout> DashboardController<R> {
    /// Creates a controller in VIEW mode.
    pub fn new(store: LayoutStore<R>, breakpoints: BreakpointTable) -> Self {
        Self {
            store,
            breakpoints,
            mode: Mode::View,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &LayoutStore<R> {
        &self.store
    }

    /// The active breakpoint table.
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` in EDIT mode.
    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    /// Snapshot of the current layout.
    pub fn layout(&self) -> LayoutModel {
        self.store.model()
    }

    /// Switches between VIEW and EDIT. Leaving EDIT flushes the pending save.
    pub fn toggle_editing(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::View => Mode::Edit,
            Mode::Edit => {
                self.store.flush_now();
                Mode::View
            }
        };
        tracing::debug!(mode = ?self.mode, "Toggled dashboard mode");
        self.mode
    }

    fn edit(&self, op: &str, f: impl FnOnce(&mut LayoutModel) -> bool) -> bool {
        if !self.is_editing() {
            tracing::debug!(op, "Ignoring layout mutation outside edit mode");
            return false;
        }
        self.store.mutate(f)
    }

    /// Adds `id` at its default preset. No-op for unknown or present ids.
    pub fn add_widget(&self, id: &str) -> bool {
        let Some(def) = self.store.registry().lookup(id) else {
            tracing::debug!(id, "Cannot add unknown widget");
            return false;
        };
        let (id, preset) = (def.id, def.default_preset);
        let registry = self.store.registry();
        self.edit("add", |model| {
            let added = model.push(WidgetId::from(id), preset);
            model.ensure_mandatory(registry) || added
        })
    }

    /// Removes `id`. Non-removable widgets stay.
    pub fn remove_widget(&self, id: &str) -> bool {
        match self.store.registry().lookup(id) {
            Some(def) if !def.removable => {
                tracing::debug!(id, "Refusing to remove mandatory widget");
                return false;
            }
            _ => {}
        }
        self.edit("remove", |model| model.remove(id))
    }

    /// Advances `id` to the next size preset
    /// (`tile → wide → tall → hero → tile`).
    pub fn cycle_size(&self, id: &str) -> bool {
        let Some(def) = self.store.registry().lookup(id) else {
            return false;
        };
        let fallback = def.default_preset;
        self.edit("resize", |model| {
            if !model.contains(id) {
                return false;
            }
            let next = model.preset_of(id).unwrap_or(fallback).next();
            model.sizes.insert(WidgetId::from(id), next);
            true
        })
    }

    /// Commits a new widget order.
    ///
    /// Only ids already in the layout are kept, duplicates are dropped, and
    /// ids the new order omits are appended in their current order.
    pub fn reorder(&self, new_order: &[WidgetId]) -> bool {
        let registry = self.store.registry();
        self.edit("reorder", |model| {
            let mut seen: HashSet<&str> = HashSet::with_capacity(model.order.len());
            let mut order = Vec::with_capacity(model.order.len());
            for id in new_order {
                if model.contains(id.as_str()) && seen.insert(id.as_str()) {
                    order.push(id.clone());
                }
            }
            for id in &model.order {
                if !seen.contains(id.as_str()) {
                    order.push(id.clone());
                }
            }
            let changed = order != model.order;
            model.order = order;
            model.ensure_mandatory(registry) || changed
        })
    }

    /// Feeds a drag event. Only a finished drag reorders.
    pub fn on_drag(&self, phase: DragPhase, order: &[WidgetId]) -> bool {
        match phase {
            DragPhase::Moving => false,
            DragPhase::Stopped => self.reorder(order),
        }
    }

    /// Placements for the breakpoint `viewport_width` selects.
    pub fn placements(&self, viewport_width: u32) -> BreakpointLayout {
        let bp = self.breakpoints.select(viewport_width);
        BreakpointLayout {
            breakpoint: bp.name.clone(),
            columns: bp.columns,
            items: pack_model(&self.layout(), bp.columns, self.store.registry()),
        }
    }

    /// Placements for every breakpoint, widest first.
    pub fn all_placements(&self) -> Vec<BreakpointLayout> {
        pack_breakpoints(&self.layout(), self.store.registry(), &self.breakpoints)
    }

    /// Catalog widgets not currently in the layout.
    pub fn addable_widgets(&self) -> Vec<&WidgetDefinition> {
        let model = self.layout();
        self.store
            .registry()
            .enumerate()
            .iter()
            .filter(|def| !model.contains(def.id))
            .collect()
    }

    /// Stops persistence activity for this session.
    pub fn teardown(&self) {
        self.store.teardown();
    }
}
