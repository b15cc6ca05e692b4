//! Skyline packing of a layout onto a column grid.
//!
//! The engine keeps the occupied height of every column. Each widget, in
//! layout order, goes to the left edge where the tallest column under its
//! span is lowest; ties go to the leftmost edge. The result depends only on
//! `(order, sizes, columns)`, so every breakpoint can be recomputed from
//! scratch whenever the layout or the viewport changes.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{BreakpointTable, LayoutModel, SizePreset};
use crate::widgets::{WidgetDefinition, WidgetId, WidgetRegistry};

/// A widget positioned on the grid. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedItem {
    /// Widget id.
    pub id: WidgetId,
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
    /// Smallest width the item may be resized to.
    pub min_w: u16,
    /// Smallest height the item may be resized to.
    pub min_h: u16,
    /// Largest width the item may be resized to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u16>,
    /// Largest height the item may be resized to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u16>,
}

/// Placements for one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakpointLayout {
    /// Breakpoint name.
    pub breakpoint: String,
    /// Column count used.
    pub columns: u16,
    /// One item per known widget, in layout order.
    pub items: Vec<PlacedItem>,
}

/// Resolves a widget's footprint at `columns` and clamps its constraints.
fn footprint(def: &WidgetDefinition, preset: SizePreset, columns: u16) -> (u16, u16, u16, u16) {
    let dims = preset.dims();
    let w = dims.w.min(columns).max(1);
    let h = dims.h.max(def.min_h).max(1);
    let min_w = dims.min_w.max(def.min_w).min(w);
    let min_h = dims.min_h.max(def.min_h).min(h);
    (w, h, min_w, min_h)
}

/// Packs `order` onto a grid of `columns` columns.
///
/// Ids the registry does not know are skipped. Ids missing from `sizes` use
/// the widget's default preset. Widths wider than the grid are clamped to
/// it, and a column count of zero is treated as one, so packing never fails.
///
/// Runs in `O(n · columns)`.
pub fn pack(
    order: &[WidgetId],
    sizes: &BTreeMap<WidgetId, SizePreset>,
    columns: u16,
    registry: &WidgetRegistry,
) -> Vec<PlacedItem> {
    let columns = columns.max(1);
    let mut heights = vec![0u16; usize::from(columns)];
    let mut placed = Vec::with_capacity(order.len());

    for id in order {
        let Some(def) = registry.lookup(id.as_str()) else {
            continue;
        };
        let preset = sizes.get(id).copied().unwrap_or(def.default_preset);
        let (w, h, min_w, min_h) = footprint(def, preset, columns);
        let span = usize::from(w);

        let mut best_x = 0;
        let mut best_y = u16::MAX;
        for x in 0..=(heights.len() - span) {
            let y = heights[x..x + span].iter().copied().max().unwrap_or(0);
            if y < best_y {
                best_x = x;
                best_y = y;
            }
        }

        let bottom = best_y.saturating_add(h);
        heights[best_x..best_x + span].fill(bottom);

        placed.push(PlacedItem {
            id: id.clone(),
            x: best_x as u16,
            y: best_y,
            w,
            h,
            min_w,
            min_h,
            max_w: def.max_w.map(|m| m.max(w).min(columns)),
            max_h: def.max_h.map(|m| m.max(h)),
        });
    }
    placed
}

/// Packs a layout model at `columns`.
pub fn pack_model(model: &LayoutModel, columns: u16, registry: &WidgetRegistry) -> Vec<PlacedItem> {
    pack(&model.order, &model.sizes, columns, registry)
}

/// Packs a layout model once per breakpoint, widest first.
pub fn pack_breakpoints(
    model: &LayoutModel,
    registry: &WidgetRegistry,
    table: &BreakpointTable,
) -> Vec<BreakpointLayout> {
    table
        .iter()
        .map(|bp| BreakpointLayout {
            breakpoint: bp.name.clone(),
            columns: bp.columns,
            items: pack_model(model, bp.columns, registry),
        })
        .collect()
}

/// Rows occupied by a packed layout.
pub fn grid_height(items: &[PlacedItem]) -> u16 {
    items
        .iter()
        .map(|item| item.y.saturating_add(item.h))
        .max()
        .unwrap_or(0)
}
