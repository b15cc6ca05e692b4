//! Draws a packed layout into a ratatui [`Buffer`].
//!
//! Each grid unit maps to `cell_w × cell_h` terminal cells. Every placed
//! widget becomes a bordered block titled with its catalog title, and the
//! widget renders its body into the block's inner area. This is the same
//! contract a real dashboard host uses, so the preview doubles as a smoke
//! test of the widget catalog.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph, Widget as _};

use crate::layout::{grid_height, PlacedItem};
use crate::widgets::{ContainerSize, WidgetContext, WidgetRegistry};

/// Terminal area covered by `item`.
pub fn item_area(item: &PlacedItem, cell_w: u16, cell_h: u16) -> Rect {
    Rect::new(
        item.x.saturating_mul(cell_w),
        item.y.saturating_mul(cell_h),
        item.w.saturating_mul(cell_w),
        item.h.saturating_mul(cell_h),
    )
}

/// Renders `items` into a new buffer sized to fit them.
///
/// Ids missing from `registry` are left blank.
pub fn render_grid(
    items: &[PlacedItem],
    registry: &WidgetRegistry,
    context: &WidgetContext<'_>,
    cell_w: u16,
    cell_h: u16,
) -> Buffer {
    let columns = items
        .iter()
        .map(|item| item.x.saturating_add(item.w))
        .max()
        .unwrap_or(0);
    let area = Rect::new(
        0,
        0,
        columns.saturating_mul(cell_w),
        grid_height(items).saturating_mul(cell_h),
    );
    let mut buffer = Buffer::empty(area);

    for item in items {
        let Some(def) = registry.lookup(item.id.as_str()) else {
            continue;
        };
        let Some(widget) = registry.create(def.id) else {
            continue;
        };
        let area = item_area(item, cell_w, cell_h).intersection(buffer.area);
        let block = Block::bordered().title(def.title);
        let inner = block.inner(area);
        block.render(area, &mut buffer);

        let text = widget.render(context, ContainerSize::new(inner.width, inner.height));
        Paragraph::new(text).render(inner, &mut buffer);
    }
    buffer
}
