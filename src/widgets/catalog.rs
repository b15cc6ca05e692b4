//! The built-in widget catalog.
//!
//! Ids are stable: they are persisted in stored layouts, so renaming one
//! silently drops it from every user's dashboard on the next load.

use super::{chart, kpi, list, WidgetDefinition};
use crate::layout::SizePreset;

/// Every widget the dashboard knows about, in catalog order.
pub const BUILTIN: &[WidgetDefinition] = &[
    WidgetDefinition::new("revenue-kpi", "Revenue", SizePreset::Tile, kpi::revenue).fixed(),
    WidgetDefinition::new("orders-kpi", "Open orders", SizePreset::Tile, kpi::orders),
    WidgetDefinition::new("cash-balance", "Cash balance", SizePreset::Tile, kpi::cash_balance),
    WidgetDefinition::new("sales-chart", "Sales", SizePreset::Wide, chart::sales).min_size(4, 2),
    WidgetDefinition::new(
        "recent-invoices",
        "Recent invoices",
        SizePreset::Tall,
        list::recent_invoices,
    )
    .min_size(3, 3),
    WidgetDefinition::new(
        "top-customers",
        "Top customers",
        SizePreset::Tall,
        list::top_customers,
    ),
    WidgetDefinition::new(
        "partner-activity",
        "Partner activity",
        SizePreset::Wide,
        list::partner_activity,
    ),
    WidgetDefinition::new("tasks", "Tasks", SizePreset::Tile, list::tasks).max_size(6, 6),
    WidgetDefinition::new(
        "quick-actions",
        "Quick actions",
        SizePreset::Tile,
        list::quick_actions,
    )
    .fixed()
    .max_size(6, 2),
];

/// Widgets shown to a user who has never customized the dashboard.
pub const DEFAULT_ORDER: &[&str] = &[
    "revenue-kpi",
    "orders-kpi",
    "cash-balance",
    "quick-actions",
    "sales-chart",
    "recent-invoices",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_ids_are_cataloged() {
        for id in DEFAULT_ORDER {
            assert!(
                BUILTIN.iter().any(|d| d.id == *id),
                "default order references unknown '{id}'"
            );
        }
    }

    #[test]
    fn test_every_mandatory_widget_is_in_default_order() {
        for def in BUILTIN.iter().filter(|d| !d.removable) {
            assert!(
                DEFAULT_ORDER.contains(&def.id),
                "mandatory '{}' should be placed explicitly",
                def.id
            );
        }
    }

    #[test]
    fn test_max_size_never_below_default_preset_height() {
        for def in BUILTIN {
            if let Some(max_h) = def.max_h {
                assert!(max_h >= def.default_preset.dims().h, "{}", def.id);
            }
        }
    }
}
