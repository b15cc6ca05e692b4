//! Row-list cards (recent invoices, top customers, partner activity, tasks).

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};

use super::{fit, ContainerSize, Widget, WidgetContext};

/// A card that lists pre-formatted rows from `context.rows(id)`.
///
/// When there are more rows than fit, the last visible line becomes a
/// `+N more` marker.
#[derive(Debug, Clone)]
pub struct ListWidget {
    id: &'static str,
    empty_label: &'static str,
}

impl ListWidget {
    /// Creates a list card for `id`, showing `empty_label` when no rows exist.
    pub const fn new(id: &'static str, empty_label: &'static str) -> Self {
        Self { id, empty_label }
    }
}

impl Widget for ListWidget {
    fn id(&self) -> &'static str {
        self.id
    }

    fn render(&self, context: &WidgetContext<'_>, size: ContainerSize) -> Text<'static> {
        if size.is_empty() {
            return Text::default();
        }
        let dim = Style::default().add_modifier(Modifier::DIM);

        if context.is_loading() {
            return Text::from(Line::styled(fit("Loading…", size.width), dim));
        }

        let rows = context.rows(self.id);
        if rows.is_empty() {
            return Text::from(Line::styled(fit(self.empty_label, size.width), dim));
        }

        let capacity = usize::from(size.height);
        let mut lines: Vec<Line<'static>> = Vec::with_capacity(capacity);
        if rows.len() <= capacity {
            lines.extend(rows.iter().map(|r| Line::raw(fit(r, size.width))));
        } else {
            let shown = capacity - 1;
            lines.extend(rows[..shown].iter().map(|r| Line::raw(fit(r, size.width))));
            let more = format!("+{} more", rows.len() - shown);
            lines.push(Line::styled(fit(&more, size.width), dim));
        }
        Text::from(lines)
    }
}

/// Factory for the recent invoices list.
pub fn recent_invoices() -> Box<dyn Widget> {
    Box::new(ListWidget::new("recent-invoices", "No invoices yet"))
}

/// Factory for the top customers list.
pub fn top_customers() -> Box<dyn Widget> {
    Box::new(ListWidget::new("top-customers", "No customers yet"))
}

/// Factory for the partner activity feed.
pub fn partner_activity() -> Box<dyn Widget> {
    Box::new(ListWidget::new("partner-activity", "No recent activity"))
}

/// Factory for the task list.
pub fn tasks() -> Box<dyn Widget> {
    Box::new(ListWidget::new("tasks", "Nothing to do"))
}

/// Factory for the quick actions menu.
pub fn quick_actions() -> Box<dyn Widget> {
    Box::new(ListWidget::new("quick-actions", "New invoice · New customer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::DashboardData;

    fn lines_of(text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_rows_fit() {
        let data = DashboardData::default().with_rows("tasks", &["Call ACME", "File VAT"]);
        let text = tasks().render(&data.context(), ContainerSize::new(20, 5));
        assert_eq!(lines_of(&text), vec!["Call ACME", "File VAT"]);
    }

    #[test]
    fn test_overflow_adds_more_marker() {
        let data = DashboardData::default()
            .with_rows("recent-invoices", &["INV-1", "INV-2", "INV-3", "INV-4"]);
        let text = recent_invoices().render(&data.context(), ContainerSize::new(20, 3));
        assert_eq!(lines_of(&text), vec!["INV-1", "INV-2", "+2 more"]);
    }

    #[test]
    fn test_empty_rows_show_label() {
        let data = DashboardData::default();
        let text = top_customers().render(&data.context(), ContainerSize::new(20, 3));
        assert_eq!(lines_of(&text), vec!["No customers yet"]);
    }

    #[test]
    fn test_loading_state() {
        let data = DashboardData::default()
            .with_rows("partner-activity", &["x"])
            .loading();
        let text = partner_activity().render(&data.context(), ContainerSize::new(20, 3));
        assert_eq!(lines_of(&text), vec!["Loading…"]);
    }

    #[test]
    fn test_single_row_capacity_with_overflow() {
        let data = DashboardData::default().with_rows("tasks", &["a", "b"]);
        let text = tasks().render(&data.context(), ContainerSize::new(20, 1));
        assert_eq!(lines_of(&text), vec!["+2 more"]);
    }
}
