//! Headline number card (revenue, open orders, cash balance).

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::{fit, ContainerSize, Widget, WidgetContext};

/// Placeholder shown when the collaborator has no value for the card.
const NO_VALUE: &str = "—";

/// A single-figure KPI card.
///
/// Reads its figure from `context.value(id)` and an optional trend from
/// `context.value("<id>.delta")`. A delta starting with `+` renders green,
/// one starting with `-` renders red.
#[derive(Debug, Clone)]
pub struct KpiWidget {
    id: &'static str,
    label: &'static str,
}

impl KpiWidget {
    /// Creates a KPI card for `id` captioned with `label`.
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

impl Widget for KpiWidget {
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

        let value = context.value(self.id).unwrap_or(NO_VALUE);
        let mut lines = vec![Line::styled(
            fit(value, size.width),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        let delta_key = format!("{}.delta", self.id);
        if let Some(delta) = context.value(&delta_key) {
            let color = match delta.chars().next() {
                Some('+') => Color::Green,
                Some('-') => Color::Red,
                _ => Color::Reset,
            };
            lines.push(Line::from(Span::styled(
                fit(delta, size.width),
                Style::default().fg(color),
            )));
        }
        lines.push(Line::styled(fit(self.label, size.width), dim));

        lines.truncate(usize::from(size.height));
        Text::from(lines)
    }
}

/// Factory for the revenue card.
pub fn revenue() -> Box<dyn Widget> {
    Box::new(KpiWidget::new("revenue-kpi", "Revenue this month"))
}

/// Factory for the open orders card.
pub fn orders() -> Box<dyn Widget> {
    Box::new(KpiWidget::new("orders-kpi", "Open orders"))
}

/// Factory for the cash balance card.
pub fn cash_balance() -> Box<dyn Widget> {
    Box::new(KpiWidget::new("cash-balance", "Cash on hand"))
}
