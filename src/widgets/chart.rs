//! Sparkline chart card.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};

use super::{fit, ContainerSize, Widget, WidgetContext};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draws the most recent points of `context.series(id)` as block bars, with
/// the pre-formatted headline `context.value(id)` above when there is room.
#[derive(Debug, Clone)]
pub struct SparklineWidget {
    id: &'static str,
}

impl SparklineWidget {
    /// Creates a sparkline card for `id`.
    pub const fn new(id: &'static str) -> Self {
        Self { id }
    }
}

/// Maps each point onto one of the eight bar glyphs, scaled between the
/// series minimum and maximum. A flat series renders at mid height.
fn bars(points: &[f64]) -> String {
    let finite = points.iter().copied().filter(|p| p.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    let span = max - min;
    points
        .iter()
        .map(|&p| {
            if !p.is_finite() {
                ' '
            } else if span <= f64::EPSILON {
                BARS[3]
            } else {
                let scaled = ((p - min) / span * 7.0).round() as usize;
                BARS[scaled.min(7)]
            }
        })
        .collect()
}

impl Widget for SparklineWidget {
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

        let series = context.series(self.id);
        if series.is_empty() {
            return Text::from(Line::styled(fit("No data", size.width), dim));
        }

        let mut lines = Vec::new();
        if size.height >= 2 {
            if let Some(headline) = context.value(self.id) {
                lines.push(Line::styled(
                    fit(headline, size.width),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
        }
        let visible = &series[series.len().saturating_sub(usize::from(size.width))..];
        lines.push(Line::raw(bars(visible)));
        Text::from(lines)
    }
}

/// Factory for the sales chart.
pub fn sales() -> Box<dyn Widget> {
    Box::new(SparklineWidget::new("sales-chart"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::DashboardData;

    #[test]
    fn test_bars_scale_min_to_max() {
        assert_eq!(bars(&[0.0, 7.0]), "▁█");
        assert_eq!(bars(&[1.0, 1.0, 1.0]), "▄▄▄");
    }

    #[test]
    fn test_bars_skip_non_finite() {
        assert_eq!(bars(&[0.0, f64::NAN, 7.0]), "▁ █");
    }

    #[test]
    fn test_render_keeps_latest_points_within_width() {
        let data = DashboardData::default().with_series("sales-chart", &[0.0, 1.0, 2.0, 3.0, 7.0]);
        let text = sales().render(&data.context(), ContainerSize::new(2, 1));
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].to_string().chars().count(), 2);
    }

    #[test]
    fn test_render_headline_when_tall_enough() {
        let data = DashboardData::default()
            .with_value("sales-chart", "$3.1k today")
            .with_series("sales-chart", &[1.0, 2.0]);
        let text = sales().render(&data.context(), ContainerSize::new(20, 3));
        assert_eq!(text.lines[0].to_string(), "$3.1k today");
        assert_eq!(text.lines.len(), 2);
    }

    #[test]
    fn test_render_without_series() {
        let data = DashboardData::default();
        let text = sales().render(&data.context(), ContainerSize::new(20, 3));
        assert_eq!(text.lines[0].to_string(), "No data");
    }
}
