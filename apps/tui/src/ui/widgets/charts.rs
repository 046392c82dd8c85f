use nwi_core::aggregate::{thousands, DailyPoint, DENSE_SERIES_POINTS};
use nwi_core::page::Section;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};

use crate::app::App;
use crate::ui::theme;

/// Chart coordinates for the series, one x step per day.
pub fn series_points(series: &[DailyPoint]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(index, point)| (index as f64, point.unique_users as f64))
        .collect()
}

/// Whether point markers are drawn on top of the line.
pub const fn shows_markers(points: usize) -> bool {
    points <= DENSE_SERIES_POINTS
}

/// First, middle and last labels; the rest would overlap.
fn axis_labels(series: &[DailyPoint]) -> Vec<Span<'static>> {
    let label = |index: usize| series.get(index).map(|point| point.label.clone()).unwrap_or_default();
    match series.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(label(0))],
        2 => vec![Span::raw(label(0)), Span::raw(label(1))],
        len => vec![
            Span::raw(label(0)),
            Span::raw(label(len / 2)),
            Span::raw(label(len - 1)),
        ],
    }
}

pub fn render_daily_chart(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Daily Users ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_style(theme::border(app.is_revealed(Section::Chart)));

    let series = app.dashboard.daily_series();
    if series.is_empty() {
        Paragraph::new("No data yet")
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
        return;
    }

    let points = series_points(&series);
    let max = points.iter().map(|(_, y)| *y).fold(1.0_f64, f64::max);
    let last_x = (points.len().saturating_sub(1) as f64).max(1.0);
    let line_color = theme::accent();

    let mut datasets = vec![Dataset::default()
        .name("Unique users")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(line_color))
        .data(&points)];

    if shows_markers(points.len()) {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&points),
        );
    }

    let y_labels = vec![
        Span::raw("0"),
        Span::raw(thousands((max / 2.0).round() as u64)),
        Span::raw(thousands(max as u64)),
    ];

    Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme::MUTED))
                .bounds([0.0, last_x])
                .labels(axis_labels(&series)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme::MUTED))
                .bounds([0.0, max * 1.1])
                .labels(y_labels),
        )
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, label: &str, unique_users: u64) -> DailyPoint {
        DailyPoint {
            date: date.to_string(),
            label: label.to_string(),
            unique_users,
        }
    }

    #[test]
    fn points_follow_the_series_order() {
        let series = [point("2024-01-01", "1 Jan", 10), point("2024-01-02", "2 Jan", 25)];
        assert_eq!(series_points(&series), [(0.0, 10.0), (1.0, 25.0)]);
    }

    #[test]
    fn markers_are_dropped_for_long_series() {
        assert!(shows_markers(30));
        assert!(!shows_markers(31));
    }

    #[test]
    fn axis_labels_pick_the_ends() {
        let series = (1..=5)
            .map(|day| point("", &format!("{day} Jan"), day))
            .collect::<Vec<_>>();
        let labels = axis_labels(&series)
            .into_iter()
            .map(|span| span.content.into_owned())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["1 Jan", "3 Jan", "5 Jan"]);
    }
}
