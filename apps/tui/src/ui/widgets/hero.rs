use nwi_core::aggregate::{short_date_label, thousands};
use nwi_core::page::Section;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::App;
use crate::ui::theme;

fn stat(label: &str, value: String, area: Rect, buf: &mut Buffer, revealed: bool) {
    let text = Text::from(vec![
        TextLine::from(Span::styled(value, theme::title().fg(theme::accent()))),
        TextLine::from(Span::styled(label.to_string(), Style::default().fg(theme::MUTED))),
    ]);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme::border(revealed)))
        .render(area, buf);
}

pub fn render_hero(app: &App, area: Rect, buf: &mut Buffer) {
    let revealed = app.is_revealed(Section::Hero);
    let block = Block::default()
        .title(" NWI Usage ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_style(theme::border(revealed));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let subtitle = app.dashboard.aggregate.chosen_date.as_deref().map_or_else(
        || "No usage reported yet".to_string(),
        |date| format!("Figures for {}", short_date_label(date)),
    );
    Paragraph::new(Span::styled(subtitle, Style::default().fg(theme::MUTED)))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let dashboard = &app.dashboard;
    stat(
        "Users",
        thousands(dashboard.aggregate.total_users),
        columns[0],
        buf,
        revealed,
    );
    stat(
        "Unique users",
        thousands(dashboard.total_unique_users),
        columns[1],
        buf,
        revealed,
    );
    stat(
        "Countries",
        dashboard.country_total().to_string(),
        columns[2],
        buf,
        revealed,
    );

    Paragraph::new(TextLine::from(vec![
        Span::styled("↑/↓", theme::key_hint()),
        Span::raw(" scroll  "),
        Span::styled("1-6", theme::key_hint()),
        Span::raw(" jump  "),
        Span::styled("/", theme::key_hint()),
        Span::raw(" search  "),
        Span::styled("Tab", theme::key_hint()),
        Span::raw(" suggest  "),
        Span::styled("r", theme::key_hint()),
        Span::raw(" refresh  "),
        Span::styled("q", theme::key_hint()),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center)
    .render(rows[2], buf);
}
