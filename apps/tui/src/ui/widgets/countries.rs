use nwi_core::CountryRank;
use nwi_core::page::Section;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget};

use crate::app::{App, Focus};
use crate::ui::theme;

const BAR_WIDTH: u16 = 24;

/// Bar for a share of the leading country, at least one cell when nonzero.
pub fn bar(percent_of_max: u8, width: u16) -> String {
    let filled = (u32::from(percent_of_max.min(100)) * u32::from(width) + 50) / 100;
    let filled = if percent_of_max > 0 { filled.max(1) } else { 0 };
    "█".repeat(filled as usize)
}

fn row(rank: &CountryRank) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("{} {}", rank.flag, rank.name)),
        Cell::from(Span::styled(
            bar(rank.percent_of_max, BAR_WIDTH),
            Style::default().fg(theme::accent()),
        )),
        Cell::from(Span::styled(
            rank.users_label.clone(),
            Style::default().fg(theme::MUTED),
        )),
    ])
}

pub fn render_countries(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Countries ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_style(theme::border(app.is_revealed(Section::Countries)));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let searching = app.focus == Focus::Search;
    let search_line = if searching || !app.search.is_empty() {
        TextLine::from(vec![
            Span::styled("/", theme::key_hint()),
            Span::raw(" "),
            Span::styled(
                app.search.clone(),
                Style::default().fg(theme::TEXT).add_modifier(if searching {
                    Modifier::UNDERLINED
                } else {
                    Modifier::empty()
                }),
            ),
        ])
    } else {
        TextLine::from(vec![
            Span::styled("/", theme::key_hint()),
            Span::styled(" search countries", Style::default().fg(theme::MUTED)),
        ])
    };
    Paragraph::new(search_line).render(rows[0], buf);

    if app.ranked.is_empty() {
        Paragraph::new(Span::styled("No country data yet.", Style::default().fg(theme::MUTED)))
            .render(rows[1], buf);
        return;
    }

    let visible = app.visible_countries();
    if visible.is_empty() {
        Paragraph::new(Span::styled("No matching country.", Style::default().fg(theme::MUTED)))
            .render(rows[1], buf);
        return;
    }

    Table::new(
        visible.into_iter().map(row),
        [
            Constraint::Min(20),
            Constraint::Length(BAR_WIDTH),
            Constraint::Length(12),
        ],
    )
    .column_spacing(2)
    .render(rows[1], buf);
}
