// UI module for nwi_dashboard
// Renders the scrolling page, the status bar and popups

pub mod theme;
pub mod widgets;

use nwi_core::page::{sticky_panel_top, Section, SectionSpan};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

use crate::app::state::STATUS_ROWS;
use crate::app::App;
use widgets::{charts, countries, form, hero, map, popup, showcase};

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_ROWS)])
        .split(f.area());
    let viewport = layout[0];

    let visible = app.page.visible(app.scroll).copied().collect::<Vec<_>>();
    for span in visible {
        let (screen_top, rendered) = render_section(app, &span, viewport.width);
        blit(&rendered, screen_top, f.buffer_mut(), viewport);
    }

    render_status(app, f, layout[1]);

    if let Some(message) = &app.alert {
        popup::render_alert(f, message);
    }
}

/// Renders a section off screen. Returns the row it lands on, relative to
/// the viewport, and the rendered rows.
fn render_section(app: &App, span: &SectionSpan, width: u16) -> (i32, Buffer) {
    let top = span.top_in_viewport(app.scroll);

    if span.section == Section::Showcase {
        let height = app.viewport_height();
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        showcase::render_showcase(&app.showcase, buf.area, &mut buf);
        return (sticky_panel_top(top, span.height, height), buf);
    }

    let mut buf = Buffer::empty(Rect::new(0, 0, width, span.height));
    let area = buf.area;
    match span.section {
        Section::Hero => hero::render_hero(app, area, &mut buf),
        Section::Chart => charts::render_daily_chart(app, area, &mut buf),
        Section::Map => map::render_map(app, area, &mut buf),
        Section::Countries => countries::render_countries(app, area, &mut buf),
        Section::Form => form::render_form(app, area, &mut buf),
        Section::Showcase => {}
    }
    (top, buf)
}

/// Copies the rows of `source` that fall inside `viewport`, placing the
/// first row at `screen_top`.
fn blit(source: &Buffer, screen_top: i32, target: &mut Buffer, viewport: Rect) {
    for row in 0..source.area.height {
        let Ok(y) = u16::try_from(screen_top + i32::from(row)) else {
            continue;
        };
        if y >= viewport.height {
            break;
        }
        for x in 0..source.area.width.min(viewport.width) {
            let Some(cell) = source.cell((x, row)) else {
                continue;
            };
            if let Some(slot) = target.cell_mut((viewport.x + x, viewport.y + y)) {
                *slot = cell.clone();
            }
        }
    }
}

fn render_status(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0), Constraint::Length(8)])
        .split(area);

    if app.loading {
        let throbber = Throbber::default()
            .label("Loading statistics...")
            .style(Style::default().fg(theme::MUTED))
            .throbber_style(Style::default().fg(theme::accent()))
            .throbber_set(BRAILLE_SIX);
        f.render_stateful_widget(throbber, columns[0], &mut app.throbber);
    } else if !app.status_message.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                app.status_message.clone(),
                Style::default().fg(theme::MUTED),
            )),
            columns[0],
        );
    }

    let section = app
        .page
        .spans
        .iter()
        .rev()
        .find(|span| span.top <= app.scroll)
        .map_or("", |span| span.section.title());
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled(section, theme::title()),
            Span::styled("  PgUp/PgDn  [ ] map  r refresh", Style::default().fg(theme::MUTED)),
        ])),
        columns[1],
    );

    let max = app.page.max_scroll().max(1);
    let percent = u32::from(app.scroll) * 100 / u32::from(max);
    f.render_widget(
        Paragraph::new(format!("{percent:>3}%")).style(Style::default().fg(theme::MUTED)),
        columns[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Widget;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    fn filled(width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        for row in 0..height {
            Paragraph::new(format!("row{row}")).render(Rect::new(0, row, width, 1), &mut buf);
        }
        buf
    }

    #[test]
    fn blit_clips_rows_above_the_viewport() {
        let source = filled(6, 4);
        let mut target = Buffer::empty(Rect::new(0, 0, 6, 3));
        let area = target.area;
        blit(&source, -2, &mut target, area);

        assert_eq!(row_text(&target, 0), "row2  ");
        assert_eq!(row_text(&target, 1), "row3  ");
        assert_eq!(row_text(&target, 2), "      ");
    }

    #[test]
    fn blit_clips_rows_below_the_viewport() {
        let source = filled(6, 4);
        let mut target = Buffer::empty(Rect::new(0, 0, 6, 3));
        let area = target.area;
        blit(&source, 2, &mut target, area);

        assert_eq!(row_text(&target, 0), "      ");
        assert_eq!(row_text(&target, 2), "row0  ");
    }
}
