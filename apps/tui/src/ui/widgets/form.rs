use nwi_core::page::Section;
use nwi_core::suggestion::SubmitState;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::{App, Focus};
use crate::ui::theme;

fn field<'a>(label: &'a str, value: &'a str, focused: bool, enabled: bool) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(theme::accent())
    } else {
        Style::default().fg(theme::MUTED)
    };
    let mut text = Style::default().fg(theme::TEXT);
    if !enabled {
        text = text.add_modifier(Modifier::DIM);
    }
    let cursor = if focused && enabled { "▏" } else { "" };

    Paragraph::new(TextLine::from(vec![
        Span::styled(value, text),
        Span::styled(cursor, Style::default().fg(theme::accent())),
    ]))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border),
    )
}

pub fn render_form(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Suggestions ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_style(theme::border(app.is_revealed(Section::Form)));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .split(inner);

    let form = &app.form;
    if form.state == SubmitState::ThankYou {
        Paragraph::new(Span::styled(
            "Thank you! Your suggestion was received.",
            theme::title().fg(theme::accent()),
        ))
        .alignment(Alignment::Center)
        .render(rows[1], buf);
        return;
    }

    let enabled = form.is_editable();
    field(" Name (optional) ", &form.name, app.focus == Focus::FormName, enabled)
        .render(rows[0], buf);
    field(" Suggestion ", &form.text, app.focus == Focus::FormText, enabled).render(rows[1], buf);

    let hint = if form.state == SubmitState::Submitting {
        TextLine::from(Span::styled("Sending...", Style::default().fg(theme::MUTED)))
    } else if matches!(app.focus, Focus::FormName | Focus::FormText) {
        TextLine::from(vec![
            Span::styled("Tab", theme::key_hint()),
            Span::raw(" next field  "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(" send  "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" back"),
        ])
    } else {
        TextLine::from(vec![
            Span::styled("Tab", theme::key_hint()),
            Span::raw(" to write a suggestion"),
        ])
    };
    Paragraph::new(hint).render(rows[2], buf);
}
