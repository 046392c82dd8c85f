mod animation;
mod fetch;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use chrono::{Local, Utc};
use nwi_core::aggregate::{short_date_label, thousands, DENSE_SERIES_POINTS};
use nwi_core::page::{sticky_panel_top, PageLayout, Section, SectionSpan};
use nwi_core::raster::{MapRaster, RegionShape, X_BOUNDS, Y_BOUNDS};
use nwi_core::schedule::{intersects_viewport, FrameGate, Reveal, TickTimer};
use nwi_core::showcase::{self, ClockFace, ShowcaseFrame, ShowcaseInput};
use nwi_core::suggestion::{SubmitState, THANK_YOU_SECONDS};
use nwi_core::{Choropleth, CountryRank, Dashboard, DashboardError, Rgba, Suggestion};
use ratzilla::event::{KeyCode, KeyEvent};
use ratzilla::ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
        Widget, Wrap,
    },
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;

const BACKGROUND: Rgba = Rgba::opaque(0x0b, 0x11, 0x20);
const ACCENT: Rgba = Rgba::opaque(0x0e, 0xa5, 0xe9);
const MUTED: Color = Color::Rgb(0x94, 0xa3, 0xb8);
const TEXT: Color = Color::Rgb(0xe2, 0xe8, 0xf0);
/// Status line under the page.
const STATUS_ROWS: u16 = 1;
const REVEAL_MARGIN_ROWS: f64 = 1.0;
const WHEEL_ROWS: f64 = 3.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Text,
}

#[derive(Default)]
struct Form {
    name: String,
    text: String,
    /// `None` while the keyboard drives the page
    field: Option<Field>,
    state: SubmitState,
    thank_you_since: Option<f64>,
}

impl Form {
    fn input(&mut self) -> Option<&mut String> {
        match self.field? {
            Field::Name => Some(&mut self.name),
            Field::Text => Some(&mut self.text),
        }
    }
}

struct WebState {
    dashboard: Dashboard,
    ranked: Vec<CountryRank>,
    loading: bool,
    shapes: Vec<RegionShape>,
    raster: MapRaster,
    page: PageLayout,
    width: u16,
    scroll: f64,
    scroll_target: f64,
    last_tick: Option<f64>,
    gate: FrameGate,
    tick: TickTimer,
    showcase: ShowcaseFrame,
    reveal: Reveal,
    form: Form,
    alert: Option<String>,
}

impl WebState {
    fn new() -> Self {
        let mut gate = FrameGate::new();
        gate.request();
        Self {
            dashboard: Dashboard::default(),
            ranked: Vec::new(),
            loading: true,
            shapes: Vec::new(),
            raster: MapRaster::default(),
            page: PageLayout::new(1, 0, false),
            width: 0,
            scroll: 0.0,
            scroll_target: 0.0,
            last_tick: None,
            gate,
            tick: TickTimer::default(),
            showcase: showcase::derive(&ShowcaseInput {
                top: 0.0,
                showcase_height: 1.0,
                viewport_height: 1.0,
                now: Utc::now(),
            }),
            reveal: Reveal::new(Section::ALL.len()),
            form: Form::default(),
            alert: None,
        }
    }

    fn scroll_row(&self) -> u16 {
        animation::scroll_row(self.scroll)
    }

    fn relayout(&mut self, width: u16, viewport_height: u16) {
        self.width = width;
        self.page = PageLayout::new(viewport_height, self.ranked.len(), !self.shapes.is_empty());
        let max = f64::from(self.page.max_scroll());
        self.scroll = self.scroll.min(max);
        self.scroll_target = self.scroll_target.min(max);

        if let Some(span) = self.page.span(Section::Map) {
            let area = map_canvas_area(Rect::new(0, 0, width, span.height));
            if !self.raster.matches(area.width, area.height) {
                self.raster = MapRaster::build(&self.shapes, area.width, area.height);
            }
        }
        self.gate.request();
    }

    fn refresh_layout(&mut self) {
        self.raster = MapRaster::default();
        self.relayout(self.width, self.page.viewport_height);
    }

    fn scroll_by(&mut self, rows: f64) {
        let max = f64::from(self.page.max_scroll());
        self.scroll_target = (self.scroll_target + rows).clamp(0.0, max);
    }

    fn scroll_to(&mut self, section: Section) {
        if let Some(row) = self.page.scroll_to(section) {
            self.scroll_target = f64::from(row);
        }
    }

    fn is_revealed(&self, section: Section) -> bool {
        self.reveal.is_revealed(section.index())
    }

    /// Per-frame work: eases the scroll, ticks the clock while the showcase
    /// is on screen, then recomputes at most once.
    fn update(&mut self, now_seconds: f64) {
        let before = self.scroll_row();
        let (scroll, last_tick) =
            animation::advance_scroll(self.scroll, self.scroll_target, self.last_tick, now_seconds);
        self.scroll = scroll;
        self.last_tick = last_tick;
        if self.scroll_row() != before {
            self.gate.request();
        }

        if let Some(span) = self.page.span(Section::Showcase).copied() {
            let top = f64::from(span.top_in_viewport(self.scroll_row()));
            let on_screen =
                intersects_viewport(top, f64::from(span.height), f64::from(self.page.viewport_height));
            if self.tick.poll(now_seconds) && on_screen {
                self.gate.request();
            }
        }

        if self.gate.take() {
            self.recompute();
        }

        let thanked = self
            .form
            .thank_you_since
            .is_some_and(|since| now_seconds - since >= THANK_YOU_SECONDS);
        if thanked && self.form.state == SubmitState::ThankYou {
            self.form = Form::default();
        }
    }

    fn recompute(&mut self) {
        let scroll = self.scroll_row();
        let viewport = f64::from(self.page.viewport_height);

        for span in &self.page.spans {
            self.reveal.observe(
                span.section.index(),
                f64::from(span.top_in_viewport(scroll)),
                f64::from(span.height),
                viewport,
                REVEAL_MARGIN_ROWS,
            );
        }

        if let Some(span) = self.page.span(Section::Showcase) {
            self.showcase = showcase::derive(&ShowcaseInput {
                top: f64::from(span.top_in_viewport(scroll)),
                showcase_height: f64::from(span.height),
                viewport_height: viewport,
                now: Utc::now(),
            });
        }
    }
}

fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

fn log_error(error: &DashboardError) {
    web_sys::console::error_1(&error.to_string().into());
}

fn main() -> io::Result<()> {
    let state = Rc::new(RefCell::new(WebState::new()));

    spawn_local(load_summary(state.clone()));
    spawn_local(load_total_users(state.clone()));
    spawn_local(load_geometry(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| handle_key(&state, &event)
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let mut state = state.borrow_mut();

        let viewport_height = area.height.saturating_sub(STATUS_ROWS);
        if state.width != area.width || state.page.viewport_height != viewport_height.max(1) {
            state.relayout(area.width, viewport_height);
        }
        state.update(now_seconds());

        let viewport = Rect::new(area.x, area.y, area.width, viewport_height);
        Block::default()
            .style(Style::default().bg(color(BACKGROUND)))
            .render(viewport, f.buffer_mut());

        let scroll = state.scroll_row();
        let visible = state.page.visible(scroll).copied().collect::<Vec<_>>();
        for span in visible {
            let (screen_top, rendered) = render_section(&state, &span, area.width);
            blit(&rendered, screen_top, f.buffer_mut(), viewport);
        }

        let status = Rect::new(area.x, area.y + viewport_height, area.width, STATUS_ROWS);
        render_status(&state, f.buffer_mut(), status);
    });

    Ok(())
}

async fn load_summary(state: Rc<RefCell<WebState>>) {
    let summary = fetch::fetch_summary().await;
    let mut state = state.borrow_mut();
    state.loading = false;
    match summary {
        Ok(summary) => {
            state.dashboard.replace_summary(summary);
            let ranked = state.dashboard.ranked_countries();
            state.ranked = ranked;
            state.refresh_layout();
        }
        // Stats stay at their defaults
        Err(error) => log_error(&error),
    }
}

async fn load_total_users(state: Rc<RefCell<WebState>>) {
    match fetch::fetch_total_users().await {
        Ok(total) => state.borrow_mut().dashboard.total_unique_users = total,
        Err(error) => web_sys::console::debug_1(&error.to_string().into()),
    }
}

async fn load_geometry(state: Rc<RefCell<WebState>>) {
    match fetch::fetch_geometry().await {
        Ok(collection) => {
            let mut state = state.borrow_mut();
            state.shapes = RegionShape::from_features(&collection);
            state.refresh_layout();
        }
        Err(error) => log_error(&error),
    }
}

async fn submit(state: Rc<RefCell<WebState>>, suggestion: Suggestion) {
    let result = fetch::submit_suggestion(&suggestion).await;
    let mut state = state.borrow_mut();
    match result {
        Ok(()) => {
            state.form.state = SubmitState::ThankYou;
            state.form.thank_you_since = Some(now_seconds());
            state.form.field = None;
        }
        Err(error) => {
            log_error(&error);
            state.form.state = SubmitState::Editing;
            state.alert = Some("Failed to submit suggestion. Please try again.".to_string());
        }
    }
}

fn handle_key(state: &Rc<RefCell<WebState>>, event: &KeyEvent) {
    let mut guard = state.borrow_mut();
    let web = &mut *guard;
    web.alert = None;

    if web.form.field.is_some() {
        match event.code {
            KeyCode::Esc => web.form.field = None,
            KeyCode::Tab => {
                web.form.field = match web.form.field {
                    Some(Field::Name) => Some(Field::Text),
                    _ => Some(Field::Name),
                };
            }
            KeyCode::Backspace => {
                if let Some(input) = web.form.input() {
                    input.pop();
                }
            }
            KeyCode::Enter => match Suggestion::new(&web.form.name, &web.form.text) {
                Ok(suggestion) => {
                    web.form.state = SubmitState::Submitting;
                    web.form.field = None;
                    spawn_local(submit(state.clone(), suggestion));
                }
                Err(error) => web.alert = Some(error.to_string()),
            },
            KeyCode::Char(c) => {
                if let Some(input) = web.form.input() {
                    input.push(c);
                }
            }
            _ => {}
        }
        return;
    }

    let viewport = f64::from(web.page.viewport_height);
    match event.code {
        KeyCode::Up | KeyCode::Char('k') => web.scroll_by(-WHEEL_ROWS),
        KeyCode::Down | KeyCode::Char('j') => web.scroll_by(WHEEL_ROWS),
        KeyCode::PageUp => web.scroll_by(-viewport),
        KeyCode::PageDown | KeyCode::Char(' ') => web.scroll_by(viewport),
        KeyCode::Home => web.scroll_target = 0.0,
        KeyCode::End => web.scroll_target = f64::from(web.page.max_scroll()),
        KeyCode::Char(c @ '1'..='6') => {
            let index = usize::from(c as u8 - b'1');
            if let Some(section) = Section::ALL.get(index) {
                web.scroll_to(*section);
            }
        }
        KeyCode::Tab | KeyCode::Char('s') if web.form.state == SubmitState::Editing => {
            web.scroll_to(Section::Form);
            web.form.field = Some(Field::Text);
        }
        _ => {}
    }
}

fn color(rgba: Rgba) -> Color {
    let flat = rgba.over(BACKGROUND);
    Color::Rgb(flat.r, flat.g, flat.b)
}

fn faded(rgba: Rgba, opacity: f64) -> Color {
    color(Rgba {
        a: rgba.a * opacity.clamp(0.0, 1.0),
        ..rgba
    })
}

fn section_block(title: &str, revealed: bool) -> Block<'static> {
    let border = if revealed {
        Style::default().fg(color(ACCENT))
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border)
}

fn map_canvas_area(section: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(section);
    Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

fn render_section(state: &WebState, span: &SectionSpan, width: u16) -> (i32, Buffer) {
    let top = span.top_in_viewport(state.scroll_row());

    if span.section == Section::Showcase {
        let height = state.page.viewport_height;
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        render_showcase(&state.showcase, buf.area, &mut buf);
        return (sticky_panel_top(top, span.height, height), buf);
    }

    let mut buf = Buffer::empty(Rect::new(0, 0, width, span.height));
    let area = buf.area;
    match span.section {
        Section::Hero => render_hero(state, area, &mut buf),
        Section::Chart => render_chart(state, area, &mut buf),
        Section::Map => render_map(state, area, &mut buf),
        Section::Countries => render_countries(state, area, &mut buf),
        Section::Form => render_form(state, area, &mut buf),
        Section::Showcase => {}
    }
    (top, buf)
}

fn blit(source: &Buffer, screen_top: i32, target: &mut Buffer, viewport: Rect) {
    for row in 0..source.area.height {
        let Ok(y) = u16::try_from(screen_top + i32::from(row)) else {
            continue;
        };
        if y >= viewport.height {
            break;
        }
        for x in 0..source.area.width.min(viewport.width) {
            if let (Some(cell), Some(slot)) = (
                source.cell((x, row)),
                target.cell_mut((viewport.x + x, viewport.y + y)),
            ) {
                *slot = cell.clone();
            }
        }
    }
}

fn render_hero(state: &WebState, area: Rect, buf: &mut Buffer) {
    let block = section_block("NWI Usage", state.is_revealed(Section::Hero));
    let inner = block.inner(area);
    block.render(area, buf);

    let aggregate = &state.dashboard.aggregate;
    let subtitle = aggregate.chosen_date.as_deref().map_or_else(
        || "No usage reported yet".to_string(),
        |date| format!("Figures for {}", short_date_label(date)),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    Paragraph::new(Span::styled(subtitle, Style::default().fg(MUTED))).render(rows[0], buf);

    let stats = [
        ("Users", thousands(aggregate.total_users)),
        ("Unique users", thousands(state.dashboard.total_unique_users)),
        ("Countries", thousands(state.dashboard.country_total() as u64)),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for ((label, value), column) in stats.into_iter().zip(columns.iter()) {
        Paragraph::new(Text::from(vec![
            TextLine::from(Span::styled(
                value,
                Style::default().fg(color(ACCENT)).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(label, Style::default().fg(MUTED))),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .render(*column, buf);
    }
}

fn render_showcase(frame: &ShowcaseFrame, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        "scroll to wake the watch",
        Style::default().fg(faded(Rgba::opaque(0xe2, 0xe8, 0xf0), 1.0 - frame.progress)),
    ))
    .alignment(Alignment::Center)
    .render(Rect { height: 1, ..area }, buf);

    let width = ((36.0 * frame.scale).round() as u16).clamp(8, area.width.max(8));
    let height = ((13.0 * frame.scale).round() as u16).clamp(5, area.height.max(5));
    let watch = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    let border = if frame.glow.intensity > 0.0 {
        faded(ACCENT, frame.glow.intensity)
    } else {
        faded(Rgba::with_alpha(255, 255, 255, 0.06), 1.0)
    };
    let face = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(faded(Rgba::opaque(0, 0, 0), frame.opacity)));
    let inner = face.inner(watch);
    face.render(watch, buf);

    if frame.overlay.visible {
        let clock = ClockFace::new(frame.displayed_time, &Local);
        let text = faded(Rgba::opaque(0xe2, 0xe8, 0xf0), frame.overlay.opacity);
        Paragraph::new(Text::from(vec![
            TextLine::from(Span::styled(clock.day, Style::default().fg(faded(ACCENT, frame.overlay.opacity)))),
            TextLine::from(Span::styled(
                clock.time,
                Style::default().fg(text).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(clock.date, Style::default().fg(text))),
        ]))
        .alignment(Alignment::Center)
        .render(inner, buf);
    }

    if frame.caption_visible {
        let row = (watch.y + watch.height + 1).min(area.y + area.height.saturating_sub(1));
        Paragraph::new(Span::styled(
            "NWI, live on your wrist",
            Style::default().fg(TEXT).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, row, area.width, 1), buf);
    }
}

fn render_chart(state: &WebState, area: Rect, buf: &mut Buffer) {
    let block = section_block("Daily Users", state.is_revealed(Section::Chart));
    let series = state.dashboard.daily_series();
    if series.is_empty() {
        Paragraph::new("No data yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED))
            .block(block)
            .render(area, buf);
        return;
    }

    let points = series
        .iter()
        .enumerate()
        .map(|(index, point)| (index as f64, point.unique_users as f64))
        .collect::<Vec<_>>();
    let max = series.iter().map(|point| point.unique_users).max().unwrap_or(0).max(1);
    let last = series.len().saturating_sub(1);

    let mut datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color(ACCENT)))
        .data(&points)];
    if series.len() <= DENSE_SERIES_POINTS {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(TEXT))
                .data(&points),
        );
    }

    let labels = [&series[0], &series[last / 2], &series[last]]
        .map(|point| Span::styled(point.label.clone(), Style::default().fg(MUTED)));
    Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, last.max(1) as f64])
                .labels(labels.to_vec()),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, max as f64])
                .labels(vec![Span::raw("0"), Span::raw(thousands(max))]),
        )
        .render(area, buf);
}

fn render_map(state: &WebState, area: Rect, buf: &mut Buffer) {
    let block = section_block("World Map", state.is_revealed(Section::Map));
    let inner = block.inner(area);
    block.render(area, buf);

    let choropleth = Choropleth::new(&state.dashboard.aggregate);
    if let Some(leader) = state.ranked.first() {
        Paragraph::new(TextLine::from(vec![
            Span::raw(format!("{} ", leader.flag)),
            Span::styled(leader.name.clone(), Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(leader.users_label.clone(), Style::default().fg(color(ACCENT))),
        ]))
        .render(Rect { height: 1, ..inner }, buf);
    }

    let mut by_color: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();
    for &(x, y, index) in state.raster.samples() {
        let Some(shape) = state.shapes.get(index) else {
            continue;
        };
        let style = choropleth.style_for(&shape.id);
        let fill = faded(style.fill_color, style.fill_opacity);
        match by_color.iter_mut().find(|(existing, _)| *existing == fill) {
            Some((_, coords)) => coords.push((x, y)),
            None => by_color.push((fill, vec![(x, y)])),
        }
    }

    Canvas::default()
        .marker(Marker::HalfBlock)
        .background_color(color(BACKGROUND))
        .x_bounds(X_BOUNDS)
        .y_bounds(Y_BOUNDS)
        .paint(|ctx| {
            for (fill, coords) in &by_color {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *fill,
                });
            }
        })
        .render(map_canvas_area(area), buf);
}

fn render_countries(state: &WebState, area: Rect, buf: &mut Buffer) {
    let block = section_block("Countries", state.is_revealed(Section::Countries));
    if state.ranked.is_empty() {
        Paragraph::new("No country data yet.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED))
            .block(block)
            .render(area, buf);
        return;
    }

    let bar_width = usize::from(area.width.saturating_sub(48).max(4));
    let rows = state.ranked.iter().map(|rank| {
        let filled = ((f64::from(rank.percent_of_max) / 100.0) * bar_width as f64).round() as usize;
        Row::new(vec![
            Cell::from(format!("{} {}", rank.flag, rank.name)),
            Cell::from(Span::styled(
                format!("{}{}", "█".repeat(filled), "░".repeat(bar_width.saturating_sub(filled))),
                Style::default().fg(color(ACCENT)),
            )),
            Cell::from(rank.users_label.clone()),
        ])
        .style(Style::default().fg(TEXT))
    });

    Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Min(4),
            Constraint::Length(12),
        ],
    )
    .block(block)
    .column_spacing(1)
    .render(area, buf);
}

fn render_form(state: &WebState, area: Rect, buf: &mut Buffer) {
    let block = section_block("Suggestions", state.is_revealed(Section::Form));
    let inner = block.inner(area);
    block.render(area, buf);

    let form = &state.form;
    let lines = match form.state {
        SubmitState::ThankYou => vec![TextLine::from(Span::styled(
            "Thank you! Your suggestion was received.",
            Style::default().fg(color(ACCENT)).add_modifier(Modifier::BOLD),
        ))],
        SubmitState::Submitting => vec![TextLine::from(Span::styled(
            "Sending...",
            Style::default().fg(MUTED),
        ))],
        SubmitState::Editing => {
            let field = |label: &'static str, value: &str, active: bool| {
                let style = if active {
                    Style::default().fg(TEXT).add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(MUTED)
                };
                let cursor = if active { "_" } else { "" };
                TextLine::from(vec![
                    Span::styled(label, Style::default().fg(MUTED)),
                    Span::styled(format!("{value}{cursor}"), style),
                ])
            };
            vec![
                field("Name (optional): ", &form.name, form.field == Some(Field::Name)),
                TextLine::default(),
                field("Suggestion: ", &form.text, form.field == Some(Field::Text)),
                TextLine::default(),
                TextLine::from(Span::styled(
                    if form.field.is_some() {
                        "Enter send  Tab switch field  Esc back to page"
                    } else {
                        "Tab or s to write a suggestion"
                    },
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
            ]
        }
    };

    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

fn render_status(state: &WebState, buf: &mut Buffer, area: Rect) {
    let line = if let Some(alert) = &state.alert {
        TextLine::from(Span::styled(
            alert.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        let left = if state.loading {
            "Loading statistics..."
        } else {
            "Arrows/PgUp/PgDn scroll  1-6 jump  Tab suggest"
        };
        let max = u32::from(state.page.max_scroll().max(1));
        let percent = u32::from(state.scroll_row()) * 100 / max;
        TextLine::from(vec![
            Span::styled(left, Style::default().fg(MUTED)),
            Span::raw("  "),
            Span::styled(format!("{percent:>3}%"), Style::default().fg(MUTED)),
        ])
    };
    Paragraph::new(line).render(area, buf);
}
