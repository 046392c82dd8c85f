use nwi_core::choropleth::{Choropleth, RegionStyle};
use nwi_core::raster::{X_BOUNDS, Y_BOUNDS};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::App;
use crate::ui::theme;

/// Area inside the section border left for the canvas, below the tooltip.
pub fn canvas_area(section: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(section);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner)[1]
}

fn fill_color(style: &RegionStyle) -> Color {
    theme::faded(style.fill_color, style.fill_opacity)
}

pub fn render_map(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" World Map ")
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_style(theme::border(app.is_revealed(nwi_core::page::Section::Map)));
    let inner = block.inner(area);
    block.render(area, buf);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let choropleth = Choropleth::new(&app.dashboard.aggregate);
    let selected = app.selected_shape();

    let tooltip = selected.map_or_else(
        || {
            TextLine::from(Span::styled(
                "[ / ] select a region",
                Style::default().fg(theme::MUTED),
            ))
        },
        |shape| {
            let tooltip = choropleth.tooltip_for(&shape.id);
            TextLine::from(vec![
                Span::raw(format!("{} ", tooltip.flag)),
                Span::styled(tooltip.name, theme::title()),
                Span::raw("  "),
                Span::styled(tooltip.users_label, Style::default().fg(theme::accent())),
            ])
        },
    );
    Paragraph::new(tooltip).render(layout[0], buf);

    let mut by_color: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();
    for &(x, y, index) in app.raster.samples() {
        let Some(shape) = app.shapes.get(index) else {
            continue;
        };
        let style = if selected.is_some_and(|s| s.id == shape.id) {
            choropleth.hover_style_for(&shape.id)
        } else {
            choropleth.style_for(&shape.id)
        };
        let color = fill_color(&style);
        match by_color.iter_mut().find(|(existing, _)| *existing == color) {
            Some((_, points)) => points.push((x, y)),
            None => by_color.push((color, vec![(x, y)])),
        }
    }

    Canvas::default()
        .marker(Marker::HalfBlock)
        .background_color(theme::color(theme::BACKGROUND))
        .x_bounds(X_BOUNDS)
        .y_bounds(Y_BOUNDS)
        .paint(|ctx| {
            for (color, coords) in &by_color {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
            ctx.layer();

            if let Some(shape) = selected {
                let outline = theme::color(choropleth.hover_style_for(&shape.id).color);
                for ring in shape.polygons.iter().flatten() {
                    for pair in ring.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: pair[0].0,
                            y1: pair[0].1,
                            x2: pair[1].0,
                            y2: pair[1].1,
                            color: outline,
                        });
                    }
                }
            }
        })
        .render(layout[1], buf);
}
