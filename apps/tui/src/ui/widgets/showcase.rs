use chrono::Local;
use nwi_core::showcase::{ClockFace, ShowcaseFrame};
use nwi_core::Rgba;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::ui::theme;

const WATCH_MAX_WIDTH: u16 = 36;
const WATCH_MAX_HEIGHT: u16 = 13;
const WATCH_MIN_WIDTH: u16 = 8;
const WATCH_MIN_HEIGHT: u16 = 5;
const FACE_TEXT: Rgba = Rgba::opaque(0xe2, 0xe8, 0xf0);

/// Watch rectangle for a scale, centered in the panel.
pub fn watch_rect(panel: Rect, scale: f64) -> Rect {
    let max_width = WATCH_MAX_WIDTH.min(panel.width.saturating_sub(4));
    let max_height = WATCH_MAX_HEIGHT.min(panel.height.saturating_sub(4));
    let width = ((f64::from(max_width) * scale).round() as u16)
        .max(WATCH_MIN_WIDTH)
        .min(panel.width);
    let height = ((f64::from(max_height) * scale).round() as u16)
        .max(WATCH_MIN_HEIGHT)
        .min(panel.height);

    Rect {
        x: panel.x + (panel.width - width) / 2,
        y: panel.y + (panel.height - height) / 2,
        width,
        height,
    }
}

fn grow(rect: Rect, by: u16, bounds: Rect) -> Rect {
    let x = rect.x.saturating_sub(by).max(bounds.x);
    let y = rect.y.saturating_sub(by).max(bounds.y);
    let right = (rect.x + rect.width + by).min(bounds.x + bounds.width);
    let bottom = (rect.y + rect.height + by).min(bounds.y + bounds.height);
    Rect::new(x, y, right - x, bottom - y)
}

/// Draws the pinned showcase panel for one frame.
pub fn render_showcase(frame: &ShowcaseFrame, area: Rect, buf: &mut Buffer) {
    Block::default()
        .style(Style::default().bg(theme::color(theme::BACKGROUND)))
        .render(area, buf);

    Paragraph::new(Span::styled(
        "scroll to wake the watch",
        Style::default().fg(theme::faded(FACE_TEXT, 1.0 - frame.progress)),
    ))
    .alignment(Alignment::Center)
    .render(Rect { height: 1, ..area }, buf);

    let watch = watch_rect(area, frame.scale);
    let [outer, shadow, ring] = frame.glow.layers();

    if frame.glow.intensity > 0.0 {
        // Outer glow as a halo one cell out, drop shadow under it.
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::color(outer.color)))
            .render(grow(watch, 1, area), buf);

        let shadow_row = watch.y + watch.height + 1;
        if shadow.offset_y >= 10.0 && shadow_row < area.y + area.height {
            Paragraph::new("▀".repeat(usize::from(watch.width)))
                .style(Style::default().fg(theme::color(shadow.color)))
                .render(Rect::new(watch.x, shadow_row, watch.width, 1), buf);
        }
    }

    let hairline = Rgba {
        a: ring.color.a.max(0.06),
        ..ring.color
    };
    let border = theme::faded(
        if frame.glow.intensity > 0.0 { theme::ACCENT } else { hairline },
        frame.opacity.max(frame.glow.intensity),
    );
    let face = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::faded(Rgba::opaque(0, 0, 0), frame.opacity)));
    let inner = face.inner(watch);
    face.render(watch, buf);

    if frame.overlay.visible {
        let clock = ClockFace::new(frame.displayed_time, &Local);
        let color = theme::faded(FACE_TEXT, frame.overlay.opacity);
        let accent = theme::faded(theme::ACCENT, frame.overlay.opacity);
        let mut lines = vec![
            TextLine::from(Span::styled(clock.day, Style::default().fg(accent))),
            TextLine::from(Span::styled(
                clock.time,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(clock.date, Style::default().fg(color))),
        ];
        let padding = usize::from(inner.height.saturating_sub(3) / 2);
        lines.splice(0..0, std::iter::repeat(TextLine::default()).take(padding));

        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    if frame.caption_visible {
        let caption_row = (watch.y + watch.height + 2).min(area.y + area.height.saturating_sub(1));
        Paragraph::new(Span::styled(
            "NWI, live on your wrist",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, caption_row, area.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nwi_core::showcase::{derive, ShowcaseInput};

    fn frame_at(progress: f64) -> ShowcaseFrame {
        derive(&ShowcaseInput {
            top: -80.0 * progress,
            showcase_height: 120.0,
            viewport_height: 40.0,
            now: Utc::now(),
        })
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn watch_grows_with_scale() {
        let panel = Rect::new(0, 0, 100, 40);
        let small = watch_rect(panel, 0.4);
        let full = watch_rect(panel, 1.0);

        assert_eq!(full.width, WATCH_MAX_WIDTH);
        assert_eq!(full.height, WATCH_MAX_HEIGHT);
        assert!(small.width < full.width);
        assert_eq!(small.x, (100 - small.width) / 2);
    }

    #[test]
    fn watch_fits_tiny_panels() {
        let panel = Rect::new(0, 0, 6, 4);
        let rect = watch_rect(panel, 1.0);
        assert!(rect.width <= panel.width && rect.height <= panel.height);
    }

    #[test]
    fn caption_appears_late_in_the_scroll() {
        let area = Rect::new(0, 0, 80, 40);

        let mut early = Buffer::empty(area);
        render_showcase(&frame_at(0.1), area, &mut early);
        assert!(!text(&early).contains("live on your wrist"));

        let mut late = Buffer::empty(area);
        render_showcase(&frame_at(0.9), area, &mut late);
        assert!(text(&late).contains("live on your wrist"));
    }
}
