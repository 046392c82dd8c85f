use nwi_core::Rgba;
use ratatui::style::{Color, Modifier, Style};

/// Page background the translucent colors are composited over.
pub const BACKGROUND: Rgba = Rgba::opaque(0x0b, 0x11, 0x20);
pub const ACCENT: Rgba = Rgba::opaque(0x0e, 0xa5, 0xe9);
pub const MUTED: Color = Color::Rgb(0x94, 0xa3, 0xb8);
pub const TEXT: Color = Color::Rgb(0xe2, 0xe8, 0xf0);

/// Terminal color for a possibly translucent color, flattened onto the page.
pub fn color(rgba: Rgba) -> Color {
    let flat = rgba.over(BACKGROUND);
    Color::Rgb(flat.r, flat.g, flat.b)
}

/// `rgba` drawn at `opacity` on top of its own alpha.
pub fn faded(rgba: Rgba, opacity: f64) -> Color {
    color(Rgba {
        a: rgba.a * opacity.clamp(0.0, 1.0),
        ..rgba
    })
}

pub fn accent() -> Color {
    color(ACCENT)
}

pub fn border(revealed: bool) -> Style {
    if revealed {
        Style::default().fg(accent())
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    }
}

pub fn title() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_colors_pass_through() {
        assert_eq!(accent(), Color::Rgb(0x0e, 0xa5, 0xe9));
    }

    #[test]
    fn transparent_colors_become_the_background() {
        assert_eq!(
            faded(ACCENT, 0.0),
            Color::Rgb(BACKGROUND.r, BACKGROUND.g, BACKGROUND.b)
        );
    }
}
