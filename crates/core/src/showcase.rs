//! Scroll-linked watch showcase.
//!
//! Everything visible about the showcase is a pure function of where the
//! section sits in the viewport and of the wall clock, see [`derive`]. The
//! caller decides when to recompute (see [`crate::schedule`]).

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::color::Rgba;

/// How far back the displayed clock starts before catching up.
pub const REWIND_MS: i64 = 60_000;

pub const MIN_SCALE: f64 = 0.4;

const SCALE_RAMP_END: f64 = 0.4;
const OPACITY_RAMP_END: f64 = 0.25;
const OVERLAY_FADE_START: f64 = 0.2;
const OVERLAY_FADE_END: f64 = 0.35;
const TIME_RAMP_START: f64 = 0.2;
const TIME_RAMP_SPAN: f64 = 0.6;
const CAPTION_THRESHOLD: f64 = 0.7;
const GLOW_RAMP_END: f64 = 0.5;

const GLOW_COLOR: (u8, u8, u8) = (14, 165, 233);

/// Where the showcase section is, in the same unit as the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseInput {
    /// Top edge relative to the top of the viewport; negative once scrolled past.
    pub top: f64,
    pub showcase_height: f64,
    pub viewport_height: f64,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub visible: bool,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: Rgba,
}

impl Shadow {
    fn to_css(self) -> String {
        format!(
            "{}px {}px {}px {}px {}",
            self.offset_x, self.offset_y, self.blur, self.spread, self.color
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub intensity: f64,
}

impl Glow {
    /// Outer glow, drop shadow and hairline ring, each scaling with intensity.
    pub fn layers(self) -> [Shadow; 3] {
        let i = self.intensity;
        let (r, g, b) = GLOW_COLOR;
        [
            Shadow {
                offset_x: 0.0,
                offset_y: 0.0,
                blur: 80.0 * i,
                spread: 0.0,
                color: Rgba::with_alpha(r, g, b, 0.15 * i),
            },
            Shadow {
                offset_x: 0.0,
                offset_y: 20.0 * i,
                blur: 60.0 * i,
                spread: 0.0,
                color: Rgba::with_alpha(0, 0, 0, 0.5 * i),
            },
            Shadow {
                offset_x: 0.0,
                offset_y: 0.0,
                blur: 0.0,
                spread: 1.0,
                color: Rgba::with_alpha(255, 255, 255, 0.06 * i),
            },
        ]
    }

    /// `box-shadow` value for the watch face.
    pub fn to_css(self) -> String {
        self.layers()
            .iter()
            .map(|shadow| shadow.to_css())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseFrame {
    pub progress: f64,
    pub scale: f64,
    pub opacity: f64,
    pub overlay: Overlay,
    pub displayed_time: DateTime<Utc>,
    pub caption_visible: bool,
    pub glow: Glow,
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Clamps to `[0, 1]`, treating NaN as 0.
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fraction of the scrollable span of the section already scrolled past.
pub fn scroll_progress(top: f64, showcase_height: f64, viewport_height: f64) -> f64 {
    let scrollable = showcase_height - viewport_height;
    if scrollable <= 0.0 {
        return if top < 0.0 { 1.0 } else { 0.0 };
    }
    unit(-top / scrollable)
}

/// Clock value shown for a given progress: `now - 60s` at the start of the
/// time ramp, `now` at its end and beyond.
pub fn displayed_time(progress: f64, now: DateTime<Utc>) -> DateTime<Utc> {
    let eased = ease_out_cubic(unit((progress - TIME_RAMP_START) / TIME_RAMP_SPAN));
    #[allow(clippy::cast_possible_truncation)]
    let behind_ms = ((1.0 - eased) * REWIND_MS as f64).round() as i64;
    now - Duration::milliseconds(behind_ms)
}

pub fn derive(input: &ShowcaseInput) -> ShowcaseFrame {
    let progress = scroll_progress(input.top, input.showcase_height, input.viewport_height);

    let scale = ease_out_cubic(unit(progress / SCALE_RAMP_END)).mul_add(1.0 - MIN_SCALE, MIN_SCALE);
    let opacity = unit(progress / OPACITY_RAMP_END);

    let overlay_opacity =
        unit((progress - OVERLAY_FADE_START) / (OVERLAY_FADE_END - OVERLAY_FADE_START));
    let overlay = Overlay {
        visible: overlay_opacity > 0.0,
        opacity: overlay_opacity,
    };

    ShowcaseFrame {
        progress,
        scale,
        opacity,
        overlay,
        displayed_time: displayed_time(progress, input.now),
        caption_visible: progress > CAPTION_THRESHOLD,
        glow: Glow {
            intensity: unit(progress / GLOW_RAMP_END),
        },
    }
}

/// Text shown on the watch face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub time: String,
    pub date: String,
    pub day: String,
}

impl ClockFace {
    /// Formats `at` in the viewer's zone: `"09:41"`, `"2 Jan"`, `"TUE"`.
    pub fn new<Tz: TimeZone>(at: DateTime<Utc>, zone: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let local = at.with_timezone(zone);
        Self {
            time: local.format("%H:%M").to_string(),
            date: local.format("%-d %b").to_string(),
            day: local.format("%a").to_string().to_uppercase(),
        }
    }
}
