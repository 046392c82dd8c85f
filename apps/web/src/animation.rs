/// Share of the remaining distance covered per second of smooth scrolling.
const SCROLL_CATCH_UP_RATE: f64 = 12.0;
const SCROLL_MAX_FRAME_DELTA: f64 = 0.25;
/// Closer than this, in rows, the scroll snaps onto its target.
const SCROLL_SNAP_DISTANCE: f64 = 0.5;

/// Eases the page scroll toward `target`. Returns the new position and the
/// time of this frame; the first frame only records the clock.
pub fn advance_scroll(
    position: f64,
    target: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(SCROLL_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let remaining = target - position;
    if remaining.abs() < SCROLL_SNAP_DISTANCE {
        return (target, Some(now_seconds));
    }

    let step = (delta * SCROLL_CATCH_UP_RATE).min(1.0);
    (remaining.mul_add(step, position), Some(now_seconds))
}

/// Whole row to draw for a fractional scroll position.
pub fn scroll_row(position: f64) -> u16 {
    position.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::{
        advance_scroll, scroll_row, SCROLL_CATCH_UP_RATE, SCROLL_MAX_FRAME_DELTA,
    };

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn first_tick_initializes_time_without_moving() {
        let (position, last_tick) = advance_scroll(10.0, 40.0, None, 3.0);

        assert_close(position, 10.0);
        assert_eq!(last_tick, Some(3.0));
    }

    #[test]
    fn scroll_moves_part_of_the_way() {
        let (position, last_tick) = advance_scroll(0.0, 100.0, Some(1.0), 1.05);

        assert_close(position, 100.0 * 0.05 * SCROLL_CATCH_UP_RATE);
        assert_eq!(last_tick, Some(1.05));
    }

    #[test]
    fn scroll_works_upwards_too() {
        let (position, _) = advance_scroll(100.0, 0.0, Some(1.0), 1.05);
        assert_close(position, 100.0 - 100.0 * 0.05 * SCROLL_CATCH_UP_RATE);
    }

    #[test]
    fn large_frame_gap_is_clamped_and_never_overshoots() {
        let (position, _) = advance_scroll(0.0, 100.0, Some(3.0), 30.0);

        let step = (SCROLL_MAX_FRAME_DELTA * SCROLL_CATCH_UP_RATE).min(1.0);
        assert_close(position, 100.0 * step);
        assert!(position <= 100.0);
    }

    #[test]
    fn backwards_time_does_not_move_the_page() {
        let (position, last_tick) = advance_scroll(20.0, 60.0, Some(10.0), 9.0);

        assert_close(position, 20.0);
        assert_eq!(last_tick, Some(9.0));
    }

    #[test]
    fn close_enough_snaps_onto_the_target() {
        let (position, _) = advance_scroll(39.7, 40.0, Some(1.0), 1.01);
        assert_close(position, 40.0);
        assert_eq!(scroll_row(position), 40);
        assert_eq!(scroll_row(-3.0), 0);
    }
}
