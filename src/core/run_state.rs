//! Active/idle classification against the configured window

use crate::config::ActiveWindow;

/// What the daemon should be doing for the current hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Inside the active window: poll telemetry and render frames.
    Active,
    /// Outside the active window: keep the display blanked.
    Idle,
}

impl RunState {
    /// Classify the current wall-clock hour against the window.
    pub fn classify(hour: u32, window: &ActiveWindow) -> Self {
        if window.contains(hour) {
            RunState::Active
        } else {
            RunState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_boundaries() {
        let window = ActiveWindow::new(8, 23);
        assert_eq!(RunState::classify(8, &window), RunState::Idle);
        assert_eq!(RunState::classify(9, &window), RunState::Active);
        assert_eq!(RunState::classify(23, &window), RunState::Idle);
    }

    #[test]
    fn test_full_day_sweep() {
        let window = ActiveWindow::new(8, 23);
        for hour in 0..24 {
            let expected = if hour > 8 && hour < 23 {
                RunState::Active
            } else {
                RunState::Idle
            };
            assert_eq!(RunState::classify(hour, &window), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_degenerate_window_is_always_idle() {
        for window in [ActiveWindow::new(12, 12), ActiveWindow::new(20, 8)] {
            for hour in 0..24 {
                assert_eq!(RunState::classify(hour, &window), RunState::Idle, "hour {hour}");
            }
        }
    }

    #[test]
    fn test_adjacent_hours_window_has_no_active_hour() {
        // start < h < end with end = start + 1 leaves no qualifying hour
        let window = ActiveWindow::new(10, 11);
        for hour in 0..24 {
            assert_eq!(RunState::classify(hour, &window), RunState::Idle, "hour {hour}");
        }
    }
}
