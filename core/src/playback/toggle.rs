use crate::prelude::{StageError, StageResult};
use serde::{Deserialize, Serialize};

/// Scheduler tick rate the playback loop toggles against.
pub const REFERENCE_TICK_HZ: f64 = 500.0;

/// Derived timings for scheduling a PWM toggle against the reference tick.
///
/// `offset_s` is how far one toggle period deviates from the tick period;
/// `target_s` is the remaining sleep once the scheduler wait is paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleTiming {
    pub offset_s: f64,
    pub target_s: f64,
}

/// Computes the toggle timings for `tone_hz` given a scheduler wait.
///
/// A non-positive frequency is rejected rather than dividing through.
pub fn toggle_timing(tone_hz: f64, wait_s: f64) -> StageResult<ToggleTiming> {
    if tone_hz <= 0.0 {
        return Err(StageError::InvalidInput(format!(
            "toggle frequency must be positive, got {tone_hz}"
        )));
    }

    let tick_period = 1.0 / REFERENCE_TICK_HZ;
    let offset_s = 1.0 / tone_hz - tick_period;
    let target_s = tick_period - wait_s - offset_s;

    Ok(ToggleTiming { offset_s, target_s })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_timing_matches_closed_form() {
        let timing = toggle_timing(365.0, 0.00004).unwrap();
        let offset = 1.0 / 365.0 - 1.0 / 500.0;
        let target = 1.0 / 500.0 - 0.00004 - offset;
        assert!((timing.offset_s - offset).abs() < 1e-9);
        assert!((timing.target_s - target).abs() < 1e-9);
    }

    #[test]
    fn toggle_timing_rejects_zero_frequency() {
        assert!(matches!(
            toggle_timing(0.0, 0.0),
            Err(StageError::InvalidInput(_))
        ));
    }

    #[test]
    fn toggle_timing_rejects_negative_frequency() {
        assert!(toggle_timing(-100.0, 0.0).is_err());
    }

    #[test]
    fn tick_rate_toggle_has_zero_offset() {
        let timing = toggle_timing(REFERENCE_TICK_HZ, 0.0).unwrap();
        assert!(timing.offset_s.abs() < 1e-12);
        assert!((timing.target_s - 1.0 / REFERENCE_TICK_HZ).abs() < 1e-12);
    }
}
