//! Button edge detection with release tracking and settle time.
//!
//! Each physical button gets a [`ButtonChannel`]. The channel turns raw
//! levels (already converted from active-low: `true` = pressed) into at most
//! one [`Toggle`] per physical press:
//!
//! ```text
//!   Idle ──press edge──▶ Held ──release──▶ Settling ──20 ms──▶ Idle
//!          (emit Toggle)     (ignore)               (ignore)
//! ```
//!
//! The channel is driven by timestamps rather than a spin-wait, so holding a
//! button never stalls sampling, display refresh, or alarm detection.

use crate::config::DEBOUNCE_SETTLE_MS;

/// A single press event on one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Toggle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// Waiting for an inactive-to-active edge.
    Idle,
    /// Press reported, waiting to observe the release.
    Held,
    /// Release observed at `since_ms`; everything is bounce until it expires.
    Settling { since_ms: u64 },
}

/// Debounce state for one active-low button.
#[derive(Clone, Copy, Debug)]
pub struct ButtonChannel {
    previous: bool,
    phase: Phase,
}

impl ButtonChannel {
    /// Create a channel that assumes the button is released.
    pub const fn new() -> Self {
        Self {
            previous: false,
            phase: Phase::Idle,
        }
    }

    /// Feed the current level and return a toggle on a new press.
    ///
    /// `active` is `true` while the button is held down.
    pub fn poll(
        &mut self,
        active: bool,
        now_ms: u64,
    ) -> Option<Toggle> {
        if let Phase::Settling { since_ms } = self.phase
            && now_ms.saturating_sub(since_ms) >= DEBOUNCE_SETTLE_MS
        {
            // Release was confirmed before settling began
            self.phase = Phase::Idle;
            self.previous = false;
        }

        match self.phase {
            Phase::Idle => {
                let edge = active && !self.previous;
                self.previous = active;
                if edge {
                    self.phase = Phase::Held;
                    return Some(Toggle);
                }
                None
            }
            Phase::Held => {
                if !active {
                    self.phase = Phase::Settling { since_ms: now_ms };
                }
                self.previous = active;
                None
            }
            Phase::Settling { .. } => {
                self.previous = active;
                None
            }
        }
    }

    /// Whether a press has been reported and its release not yet settled.
    #[cfg(test)]
    const fn is_pending_release(&self) -> bool { !matches!(self.phase, Phase::Idle) }
}

impl Default for ButtonChannel {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LOOP_INTERVAL_MS;

    /// Feed `levels` one per `step_ms` and count emitted toggles.
    fn count_toggles(
        channel: &mut ButtonChannel,
        levels: &[bool],
        start_ms: u64,
        step_ms: u64,
    ) -> usize {
        levels
            .iter()
            .enumerate()
            .filter_map(|(i, &level)| channel.poll(level, start_ms + i as u64 * step_ms))
            .count()
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut ch = ButtonChannel::new();
        assert_eq!(count_toggles(&mut ch, &[false; 50], 0, 10), 0);
        assert!(!ch.is_pending_release());
    }

    #[test]
    fn test_single_press_emits_once() {
        let mut ch = ButtonChannel::new();
        assert_eq!(ch.poll(true, 0), Some(Toggle));
        assert!(ch.is_pending_release());
    }

    #[test]
    fn test_long_hold_emits_once() {
        let mut ch = ButtonChannel::new();
        let mut levels = vec![true; 500];
        levels.extend([false; 10]);
        assert_eq!(count_toggles(&mut ch, &levels, 0, 10), 1);
    }

    #[test]
    fn test_press_release_settles_back_to_idle() {
        let mut ch = ButtonChannel::new();
        ch.poll(true, 0);
        ch.poll(false, 100);
        assert!(ch.is_pending_release());
        ch.poll(false, 110);
        assert!(ch.is_pending_release(), "still settling after 10 ms");
        ch.poll(false, 120);
        assert!(!ch.is_pending_release());
    }

    #[test]
    fn test_bounce_after_release_is_ignored() {
        let mut ch = ButtonChannel::new();
        assert_eq!(ch.poll(true, 0), Some(Toggle));
        // Release with contact chatter inside the settle window
        assert_eq!(ch.poll(false, 50), None);
        assert_eq!(ch.poll(true, 52), None);
        assert_eq!(ch.poll(false, 54), None);
        assert_eq!(ch.poll(true, 56), None);
        assert_eq!(ch.poll(false, 60), None);
        // Settled
        assert_eq!(ch.poll(false, 75), None);
        assert_eq!(ch.poll(false, 80), None);
        assert!(!ch.is_pending_release());
    }

    #[test]
    fn test_bounce_on_press_is_ignored() {
        let mut ch = ButtonChannel::new();
        // Chatter right after the first contact: still one press
        let levels = [true, false, true, false, true, true, true];
        assert_eq!(count_toggles(&mut ch, &levels, 0, 1), 1);
    }

    #[test]
    fn test_rapid_repeated_presses_each_emit_once() {
        let mut ch = ButtonChannel::new();
        let mut toggles = 0;
        let mut now = 0;
        for _ in 0..5 {
            // 30 ms press, 30 ms release, sampled every 5 ms
            for _ in 0..6 {
                toggles += ch.poll(true, now).map_or(0, |_| 1);
                now += 5;
            }
            for _ in 0..6 {
                toggles += ch.poll(false, now).map_or(0, |_| 1);
                now += 5;
            }
        }
        assert_eq!(toggles, 5);
    }

    #[test]
    fn test_press_held_through_settle_fires_after_settle() {
        let mut ch = ButtonChannel::new();
        assert_eq!(ch.poll(true, 0), Some(Toggle));
        assert_eq!(ch.poll(false, 100), None);
        // Pressed again within the settle window and held
        assert_eq!(ch.poll(true, 105), None);
        // Settle expires on this poll and the held level counts as a press
        assert_eq!(ch.poll(true, 120), Some(Toggle));
        assert_eq!(ch.poll(true, 130), None);
        assert_eq!(ch.poll(true, 140), None);
    }

    #[test]
    fn test_presses_at_loop_cadence_each_emit_once() {
        let mut ch = ButtonChannel::new();
        let levels = [true, false, true, false, false];
        assert_eq!(count_toggles(&mut ch, &levels, 0, LOOP_INTERVAL_MS), 2);

        // Alternating every iteration for a while
        let mut ch = ButtonChannel::new();
        let levels: Vec<bool> = (0..20).map(|i| i % 2 == 0).collect();
        assert_eq!(count_toggles(&mut ch, &levels, 0, LOOP_INTERVAL_MS), 10);
    }

    #[test]
    fn test_button_held_at_boot_counts_as_press() {
        let mut ch = ButtonChannel::default();
        assert_eq!(ch.poll(true, 0), Some(Toggle));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut a = ButtonChannel::new();
        let mut b = ButtonChannel::new();
        assert_eq!(a.poll(true, 0), Some(Toggle));
        assert_eq!(b.poll(false, 0), None);
        assert_eq!(b.poll(true, 10), Some(Toggle));
        assert_eq!(a.poll(true, 10), None);
    }
}
