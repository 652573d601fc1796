//! One iteration of the control loop.
//!
//! [`Monitor`] owns all state that outlives an iteration (mode flags, alarm
//! counter, button channels) and turns one set of inputs into a [`Tick`]: what
//! to draw, what to show on the LEDs, and whether to sound the alarm. The
//! firmware and simulator loops do the I/O around it:
//!
//! ```text
//! buttons ─▶ Monitor::step ─▶ Tick ─▶ OLED + LEDs ─▶ alarm (if set) ─▶ sleep
//!                  │
//!                  └─ Sampler::read (Monitoring only)
//! ```

use crate::alarm::AlarmCounter;
use crate::brightness::brightness;
use crate::debounce::ButtonChannel;
use crate::leds::LedFrame;
use crate::mode::{Mode, ModeFlags};
use crate::render::DisplayContent;
use crate::sampler::{SampleReading, Sampler};

/// Button levels for one iteration (`true` = pressed).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    /// Button A: toggles monitoring.
    pub a: bool,
    /// Button B: toggles the alarm counter screen.
    pub b: bool,
}

impl ButtonLevels {
    /// Build from raw active-low pin levels (`true` = pin high = released).
    #[inline]
    pub const fn from_active_low(
        a_high: bool,
        b_high: bool,
    ) -> Self {
        Self {
            a: !a_high,
            b: !b_high,
        }
    }
}

/// Result of one control-loop iteration.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Tick {
    /// Mode resolved after applying this iteration's button presses.
    pub mode: Mode,
    /// Sample taken this iteration (Monitoring only).
    pub reading: Option<SampleReading>,
    /// OLED content.
    pub display: DisplayContent,
    /// LED frame to flush. `None` leaves the matrix as it is.
    pub leds: Option<LedFrame>,
    /// Sound the alarm sequence after flushing display and LEDs.
    pub alarm: bool,
}

/// State owned by the control loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Monitor {
    flags: ModeFlags,
    alarms: AlarmCounter,
    button_a: ButtonChannel,
    button_b: ButtonChannel,
}

impl Monitor {
    /// Boot state: monitoring enabled, counter at zero.
    pub const fn new() -> Self {
        Self {
            flags: ModeFlags::new(),
            alarms: AlarmCounter::new(),
            button_a: ButtonChannel::new(),
            button_b: ButtonChannel::new(),
        }
    }

    /// Current flags.
    #[inline]
    pub const fn flags(&self) -> ModeFlags { self.flags }

    /// Alarms completed since boot.
    #[inline]
    pub const fn alarm_count(&self) -> u32 { self.alarms.get() }

    /// Counter handle for the alarm sequencer.
    #[inline]
    pub fn alarms_mut(&mut self) -> &mut AlarmCounter { &mut self.alarms }

    /// Run the decision logic of one iteration.
    ///
    /// The microphone is only read when the resolved mode is
    /// [`Mode::Monitoring`]. No cooldown is applied: a loud reading sets
    /// `alarm` on every iteration it is seen, including the one right after a
    /// completed alarm.
    pub fn step<S: Sampler>(
        &mut self,
        buttons: ButtonLevels,
        now_ms: u64,
        sampler: &mut S,
    ) -> Tick {
        if self.button_a.poll(buttons.a, now_ms).is_some() {
            self.flags.toggle_monitoring();
        }
        if self.button_b.poll(buttons.b, now_ms).is_some() {
            self.flags.toggle_alarm_count();
        }

        let mode = self.flags.resolve();
        let reading = mode.samples_sensor().then(|| sampler.read());
        let leds = match (mode, reading) {
            (Mode::AlarmCountDisplay, _) => None,
            (_, Some(reading)) => Some(LedFrame::glow(brightness(reading.raw))),
            (_, None) => Some(LedFrame::off()),
        };

        Tick {
            mode,
            reading,
            display: DisplayContent::for_mode(mode, reading, self.alarms.get()),
            leds,
            alarm: reading.is_some_and(|r| r.exceeds_threshold()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmSequencer, AlarmStep};
    use crate::config::{ADC_MAX, ALARM_STAGE_COUNT, LOOP_INTERVAL_MS};

    /// Sampler returning a fixed code and counting reads.
    struct CountingMic {
        raw: u16,
        reads: usize,
    }

    impl CountingMic {
        fn new(raw: u16) -> Self { Self { raw, reads: 0 } }
    }

    impl Sampler for CountingMic {
        fn read_raw(&mut self) -> u16 {
            self.reads += 1;
            self.raw
        }
    }

    const RELEASED: ButtonLevels = ButtonLevels { a: false, b: false };
    const PRESS_A: ButtonLevels = ButtonLevels { a: true, b: false };
    const PRESS_B: ButtonLevels = ButtonLevels { a: false, b: true };

    /// Drive a triggered alarm to completion, returning stages entered and end time.
    fn play_alarm(
        monitor: &mut Monitor,
        now_ms: u64,
    ) -> (usize, u64) {
        let mut seq = AlarmSequencer::new();
        seq.trigger(now_ms);
        let mut stages = 1;
        let mut now = now_ms;
        loop {
            match seq.poll(now, monitor.alarms_mut()) {
                AlarmStep::Stage(_) => stages += 1,
                AlarmStep::Hold { until_ms } => now = until_ms,
                AlarmStep::Done => return (stages, now),
                AlarmStep::Idle => unreachable!(),
            }
        }
    }

    #[test]
    fn test_active_low_conversion() {
        assert_eq!(ButtonLevels::from_active_low(true, true), RELEASED);
        assert_eq!(ButtonLevels::from_active_low(false, true), PRESS_A);
        assert_eq!(ButtonLevels::from_active_low(true, false), PRESS_B);
    }

    #[test]
    fn test_loud_sample_triggers_one_alarm() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(ADC_MAX);

        let tick = monitor.step(RELEASED, 0, &mut mic);
        assert_eq!(tick.mode, Mode::Monitoring);
        let reading = tick.reading.unwrap();
        assert!((reading.voltage - 3.3).abs() < 1e-6);
        assert!(tick.alarm);

        let before = monitor.alarm_count();
        let (stages, _) = play_alarm(&mut monitor, 0);
        assert_eq!(stages, ALARM_STAGE_COUNT);
        assert_eq!(monitor.alarm_count(), before + 1);
    }

    #[test]
    fn test_silence_does_not_trigger_and_leds_off() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(0);

        let tick = monitor.step(RELEASED, 0, &mut mic);
        assert_eq!(tick.mode, Mode::Monitoring);
        assert_eq!(tick.reading.unwrap().voltage, 0.0);
        assert!(!tick.alarm);
        assert!(tick.leds.unwrap().is_off());
        assert_eq!(monitor.alarm_count(), 0);
    }

    #[test]
    fn test_monitoring_glow_follows_brightness() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(1000);
        let tick = monitor.step(RELEASED, 0, &mut mic);
        assert_eq!(tick.leds, Some(LedFrame::glow(brightness(1000))));
        assert_eq!(tick.display, DisplayContent::level(SampleReading::from_raw(1000)));
    }

    #[test]
    fn test_off_mode_skips_sensor() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(ADC_MAX);

        // Button A turns monitoring off
        let tick = monitor.step(PRESS_A, 0, &mut mic);
        assert_eq!(tick.mode, Mode::Off);
        assert_eq!(tick.display, DisplayContent::Off);
        assert!(tick.leds.unwrap().is_off());
        assert!(!tick.alarm);
        assert_eq!(mic.reads, 0);
        assert!(!monitor.flags().monitoring_enabled);
        assert!(!monitor.flags().showing_alarm_count);
    }

    #[test]
    fn test_alarm_count_mode_skips_sensor_and_alarm() {
        for monitoring_enabled in [true, false] {
            let mut monitor = Monitor::new();
            let mut mic = CountingMic::new(ADC_MAX);
            let mut now = 0;
            if !monitoring_enabled {
                monitor.step(PRESS_A, now, &mut mic);
                now += 100;
                monitor.step(RELEASED, now, &mut mic);
                now += 100;
                monitor.step(RELEASED, now, &mut mic);
                now += 100;
            }
            let reads_before = mic.reads;

            let tick = monitor.step(PRESS_B, now, &mut mic);
            assert_eq!(tick.mode, Mode::AlarmCountDisplay);
            assert_eq!(tick.display, DisplayContent::AlarmCount(0));
            assert_eq!(tick.leds, None);
            assert!(!tick.alarm);
            assert_eq!(mic.reads, reads_before);
            assert_eq!(monitor.flags().monitoring_enabled, monitoring_enabled);
        }
    }

    #[test]
    fn test_held_button_toggles_once_and_loop_keeps_running() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(100);
        let mut now = 0;

        // Hold B for 2 seconds: counter screen stays on, no re-toggle
        for _ in 0..20 {
            let tick = monitor.step(PRESS_B, now, &mut mic);
            assert_eq!(tick.mode, Mode::AlarmCountDisplay);
            now += LOOP_INTERVAL_MS;
        }
        // Release, then after settling the loop samples again
        monitor.step(RELEASED, now, &mut mic);
        now += LOOP_INTERVAL_MS;
        let tick = monitor.step(RELEASED, now, &mut mic);
        assert_eq!(tick.mode, Mode::AlarmCountDisplay);

        now += LOOP_INTERVAL_MS;
        let tick = monitor.step(PRESS_B, now, &mut mic);
        assert_eq!(tick.mode, Mode::Monitoring);
        assert_eq!(mic.reads, 1);
    }

    #[test]
    fn test_counter_screen_shows_completed_alarms() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(ADC_MAX);

        let tick = monitor.step(RELEASED, 0, &mut mic);
        assert!(tick.alarm);
        let (_, end) = play_alarm(&mut monitor, 0);

        let tick = monitor.step(PRESS_B, end + LOOP_INTERVAL_MS, &mut mic);
        assert_eq!(tick.display, DisplayContent::AlarmCount(1));
    }

    #[test]
    fn test_sustained_loud_sound_retriggers_without_cooldown() {
        // The alarm path has no hysteresis or cooldown. A room that stays loud
        // fires a full alarm on every iteration.
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(ADC_MAX);
        let mut now = 0;

        for expected in 1..=3 {
            let tick = monitor.step(RELEASED, now, &mut mic);
            assert!(tick.alarm, "iteration {expected} should alarm");
            let (_, end) = play_alarm(&mut monitor, now);
            assert_eq!(monitor.alarm_count(), expected);
            now = end + LOOP_INTERVAL_MS;
        }
    }

    #[test]
    fn test_quiet_after_alarm_stops_retrigger() {
        let mut monitor = Monitor::new();
        let mut mic = CountingMic::new(ADC_MAX);
        assert!(monitor.step(RELEASED, 0, &mut mic).alarm);
        let (_, end) = play_alarm(&mut monitor, 0);

        mic.raw = 1000;
        let tick = monitor.step(RELEASED, end + LOOP_INTERVAL_MS, &mut mic);
        assert!(!tick.alarm);
        assert_eq!(monitor.alarm_count(), 1);
    }
}
