//! Compile-time configuration for the noise monitor.
//!
//! The device has no persisted or runtime-adjustable settings. Every tunable
//! is a `const`, and related values are checked with `const` assertions so a
//! bad edit fails the build instead of misbehaving on the bench.

// =============================================================================
// Microphone / ADC
// =============================================================================

/// Maximum code of the 12-bit converter (R).
pub const ADC_MAX: u16 = 4095;

/// Converter reference voltage.
pub const VREF: f32 = 3.3;

/// Voltage above which the alarm sequence is triggered.
/// Roughly the midpoint of the microphone module's output swing.
pub const THRESHOLD_VOLTAGE: f32 = 1.68;

const _: () = assert!(THRESHOLD_VOLTAGE > 0.0 && THRESHOLD_VOLTAGE < VREF);

// =============================================================================
// Timing
// =============================================================================

/// Delay between the end of one loop iteration and the start of the next.
pub const LOOP_INTERVAL_MS: u64 = 100;

/// Settle time after a button release before another press is accepted.
pub const DEBOUNCE_SETTLE_MS: u64 = 20;

// =============================================================================
// Alarm Sequence
// =============================================================================

/// Number of low/high repetitions in one alarm.
pub const ALARM_REPETITIONS: usize = 3;

/// Stages per repetition (low tone + LEDs off, high tone + LEDs red).
pub const ALARM_STAGES_PER_REPETITION: usize = 2;

/// Total stages in one alarm sequence.
pub const ALARM_STAGE_COUNT: usize = ALARM_REPETITIONS * ALARM_STAGES_PER_REPETITION;

/// Duration of each alarm stage.
pub const ALARM_STAGE_MS: u64 = 100;

/// Tone of the first stage of each repetition.
pub const ALARM_LOW_TONE_HZ: u32 = 400;

/// Tone of the second stage of each repetition.
pub const ALARM_HIGH_TONE_HZ: u32 = 600;

/// Frequency the buzzer slice is configured for at boot (output silent).
pub const IDLE_TONE_HZ: u32 = 1000;

const _: () = assert!(ALARM_LOW_TONE_HZ < ALARM_HIGH_TONE_HZ);

// =============================================================================
// LED Matrix
// =============================================================================

/// Number of addressable cells in the 5x5 matrix.
pub const LED_COUNT: usize = 25;

/// Cells per matrix row.
pub const LED_COLUMNS: usize = 5;

/// Uniform brightness cap applied to every channel at write time (percent).
pub const MAX_BRIGHTNESS_PERCENT: u16 = 10;

const _: () = assert!(LED_COLUMNS * LED_COLUMNS == LED_COUNT);
const _: () = assert!(MAX_BRIGHTNESS_PERCENT <= 100);

// =============================================================================
// OLED Layout
// =============================================================================

/// Display width in pixels (SSD1306 128x64).
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Width of the level bar at full scale.
pub const BAR_MAX_WIDTH: u32 = SCREEN_WIDTH;

/// Top edge of the level bar.
pub const BAR_TOP: i32 = 24;

/// Height of the level bar.
pub const BAR_HEIGHT: u32 = 10;

/// Top edge of the first text row.
pub const TEXT_ROW_0: i32 = 0;

/// Top edge of the second text row.
pub const TEXT_ROW_1: i32 = 11;

const _: () = assert!(SCREEN_HEIGHT % 8 == 0);
const _: () = assert!(BAR_TOP as u32 + BAR_HEIGHT <= SCREEN_HEIGHT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_sequence_length() {
        assert_eq!(ALARM_STAGE_COUNT, 6);
        assert_eq!(ALARM_STAGE_COUNT as u64 * ALARM_STAGE_MS, 600);
    }

    #[test]
    fn test_threshold_is_midpoint_of_swing() {
        assert!((THRESHOLD_VOLTAGE - VREF / 2.0).abs() < 0.05);
    }
}
