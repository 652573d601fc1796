//! Operating mode selection.
//!
//! Two independent flags, each flipped by its own button:
//!
//! - Button A: `monitoring_enabled`
//! - Button B: `showing_alarm_count`
//!
//! The flags are orthogonal switches rather than one state machine. The
//! active [`Mode`] is resolved by strict priority each loop iteration.

/// Mode resolved from [`ModeFlags`] for one loop iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Alarm counter on the OLED. No sampling, no alarm detection.
    AlarmCountDisplay,

    /// Live level on the OLED and LEDs, alarm on loud sound.
    Monitoring,

    /// Static message, LEDs dark.
    Off,
}

impl Mode {
    /// Whether the microphone is read in this mode.
    #[inline]
    pub const fn samples_sensor(self) -> bool { matches!(self, Self::Monitoring) }

    /// Short label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AlarmCountDisplay => "alarm-count",
            Self::Monitoring => "monitoring",
            Self::Off => "off",
        }
    }
}

/// The two user-controlled flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags {
    pub monitoring_enabled: bool,
    pub showing_alarm_count: bool,
}

impl ModeFlags {
    /// Boot state: monitoring on, counter hidden.
    pub const fn new() -> Self {
        Self {
            monitoring_enabled: true,
            showing_alarm_count: false,
        }
    }

    /// Flip `monitoring_enabled` (button A).
    #[inline]
    pub fn toggle_monitoring(&mut self) { self.monitoring_enabled = !self.monitoring_enabled; }

    /// Flip `showing_alarm_count` (button B).
    #[inline]
    pub fn toggle_alarm_count(&mut self) { self.showing_alarm_count = !self.showing_alarm_count; }

    /// Resolve the active mode: alarm count beats monitoring beats off.
    pub const fn resolve(&self) -> Mode {
        if self.showing_alarm_count {
            Mode::AlarmCountDisplay
        } else if self.monitoring_enabled {
            Mode::Monitoring
        } else {
            Mode::Off
        }
    }
}

impl Default for ModeFlags {
    fn default() -> Self { Self::new() }
}
