//! Alarm sequencer and occurrence counter.
//!
//! One alarm is six timed stages (three repetitions of two):
//!
//! | Stage | Tone           | LEDs          |
//! |-------|----------------|---------------|
//! | even  | [`Tone::Low`]  | all off       |
//! | odd   | [`Tone::High`] | all red (cap) |
//!
//! followed by silence and a cleared matrix. The sequencer is a state
//! machine advanced by the caller's clock: [`AlarmSequencer::trigger`]
//! enters stage 0, [`AlarmSequencer::poll`] reports stage changes and the
//! deadline to wait for, and reports [`AlarmStep::Done`] exactly once per
//! sequence, which is where the [`AlarmCounter`] is incremented.
//!
//! # Blocking
//!
//! Both control loops (firmware and simulator) drive a triggered sequence to
//! completion before starting the next iteration. For ~600 ms no button is
//! polled and no sample is taken. There is also no cooldown: if the room is
//! still loud on the next iteration the alarm fires again.

use crate::config::{ALARM_STAGE_COUNT, ALARM_STAGE_MS, ALARM_STAGES_PER_REPETITION};
use crate::leds::LedFrame;
use crate::tone::Tone;

// =============================================================================
// Alarm Counter
// =============================================================================

/// Number of completed alarm sequences since boot.
///
/// Monotonic, never reset, lost on power-off.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmCounter(u32);

impl AlarmCounter {
    pub const fn new() -> Self { Self(0) }

    /// Current count.
    #[inline]
    pub const fn get(&self) -> u32 { self.0 }

    #[inline]
    fn increment(&mut self) { self.0 = self.0.saturating_add(1); }
}

// =============================================================================
// Stages
// =============================================================================

/// One stage of the alarm sequence (index `0..ALARM_STAGE_COUNT`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmStage(u8);

impl AlarmStage {
    /// Stage position in the sequence.
    #[inline]
    pub const fn index(self) -> usize { self.0 as usize }

    /// Which repetition (0-based) this stage belongs to.
    #[inline]
    pub const fn repetition(self) -> usize { self.index() / ALARM_STAGES_PER_REPETITION }

    /// Tone to play during this stage.
    #[inline]
    pub const fn tone(self) -> Tone {
        if self.index().is_multiple_of(ALARM_STAGES_PER_REPETITION) {
            Tone::Low
        } else {
            Tone::High
        }
    }

    /// LED frame to show during this stage.
    #[inline]
    pub const fn leds(self) -> LedFrame {
        match self.tone() {
            Tone::Low => LedFrame::off(),
            Tone::High => LedFrame::alarm_red(),
        }
    }

    const fn next(self) -> Option<Self> {
        if self.index() + 1 < ALARM_STAGE_COUNT {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }
}

// =============================================================================
// Sequencer
// =============================================================================

/// What the driver should do after a [`AlarmSequencer::poll`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmStep {
    /// A new stage begins now: play its tone and show its LEDs.
    Stage(AlarmStage),
    /// The current stage runs until `until_ms`.
    Hold { until_ms: u64 },
    /// The last stage ended: silence the buzzer and clear the LEDs.
    /// The counter has been incremented.
    Done,
    /// No sequence in progress.
    Idle,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Idle,
    Running { stage: AlarmStage, deadline_ms: u64 },
}

/// Timed stage machine for one alarm at a time.
#[derive(Clone, Copy, Debug)]
pub struct AlarmSequencer {
    state: State,
}

impl AlarmSequencer {
    pub const fn new() -> Self { Self { state: State::Idle } }

    /// Start a new sequence at `now_ms` and return its first stage.
    ///
    /// Triggering while a sequence runs restarts it from stage 0; the
    /// interrupted sequence is not counted.
    pub fn trigger(
        &mut self,
        now_ms: u64,
    ) -> AlarmStage {
        let stage = AlarmStage(0);
        self.state = State::Running {
            stage,
            deadline_ms: now_ms + ALARM_STAGE_MS,
        };
        stage
    }

    /// Advance the sequence to `now_ms`.
    ///
    /// Stages are never skipped: if the caller polls late, the next stage
    /// starts at `now_ms` and gets its full duration.
    pub fn poll(
        &mut self,
        now_ms: u64,
        counter: &mut AlarmCounter,
    ) -> AlarmStep {
        match self.state {
            State::Idle => AlarmStep::Idle,
            State::Running { deadline_ms, .. } if now_ms < deadline_ms => AlarmStep::Hold { until_ms: deadline_ms },
            State::Running { stage, .. } => match stage.next() {
                Some(next) => {
                    self.state = State::Running {
                        stage: next,
                        deadline_ms: now_ms + ALARM_STAGE_MS,
                    };
                    AlarmStep::Stage(next)
                }
                None => {
                    self.state = State::Idle;
                    counter.increment();
                    AlarmStep::Done
                }
            },
        }
    }

    /// Frame the matrix shows once a sequence is [`AlarmStep::Done`]. The
    /// buzzer is silenced at the same time.
    #[inline]
    pub const fn finish_leds() -> LedFrame { LedFrame::off() }

    /// Whether a sequence is in progress.
    #[cfg(test)]
    const fn is_running(&self) -> bool { matches!(self.state, State::Running { .. }) }

    /// Stage currently playing, if any.
    #[cfg(test)]
    const fn current_stage(&self) -> Option<AlarmStage> {
        match self.state {
            State::Running { stage, .. } => Some(stage),
            State::Idle => None,
        }
    }
}

impl Default for AlarmSequencer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
