//! Timing for the simulator loop.
//!
//! The core crate keeps its timings as plain milliseconds for the embassy
//! clock; `thread::sleep` wants a `Duration`.

use std::time::Duration;

use noise_monitor::config::LOOP_INTERVAL_MS;

/// Pause between control-loop iterations.
pub const LOOP_INTERVAL: Duration = Duration::from_millis(LOOP_INTERVAL_MS);
