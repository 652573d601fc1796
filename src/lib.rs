//! Core logic for the quiet-zone noise monitor.
//!
//! This crate contains the platform-agnostic part of the firmware, shared by
//! the Pico 2 binary (`pico/`) and the desktop simulator (`simulator/`):
//!
//! - [`config`]: Compile-time constants (converter range, threshold, timings)
//! - [`sampler`]: Raw microphone code to voltage conversion
//! - [`debounce`]: Timestamp-driven button edge detection
//! - [`mode`]: Monitoring / alarm-count flags and mode resolution
//! - [`brightness`]: Logarithmic loudness to LED brightness curve
//! - [`leds`]: 25-cell LED matrix frame with brightness cap
//! - [`tone`]: Buzzer tones and PWM wrap calculation
//! - [`alarm`]: Staged alarm sequencer and occurrence counter
//! - [`framebuffer`]: 128x64 monochrome framebuffer (SSD1306 page layout)
//! - [`render`]: Mode-dependent OLED content
//! - [`monitor`]: One control-loop iteration
//! - [`error`]: Startup (hardware claim) errors
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), while the firmware links
//! this crate as `no_std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod alarm;
pub mod brightness;
pub mod config;
pub mod debounce;
pub mod error;
pub mod framebuffer;
pub mod leds;
pub mod mode;
pub mod monitor;
pub mod render;
pub mod sampler;
pub mod styles;
pub mod tone;

// Re-export commonly used items
pub use alarm::{AlarmCounter, AlarmSequencer, AlarmStage, AlarmStep};
pub use debounce::{ButtonChannel, Toggle};
pub use error::StartupError;
pub use framebuffer::MonoFrameBuffer;
pub use leds::LedFrame;
pub use mode::{Mode, ModeFlags};
pub use monitor::{ButtonLevels, Monitor, Tick};
pub use render::DisplayContent;
pub use sampler::{SampleReading, Sampler};
pub use tone::{Tone, ToneOutput};
