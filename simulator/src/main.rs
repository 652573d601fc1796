//! Quiet-zone Noise Monitor Simulator for Desktop.
//!
//! Runs the same control loop as the firmware against a keyboard-driven
//! microphone, drawing the OLED and LED matrix with embedded-graphics-simulator.
//!
//! # Keys
//!
//! - **A**: Button A (hold to press), toggles monitoring
//! - **B**: Button B (hold to press), toggles the alarm counter screen
//! - **Up / Down**: Raise or lower the ambient level
//! - **Space**: Hold for a loud burst
//! - **Esc**: Quit

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod buzzer;
mod microphone;
mod panel;
mod timing;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use noise_monitor::render::render;
use noise_monitor::{AlarmSequencer, AlarmStep, ButtonLevels, Mode, MonoFrameBuffer, Monitor, ToneOutput};
use tracing::{debug, info};

use crate::buzzer::LogBuzzer;
use crate::microphone::SimMicrophone;
use crate::panel::{PANEL_SIZE, draw_leds, draw_oled};
use crate::timing::LOOP_INTERVAL;

/// Milliseconds since the simulator started.
#[inline]
fn elapsed_ms(start: Instant) -> u64 { start.elapsed().as_millis() as u64 }

/// Play one alarm sequence to completion, blocking the loop like the firmware.
fn run_alarm(
    start: Instant,
    sequencer: &mut AlarmSequencer,
    monitor: &mut Monitor,
    buzzer: &mut LogBuzzer,
    display: &mut SimulatorDisplay<Rgb888>,
    window: &mut Window,
) {
    let first = sequencer.trigger(elapsed_ms(start));
    buzzer.play(first.tone());
    draw_leds(display, &first.leds());
    window.update(display);

    loop {
        match sequencer.poll(elapsed_ms(start), monitor.alarms_mut()) {
            AlarmStep::Stage(stage) => {
                debug!(stage = stage.index(), repetition = stage.repetition(), "alarm stage");
                buzzer.play(stage.tone());
                draw_leds(display, &stage.leds());
                window.update(display);
            }
            AlarmStep::Hold { until_ms } => {
                thread::sleep(Duration::from_millis(until_ms.saturating_sub(elapsed_ms(start))));
            }
            AlarmStep::Done | AlarmStep::Idle => break,
        }
    }

    buzzer.silence();
    draw_leds(display, &AlarmSequencer::finish_leds());
    window.update(display);
}

fn main() {
    tracing_subscriber::fmt().with_target(false).with_max_level(tracing::Level::DEBUG).init();

    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(PANEL_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(3).build();
    let mut window = Window::new("Noise Monitor Sim", &output_settings);

    display.clear(Rgb888::BLACK).ok();
    window.update(&display);

    let start = Instant::now();
    let mut microphone = SimMicrophone::new();
    let mut buzzer = LogBuzzer::default();
    let mut monitor = Monitor::new();
    let mut sequencer = AlarmSequencer::new();
    let mut frame = MonoFrameBuffer::new();
    let mut buttons = ButtonLevels::default();
    let mut last_mode: Option<Mode> = None;

    info!("simulator started");

    loop {
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => match keycode {
                    Keycode::Escape => return,
                    Keycode::A => buttons.a = true,
                    Keycode::B => buttons.b = true,
                    Keycode::Space => microphone.set_burst(true),
                    Keycode::Up if !repeat => {
                        microphone.louder();
                        debug!(ambient = microphone.ambient(), "level up");
                    }
                    Keycode::Down if !repeat => {
                        microphone.quieter();
                        debug!(ambient = microphone.ambient(), "level down");
                    }
                    _ => {}
                },
                SimulatorEvent::KeyUp { keycode, .. } => match keycode {
                    Keycode::A => buttons.a = false,
                    Keycode::B => buttons.b = false,
                    Keycode::Space => microphone.set_burst(false),
                    _ => {}
                },
                _ => {}
            }
        }

        let tick = monitor.step(buttons, elapsed_ms(start), &mut microphone);

        if last_mode != Some(tick.mode) {
            info!(mode = tick.mode.label(), "mode changed");
            last_mode = Some(tick.mode);
        }

        render(&tick.display, &mut frame);
        draw_oled(&mut display, &frame);
        if let Some(leds) = tick.leds {
            draw_leds(&mut display, &leds);
        }
        window.update(&display);

        if tick.alarm {
            if let Some(reading) = tick.reading {
                info!(raw = reading.raw, voltage = reading.voltage, "threshold exceeded");
            }
            run_alarm(start, &mut sequencer, &mut monitor, &mut buzzer, &mut display, &mut window);
            info!(count = monitor.alarm_count(), "alarm complete");
        }

        thread::sleep(LOOP_INTERVAL);
    }
}
