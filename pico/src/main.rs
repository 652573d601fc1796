//! Quiet-zone Noise Monitor Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Samples an analog microphone, shows the level on an SSD1306 OLED and a
//! 5x5 WS2812 matrix, and sounds a buzzer + red flash alarm when the level
//! crosses the threshold.
//!
//! # Architecture
//!
//! A single task runs the control loop every 100 ms. All decision logic
//! lives in the `noise_monitor` crate ([`Monitor`], [`AlarmSequencer`]); this
//! binary only owns the peripherals and performs the I/O each tick asks for.
//! There is no other task and no shared state.
//!
//! # Button Controls
//!
//! - **A**: Toggle monitoring on/off
//! - **B**: Toggle the alarm counter screen (takes priority over monitoring)

#![no_std]
#![no_main]

mod buzzer;
mod config;
mod led_matrix;
mod microphone;
mod ssd1306;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Instant, Timer};
use noise_monitor::config::LOOP_INTERVAL_MS;
use noise_monitor::error::acquire_with_fallback;
use noise_monitor::render::render;
use noise_monitor::{
    AlarmSequencer,
    AlarmStep,
    ButtonLevels,
    Mode,
    MonoFrameBuffer,
    Monitor,
    StartupError,
    ToneOutput,
};
use {defmt_rtt as _, panic_probe as _};

use crate::buzzer::Buzzer;
use crate::config::{OLED_ADDRESS, OLED_ADDRESS_ALT, oled_i2c_config};
use crate::led_matrix::LedMatrix;
use crate::microphone::Microphone;
use crate::ssd1306::Ssd1306;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"noise-monitor"),
    embassy_rp::binary_info::rp_program_description!(c"Quiet-zone noise monitor with OLED, LED matrix and buzzer alarm"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Milliseconds since boot, the clock every state machine runs on.
#[inline]
fn now_ms() -> u64 { Instant::now().as_millis() }

/// Play one alarm sequence to completion.
///
/// This blocks the control loop for the whole sequence (~600 ms): buttons
/// and microphone are not polled until it returns. The sequencer increments
/// the alarm counter when the last stage ends.
async fn run_alarm(
    sequencer: &mut AlarmSequencer,
    monitor: &mut Monitor,
    buzzer: &mut Buzzer<'_>,
    leds: &mut LedMatrix<'_>,
) {
    let first = sequencer.trigger(now_ms());
    buzzer.play(first.tone());
    leds.write(&first.leds()).await;

    loop {
        match sequencer.poll(now_ms(), monitor.alarms_mut()) {
            AlarmStep::Stage(stage) => {
                debug!("Alarm stage {} (repetition {}, {})", stage.index(), stage.repetition(), stage.tone());
                buzzer.play(stage.tone());
                leds.write(&stage.leds()).await;
            }
            AlarmStep::Hold { until_ms } => Timer::at(Instant::from_millis(until_ms)).await,
            AlarmStep::Done | AlarmStep::Idle => break,
        }
    }

    buzzer.silence();
    leds.write(&AlarmSequencer::finish_leds()).await;
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Noise monitor starting...");

    let p = embassy_rp::init(Default::default());

    // Microphone on GPIO28 (ADC2)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mic_channel = Channel::new_pin(p.PIN_28, Pull::None);
    let mut microphone = Microphone::new(adc, mic_channel);
    info!("Microphone initialized");

    // Buzzer on GPIO21 (PWM slice 2, channel B), silent until an alarm
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, PwmConfig::default());
    let mut buzzer = Buzzer::new(pwm, clk_sys_freq());
    info!("Buzzer initialized");

    // OLED on I2C1: SDA=14, SCL=15
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, oled_i2c_config());
    let mut oled = Ssd1306::new(i2c);
    if let Err(e) = acquire_with_fallback(
        [OLED_ADDRESS, OLED_ADDRESS_ALT],
        |address| oled.init(address).ok(),
        StartupError::Display,
    ) {
        defmt::panic!("Startup failed: {}", e);
    }
    info!("OLED initialized at {=u8:#x}", oled.address());

    // LED matrix on GPIO7 (PIO0 SM0)
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let ws2812_program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &ws2812_program);
    let mut leds = LedMatrix::new(ws2812);
    leds.clear().await;
    info!("LED matrix initialized");

    // Buttons (active-low with internal pull-up)
    let btn_a = Input::new(p.PIN_5, Pull::Up);
    let btn_b = Input::new(p.PIN_6, Pull::Up);
    info!("Buttons initialized!");

    let mut monitor = Monitor::new();
    let mut sequencer = AlarmSequencer::new();
    let mut frame = MonoFrameBuffer::new();
    let mut last_mode: Option<Mode> = None;

    info!("Main loop starting");

    loop {
        let buttons = ButtonLevels::from_active_low(btn_a.is_high(), btn_b.is_high());
        let tick = monitor.step(buttons, now_ms(), &mut microphone);

        if last_mode != Some(tick.mode) {
            info!("Mode: {}", tick.mode);
            last_mode = Some(tick.mode);
        }

        render(&tick.display, &mut frame);
        if let Err(e) = oled.flush(&frame) {
            warn!("OLED flush failed: {}", e);
        }

        if let Some(led_frame) = tick.leds {
            leds.write(&led_frame).await;
        }

        if tick.alarm {
            if let Some(reading) = tick.reading {
                info!("Threshold exceeded: raw={} voltage={}", reading.raw, reading.voltage);
            }
            run_alarm(&mut sequencer, &mut monitor, &mut buzzer, &mut leds).await;
            info!("Alarm #{} complete", monitor.alarm_count());
        }

        Timer::after_millis(LOOP_INTERVAL_MS).await;
    }
}
