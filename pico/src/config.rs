//! Board wiring and peripheral settings.
//!
//! Pin mapping (Pico 2 footprint, BitDogLab-style carrier):
//! - Microphone: GPIO28 (ADC2)
//! - Buzzer: GPIO21 (PWM slice 2, channel B)
//! - OLED SSD1306: I2C1, SDA GPIO14, SCL GPIO15
//! - LED matrix WS2812 5x5: GPIO7 (PIO0 SM0)
//! - Button A: GPIO5 (active-low, internal pull-up)
//! - Button B: GPIO6 (active-low, internal pull-up)
//!
//! GPIO numbers are fixed by the peripheral singletons taken in `main.rs`;
//! this module only holds the bus and timer settings.

use embassy_rp::i2c::Config as I2cConfig;

/// I2C clock for the OLED.
pub const OLED_I2C_FREQUENCY: u32 = 400_000;

/// SSD1306 address with SA0 tied low (most modules).
pub const OLED_ADDRESS: u8 = 0x3C;

/// SSD1306 address with SA0 tied high.
pub const OLED_ADDRESS_ALT: u8 = 0x3D;

/// Integer PWM clock divider for the buzzer.
///
/// 150 MHz / 64 keeps the 400 Hz wrap value (5858) inside the 16-bit counter.
pub const BUZZER_CLOCK_DIVIDER: u8 = 64;

/// I2C configuration for the OLED.
pub fn oled_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = OLED_I2C_FREQUENCY;
    config
}
