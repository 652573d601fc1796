//! Minimal blocking SSD1306 driver (128x64, I2C).
//!
//! The driver only knows how to initialize the controller and stream a
//! complete [`MonoFrameBuffer`] to it. All drawing happens in the framebuffer
//! beforehand, so every flush is a full-frame update.
//!
//! # Protocol
//!
//! Each I2C write starts with a control byte: `0x00` for a command stream,
//! `0x40` for display RAM data. Horizontal addressing mode is selected at init
//! so one data stream per page fills the panel left to right, top to bottom.

use embedded_hal::i2c::I2c;
use noise_monitor::framebuffer::{MonoFrameBuffer, PAGES};

// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

// SSD1306 Commands
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const SET_CLOCK_DIV: u8 = 0xD5;
const SET_MULTIPLEX: u8 = 0xA8;
const SET_DISPLAY_OFFSET: u8 = 0xD3;
const SET_START_LINE: u8 = 0x40;
const CHARGE_PUMP: u8 = 0x8D;
const MEMORY_MODE: u8 = 0x20;
const SEGMENT_REMAP: u8 = 0xA1;
const COM_SCAN_DEC: u8 = 0xC8;
const SET_COM_PINS: u8 = 0xDA;
const SET_CONTRAST: u8 = 0x81;
const SET_PRECHARGE: u8 = 0xD9;
const SET_VCOM_DETECT: u8 = 0xDB;
const DISPLAY_RAM: u8 = 0xA4;
const NORMAL_DISPLAY: u8 = 0xA6;
const COLUMN_ADDR: u8 = 0x21;
const PAGE_ADDR: u8 = 0x22;

const WIDTH: usize = 128;

/// Init sequence for a 128x64 panel with internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    DISPLAY_OFF,
    SET_CLOCK_DIV,
    0x80,
    SET_MULTIPLEX,
    0x3F,
    SET_DISPLAY_OFFSET,
    0x00,
    SET_START_LINE,
    CHARGE_PUMP,
    0x14,
    MEMORY_MODE,
    0x00, // horizontal addressing
    SEGMENT_REMAP,
    COM_SCAN_DEC,
    SET_COM_PINS,
    0x12,
    SET_CONTRAST,
    0xCF,
    SET_PRECHARGE,
    0xF1,
    SET_VCOM_DETECT,
    0x40,
    DISPLAY_RAM,
    NORMAL_DISPLAY,
    DISPLAY_ON,
];

/// SSD1306 on an exclusive I2C bus.
pub struct Ssd1306<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Ssd1306<I> {
    /// Wrap a bus. Nothing is sent until [`Ssd1306::init`].
    pub fn new(i2c: I) -> Self { Self { i2c, address: 0 } }

    /// Send the init sequence to `address` and clear the panel.
    ///
    /// On success the driver keeps using `address`.
    pub fn init(
        &mut self,
        address: u8,
    ) -> Result<(), I::Error> {
        self.address = address;
        self.write_commands(INIT_SEQUENCE)?;
        self.flush(&MonoFrameBuffer::new())
    }

    /// Address the driver is talking to.
    #[inline]
    pub const fn address(&self) -> u8 { self.address }

    /// Stream a full frame to display RAM.
    pub fn flush(
        &mut self,
        frame: &MonoFrameBuffer,
    ) -> Result<(), I::Error> {
        self.write_commands(&[COLUMN_ADDR, 0, (WIDTH - 1) as u8, PAGE_ADDR, 0, (PAGES - 1) as u8])?;

        let mut chunk = [0u8; WIDTH + 1];
        chunk[0] = CONTROL_DATA;
        for page in 0..PAGES {
            chunk[1..].copy_from_slice(frame.page(page));
            self.i2c.write(self.address, &chunk)?;
        }
        Ok(())
    }

    fn write_commands(
        &mut self,
        commands: &[u8],
    ) -> Result<(), I::Error> {
        // Control byte + longest command list
        let mut buf = [0u8; 32];
        buf[0] = CONTROL_COMMAND;
        for chunk in commands.chunks(buf.len() - 1) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &buf[..=chunk.len()])?;
        }
        Ok(())
    }
}
