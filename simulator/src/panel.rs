//! Desktop rendition of the hardware: the OLED on the left, the LED matrix
//! on the right.

use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use noise_monitor::config::{LED_COLUMNS, LED_COUNT, MAX_BRIGHTNESS_PERCENT, SCREEN_HEIGHT, SCREEN_WIDTH};
use noise_monitor::{LedFrame, MonoFrameBuffer};
use smart_leds::RGB8;

/// Gap between the OLED and the matrix.
const GAP: u32 = 8;
/// Side of one LED cell.
const CELL: u32 = 12;
/// Spacing between LED cells.
const CELL_SPACING: u32 = 1;

/// Blue-white of a typical SSD1306 panel.
const OLED_ON: Rgb888 = Rgb888::new(0xC8, 0xE6, 0xFF);
const OLED_OFF: Rgb888 = Rgb888::BLACK;
const LED_BACKGROUND: Rgb888 = Rgb888::new(0x10, 0x10, 0x10);

const MATRIX_LEFT: i32 = (SCREEN_WIDTH + GAP) as i32;
const MATRIX_SIDE: u32 = LED_COLUMNS as u32 * CELL + (LED_COLUMNS as u32 - 1) * CELL_SPACING;

/// Window size holding both panels.
pub const PANEL_SIZE: Size = Size::new(SCREEN_WIDTH + GAP + MATRIX_SIDE, SCREEN_HEIGHT);

const _: () = assert!(MATRIX_SIDE <= SCREEN_HEIGHT, "LED matrix must fit beside the OLED");

/// Undo the brightness cap so the preview is visible on a monitor.
#[inline]
const fn preview(channel: u8) -> u8 {
    let boosted = channel as u32 * 100 / MAX_BRIGHTNESS_PERCENT as u32;
    if boosted > 255 { 255 } else { boosted as u8 }
}

#[inline]
const fn led_color(cell: RGB8) -> Rgb888 { Rgb888::new(preview(cell.r), preview(cell.g), preview(cell.b)) }

/// Copy the OLED framebuffer into the window.
pub fn draw_oled<D>(
    display: &mut D,
    frame: &MonoFrameBuffer,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let pixels = (0..SCREEN_HEIGHT as i32).flat_map(|y| {
        (0..SCREEN_WIDTH as i32).map(move |x| {
            let color = match frame.pixel(x, y) {
                BinaryColor::On => OLED_ON,
                BinaryColor::Off => OLED_OFF,
            };
            Pixel(Point::new(x, y), color)
        })
    });
    display.draw_iter(pixels).ok();
}

/// Draw the 5x5 matrix, row-major from the top-left cell.
pub fn draw_leds<D>(
    display: &mut D,
    frame: &LedFrame,
) where
    D: DrawTarget<Color = Rgb888>,
{
    Rectangle::new(Point::new(MATRIX_LEFT, 0), Size::new(MATRIX_SIDE, MATRIX_SIDE))
        .into_styled(PrimitiveStyle::with_fill(LED_BACKGROUND))
        .draw(display)
        .ok();

    for (index, cell) in frame.cells().iter().enumerate().take(LED_COUNT) {
        let col = (index % LED_COLUMNS) as u32;
        let row = (index / LED_COLUMNS) as u32;
        let origin = Point::new(
            MATRIX_LEFT + (col * (CELL + CELL_SPACING)) as i32,
            (row * (CELL + CELL_SPACING)) as i32,
        );
        Rectangle::new(origin, Size::new_equal(CELL))
            .into_styled(PrimitiveStyle::with_fill(led_color(*cell)))
            .draw(display)
            .ok();
    }
}
