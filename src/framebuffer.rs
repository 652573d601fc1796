//! Monochrome framebuffer for the 128x64 SSD1306 OLED.
//!
//! Pixels are stored in the controller's native page layout: each byte is a
//! vertical strip of 8 pixels, pages of 128 bytes stacked top to bottom. The
//! buffer can therefore be streamed to the display without conversion.
//!
//! Rendering never touches hardware. Draw into a [`MonoFrameBuffer`], then
//! hand [`MonoFrameBuffer::as_bytes`] to the driver.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Buffer size in bytes (1 bit per pixel).
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Number of 8-pixel pages.
pub const PAGES: usize = HEIGHT / 8;

/// Full-screen 1-bpp framebuffer.
#[derive(Clone, PartialEq, Eq)]
pub struct MonoFrameBuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl MonoFrameBuffer {
    /// Create a cleared framebuffer.
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; BUFFER_SIZE],
        }
    }

    /// Raw bytes in SSD1306 page order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.buffer }

    /// One 128-byte page.
    #[inline]
    pub fn page(
        &self,
        page: usize,
    ) -> &[u8] {
        &self.buffer[page * WIDTH..(page + 1) * WIDTH]
    }

    /// Read back a pixel. Out-of-bounds coordinates read as off.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> BinaryColor {
        match Self::locate(x, y) {
            Some((idx, mask)) if self.buffer[idx] & mask != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    /// Number of lit pixels.
    #[cfg(test)]
    pub(crate) fn lit_pixels(&self) -> u32 { self.buffer.iter().map(|b| b.count_ones()).sum() }

    #[inline]
    fn locate(
        x: i32,
        y: i32,
    ) -> Option<(usize, u8)> {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let (x, y) = (x as usize, y as usize);
            Some((x + (y / 8) * WIDTH, 1 << (y % 8)))
        } else {
            None
        }
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: BinaryColor,
    ) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            match color {
                BinaryColor::On => self.buffer[idx] |= mask,
                BinaryColor::Off => self.buffer[idx] &= !mask,
            }
        }
    }
}

impl Default for MonoFrameBuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for MonoFrameBuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for MonoFrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }
        for y in drawable_area.rows() {
            for x in drawable_area.columns() {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let fill = match color {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        };
        self.buffer.fill(fill);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;

    #[test]
    fn test_new_is_blank() {
        let fb = MonoFrameBuffer::new();
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.as_bytes().len(), 1024);
    }

    #[test]
    fn test_page_layout() {
        let mut fb = MonoFrameBuffer::new();
        fb.set_pixel(0, 0, BinaryColor::On);
        fb.set_pixel(5, 9, BinaryColor::On);
        fb.set_pixel(127, 63, BinaryColor::On);
        assert_eq!(fb.as_bytes()[0], 0b0000_0001);
        assert_eq!(fb.as_bytes()[128 + 5], 0b0000_0010);
        assert_eq!(fb.as_bytes()[BUFFER_SIZE - 1], 0b1000_0000);
        assert_eq!(fb.page(1)[5], 0b0000_0010);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut fb = MonoFrameBuffer::new();
        fb.set_pixel(-1, 0, BinaryColor::On);
        fb.set_pixel(0, 64, BinaryColor::On);
        fb.set_pixel(128, 10, BinaryColor::On);
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.pixel(500, 500), BinaryColor::Off);
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut fb = MonoFrameBuffer::new();
        Rectangle::new(Point::new(120, 60), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .ok();
        assert_eq!(fb.lit_pixels(), 8 * 4);
        assert_eq!(fb.pixel(127, 63), BinaryColor::On);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut fb = MonoFrameBuffer::new();
        fb.clear(BinaryColor::On).ok();
        assert_eq!(fb.lit_pixels(), 128 * 64);
        fb.clear(BinaryColor::Off).ok();
        assert_eq!(fb.lit_pixels(), 0);
    }
}
