//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible in
//! embedded-graphics 0.8, so every style used on the OLED is built once at
//! compile time instead of on every frame.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_9_POINT, PROFONT_12_POINT};

/// Font for labels and values (6x11 glyph cell).
pub const TEXT_FONT: &MonoFont<'static> = &PROFONT_9_POINT;

/// Larger font for the alarm counter screen.
pub const HEADLINE_FONT: &MonoFont<'static> = &PROFONT_12_POINT;

/// Regular lit text.
pub const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(TEXT_FONT, BinaryColor::On);

/// Alarm counter text.
pub const HEADLINE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(HEADLINE_FONT, BinaryColor::On);

/// Left-aligned, positioned by the top edge of the glyph cell.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Solid fill for the level bar.
pub const BAR_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);
