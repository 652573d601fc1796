//! Loudness to LED brightness curve.
//!
//! A linear mapping leaves quiet rooms visually dark. The logarithmic curve
//! `ln(1 + 10n) / ln(11)` lifts low levels into visible range while loud
//! levels saturate smoothly toward full scale.

use crate::config::ADC_MAX;

/// Map a raw microphone code to a green-channel brightness.
///
/// Monotonic nondecreasing, `brightness(0) == 0`, `brightness(ADC_MAX) == 255`.
pub fn brightness(raw: u16) -> u8 {
    let normalized = f32::from(raw) / f32::from(ADC_MAX);
    let smoothed = libm::log1pf(normalized * 10.0) / libm::log1pf(10.0);
    libm::roundf(255.0 * smoothed).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(brightness(0), 0);
        assert_eq!(brightness(ADC_MAX), 255);
    }

    #[test]
    fn test_monotonic_over_full_range() {
        let mut prev = brightness(0);
        for raw in 1..=ADC_MAX {
            let b = brightness(raw);
            assert!(b >= prev, "brightness({raw}) = {b} < {prev}");
            prev = b;
        }
    }

    #[test]
    fn test_low_levels_are_visible() {
        // 5% of full scale is already about a quarter of full brightness
        let b = brightness(ADC_MAX / 20);
        assert!(b > 40, "got {b}");
    }

    #[test]
    fn test_midpoint_value() {
        // ln(6) / ln(11) * 255 ~= 190.5
        let b = brightness(2048);
        assert!((189..=192).contains(&b), "got {b}");
    }
}
