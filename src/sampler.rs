//! Microphone sampling.
//!
//! The microphone module outputs an analog level that is read by the 12-bit
//! converter. A reading is the raw code plus the voltage derived from it.
//! There is no filtering or averaging: the voltage is a pure function of the
//! code.

use crate::config::{ADC_MAX, THRESHOLD_VOLTAGE, VREF};

/// One converter sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReading {
    /// Raw converter code in `0..=ADC_MAX`.
    pub raw: u16,
    /// `raw * VREF / ADC_MAX`.
    pub voltage: f32,
}

impl SampleReading {
    /// Build a reading from a raw converter code.
    #[inline]
    pub fn from_raw(raw: u16) -> Self {
        Self {
            raw,
            voltage: voltage(raw),
        }
    }

    /// Whether this reading is loud enough to trigger the alarm.
    #[inline]
    pub fn exceeds_threshold(&self) -> bool { self.voltage > THRESHOLD_VOLTAGE }
}

/// Convert a raw converter code to volts.
#[inline]
pub fn voltage(raw: u16) -> f32 { f32::from(raw) * VREF / f32::from(ADC_MAX) }

/// Source of raw microphone codes.
///
/// The firmware reads the ADC synchronously; the simulator and the tests
/// supply synthetic codes.
pub trait Sampler {
    /// Read one raw code. Always within `0..=ADC_MAX` on real hardware.
    fn read_raw(&mut self) -> u16;

    /// Read one code and convert it.
    fn read(&mut self) -> SampleReading { SampleReading::from_raw(self.read_raw()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u16);

    impl Sampler for Fixed {
        fn read_raw(&mut self) -> u16 { self.0 }
    }

    #[test]
    fn test_voltage_endpoints() {
        assert_eq!(voltage(0), 0.0);
        assert!((voltage(ADC_MAX) - 3.3).abs() < 1e-6);
    }

    #[test]
    fn test_voltage_is_linear_in_raw() {
        for raw in (0..=ADC_MAX).step_by(13) {
            let expected = raw as f32 * 3.3 / 4095.0;
            assert_eq!(voltage(raw), expected, "raw {raw}");
        }
    }

    #[test]
    fn test_voltage_is_deterministic() {
        let a = SampleReading::from_raw(2048);
        let b = SampleReading::from_raw(2048);
        assert_eq!(a, b);
    }

    #[test]
    fn test_threshold_crossing() {
        assert!(!SampleReading::from_raw(0).exceeds_threshold());
        assert!(SampleReading::from_raw(ADC_MAX).exceeds_threshold());
        // 1.68 V sits at code ~2085
        assert!(!SampleReading::from_raw(2084).exceeds_threshold());
        assert!(SampleReading::from_raw(2086).exceeds_threshold());
    }

    #[test]
    fn test_sampler_read_converts() {
        let mut mic = Fixed(ADC_MAX);
        let reading = mic.read();
        assert_eq!(reading.raw, ADC_MAX);
        assert!((reading.voltage - 3.3).abs() < 1e-6);
    }
}
