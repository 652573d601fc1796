//! Startup errors.
//!
//! Once running, the monitor has no failure paths: every reading is valid,
//! and mode resolution, brightness mapping and alarm counting are total.
//! What can fail is claiming hardware at boot. Those failures are fatal; the
//! firmware reports them over defmt and halts instead of running with
//! unclaimed peripherals.

use core::fmt;

/// Hardware resource that could not be claimed at boot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// The OLED acknowledged neither its primary nor its alternate address.
    Display,
}

impl fmt::Display for StartupError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Display => f.write_str("OLED display did not respond"),
        }
    }
}

/// Claim a resource from the primary pool, falling back to the secondary
/// pool exactly once.
///
/// `claim` is tried with `pools[0]`, then `pools[1]`. Returns `error` when
/// both are exhausted.
pub fn acquire_with_fallback<P, T>(
    pools: [P; 2],
    mut claim: impl FnMut(P) -> Option<T>,
    error: StartupError,
) -> Result<T, StartupError> {
    let [primary, secondary] = pools;
    claim(primary).or_else(|| claim(secondary)).ok_or(error)
}
