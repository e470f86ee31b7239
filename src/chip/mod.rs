//! Chip family calibrations
//!
//! Every supported chip family implements [`crate::TimingStrategy`]. The family
//! used by [`Target`] is picked with a cargo feature, so the hot loop is
//! monomorphized for exactly one calibration.

mod esp32;
mod esp32s3;
mod esp8266;

pub use esp32::Esp32;
pub use esp32s3::{Esp32S3, Esp32S3FixedLoop};
pub use esp8266::Esp8266;

use crate::timing::{Cycles, MIN_TICKS, Phase, TimingProfile, cycles_to_nanos, nanos_to_cycles};

#[cfg(not(any(feature = "esp32", feature = "esp32s3", feature = "esp8266")))]
compile_error!("select a chip family feature: `esp32`, `esp32s3` or `esp8266`");

#[cfg(any(
    all(feature = "esp32", feature = "esp32s3"),
    all(feature = "esp32", feature = "esp8266"),
    all(feature = "esp32s3", feature = "esp8266"),
))]
compile_error!("only one chip family feature can be enabled");

#[cfg(all(feature = "fixed-loop", not(feature = "esp32s3")))]
compile_error!("`fixed-loop` calibration data only exists for `esp32s3`");

/// Calibration of the chip selected at build time
#[cfg(feature = "esp32")]
pub type Target = Esp32;

/// Calibration of the chip selected at build time
#[cfg(all(feature = "esp32s3", not(feature = "fixed-loop")))]
pub type Target = Esp32S3;

/// Calibration of the chip selected at build time
#[cfg(all(feature = "esp32s3", feature = "fixed-loop"))]
pub type Target = Esp32S3FixedLoop;

/// Calibration of the chip selected at build time
#[cfg(feature = "esp8266")]
pub type Target = Esp8266;

/// Extra busy-wait overhead observed at low clock rates
///
/// Added to the base overhead when the clock is at or below `max_mhz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowClockCorrection {
    pub max_mhz: u32,
    pub one_high: i32,
    pub one_low: i32,
    pub zero_high: i32,
    pub zero_low: i32,
}

impl LowClockCorrection {
    pub const fn get(&self, phase: Phase) -> i32 {
        match phase {
            Phase::OneHigh => self.one_high,
            Phase::OneLow => self.one_low,
            Phase::ZeroHigh => self.zero_high,
            Phase::ZeroLow => self.zero_low,
        }
    }
}

/// Calibration data of a cycle-counter polling busy-wait
///
/// `overhead` holds the cycles the polling loop itself spends around each
/// pulse (register write, counter reads, compare and branch). These are
/// measured values tied to the emitter's instruction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleCalibration {
    pub overhead: TimingProfile<Cycles>,
    pub low_clock: Option<LowClockCorrection>,
}

impl CycleCalibration {
    /// Loop overhead in cycles for a phase at the given clock
    pub const fn overhead(&self, phase: Phase, frequency_mhz: u32) -> u32 {
        let base = self.overhead.get(phase);
        match self.low_clock {
            Some(correction) if frequency_mhz <= correction.max_mhz => {
                base.saturating_add_signed(correction.get(phase))
            }
            _ => base,
        }
    }

    /// Cycles to busy-wait so a pulse lasts its nominal width
    pub const fn ticks(&self, phase: Phase, frequency_mhz: u32) -> u32 {
        let ticks = nanos_to_cycles(phase.target_ns(), frequency_mhz)
            .saturating_sub(self.overhead(phase, frequency_mhz));
        if ticks < MIN_TICKS { MIN_TICKS } else { ticks }
    }

    pub fn calibrate(&self, frequency_mhz: u32) -> TimingProfile<Cycles> {
        TimingProfile::from_fn(|phase| self.ticks(phase, frequency_mhz))
    }

    /// Wall time of a pulse, loop overhead included
    pub const fn to_nanos(&self, phase: Phase, ticks: u32, frequency_mhz: u32) -> u32 {
        cycles_to_nanos(
            ticks.saturating_add(self.overhead(phase, frequency_mhz)),
            frequency_mhz,
        )
    }
}
