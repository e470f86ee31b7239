//! Bit timing model
//!
//! A WS2812 bit is a high pulse followed by a low pulse. The pulse widths
//! are fixed in wall time, so the number of busy-wait ticks for each pulse
//! depends on the CPU clock and on how the busy-wait is implemented.

use core::marker::PhantomData;

use crate::pin::PinLayout;

/// Accepted deviation from every nominal pulse width, in nanoseconds.
pub const TOLERANCE_NS: u32 = 150;

/// Smallest duration a calibrator hands out.
///
/// Clamping to this value keeps a too-slow clock from wrapping a duration
/// around to a huge tick count.
pub const MIN_TICKS: u32 = 1;

/// Durations counted in CPU cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycles {}

/// Durations counted in fixed busy-loop iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loops {}

/// One of the four pulses of the WS2812 encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    OneHigh,
    OneLow,
    ZeroHigh,
    ZeroLow,
}

impl Phase {
    pub const ALL: [Self; 4] = [Self::OneHigh, Self::OneLow, Self::ZeroHigh, Self::ZeroLow];

    /// Nominal pulse width from the WS2812B datasheet
    pub const fn target_ns(self) -> u32 {
        match self {
            Self::OneHigh => 800,
            Self::OneLow => 450,
            Self::ZeroHigh => 400,
            Self::ZeroLow => 850,
        }
    }

    /// Check a pulse width against the datasheet window
    pub const fn within_tolerance(self, nanos: u32) -> bool {
        nanos.abs_diff(self.target_ns()) <= TOLERANCE_NS
    }
}

/// Calibrated pulse widths, in the unit `U` of the busy-wait consuming them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile<U> {
    pub one_high: u32,
    pub one_low: u32,
    pub zero_high: u32,
    pub zero_low: u32,
    unit: PhantomData<U>,
}

impl<U> TimingProfile<U> {
    pub const fn new(one_high: u32, one_low: u32, zero_high: u32, zero_low: u32) -> Self {
        Self {
            one_high,
            one_low,
            zero_high,
            zero_low,
            unit: PhantomData,
        }
    }

    /// Build a profile by evaluating `ticks` for every phase
    pub fn from_fn(mut ticks: impl FnMut(Phase) -> u32) -> Self {
        Self::new(
            ticks(Phase::OneHigh),
            ticks(Phase::OneLow),
            ticks(Phase::ZeroHigh),
            ticks(Phase::ZeroLow),
        )
    }

    pub const fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::OneHigh => self.one_high,
            Phase::OneLow => self.one_low,
            Phase::ZeroHigh => self.zero_high,
            Phase::ZeroLow => self.zero_low,
        }
    }

    /// High pulse width for a bit value
    #[inline(always)]
    pub const fn high(&self, bit: bool) -> u32 {
        if bit { self.one_high } else { self.zero_high }
    }

    /// Low pulse width for a bit value
    #[inline(always)]
    pub const fn low(&self, bit: bool) -> u32 {
        if bit { self.one_low } else { self.zero_low }
    }
}

/// Per chip family calibration
///
/// Implementations are selected at build time, one per supported chip,
/// see [`crate::chip::Target`].
pub trait TimingStrategy {
    /// Unit of the produced durations
    type Unit;

    /// Human readable chip family
    const NAME: &'static str;

    /// GPIO layout of the chip family
    const PINS: PinLayout;

    /// Clock frequencies the calibration data was measured at
    const SUPPORTED_MHZ: &'static [u32];

    /// Compute the pulse widths for a CPU clock
    ///
    /// Never fails. Frequencies outside [`Self::SUPPORTED_MHZ`] get a
    /// best-effort extrapolation.
    fn calibrate(frequency_mhz: u32) -> TimingProfile<Self::Unit>;

    /// Convert a duration back to the wall time it produces on the wire
    fn to_nanos(phase: Phase, ticks: u32, frequency_mhz: u32) -> u32;

    /// Check whether a frequency has measured calibration data
    fn is_supported(frequency_mhz: u32) -> bool {
        Self::SUPPORTED_MHZ.contains(&frequency_mhz)
    }
}

/// Convert nanoseconds to CPU cycles, rounding to the nearest cycle
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn nanos_to_cycles(nanos: u32, frequency_mhz: u32) -> u32 {
    let cycles = (nanos as u64 * frequency_mhz as u64 + 500) / 1000;
    if cycles > u32::MAX as u64 {
        u32::MAX
    } else {
        cycles as u32
    }
}

/// Convert CPU cycles to nanoseconds, rounding to the nearest nanosecond
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn cycles_to_nanos(cycles: u32, frequency_mhz: u32) -> u32 {
    let frequency_mhz = if frequency_mhz == 0 { 1 } else { frequency_mhz as u64 };
    let nanos = (cycles as u64 * 1000 + frequency_mhz / 2) / frequency_mhz;
    if nanos > u32::MAX as u64 {
        u32::MAX
    } else {
        nanos as u32
    }
}
