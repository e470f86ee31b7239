//! ESP32 (Xtensa LX6, dual core)

use super::{CycleCalibration, LowClockCorrection};
use crate::pin::PinLayout;
use crate::timing::{Cycles, Phase, TimingProfile, TimingStrategy};

// Overheads in cycles: one high, one low, zero high, zero low
const CALIBRATION: CycleCalibration = CycleCalibration {
    overhead: TimingProfile::new(15, 25, 15, 28),
    // The zero pulses drift apart at 80 MHz
    low_clock: Some(LowClockCorrection {
        max_mhz: 80,
        one_high: 0,
        one_low: 0,
        zero_high: 2,
        zero_low: -4,
    }),
};

/// ESP32 polling the `CCOUNT` cycle counter
#[derive(Debug, Clone, Copy)]
pub struct Esp32;

impl TimingStrategy for Esp32 {
    type Unit = Cycles;

    const NAME: &'static str = "esp32";
    // GPIO 34..=39 are input only
    const PINS: PinLayout = PinLayout::first(34)
        .without(20, 20)
        .without(24, 24)
        .without(28, 31);
    const SUPPORTED_MHZ: &'static [u32] = &[80, 160, 240];

    fn calibrate(frequency_mhz: u32) -> TimingProfile<Cycles> {
        CALIBRATION.calibrate(frequency_mhz)
    }

    fn to_nanos(phase: Phase, ticks: u32, frequency_mhz: u32) -> u32 {
        CALIBRATION.to_nanos(phase, ticks, frequency_mhz)
    }
}
