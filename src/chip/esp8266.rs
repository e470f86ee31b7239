//! ESP8266 (Xtensa L106)

use super::CycleCalibration;
use crate::pin::PinLayout;
use crate::timing::{Cycles, Phase, TimingProfile, TimingStrategy};

// Verified at 80 and 160 MHz
const CALIBRATION: CycleCalibration = CycleCalibration {
    overhead: TimingProfile::new(13, 21, 15, 21),
    low_clock: None,
};

/// ESP8266 polling the `CCOUNT` cycle counter
///
/// Only GPIO 0..=15 live in the set/clear registers; GPIO16 sits in the RTC
/// domain and is rejected.
#[derive(Debug, Clone, Copy)]
pub struct Esp8266;

impl TimingStrategy for Esp8266 {
    type Unit = Cycles;

    const NAME: &'static str = "esp8266";
    const PINS: PinLayout = PinLayout::first(16);
    const SUPPORTED_MHZ: &'static [u32] = &[80, 160];

    fn calibrate(frequency_mhz: u32) -> TimingProfile<Cycles> {
        CALIBRATION.calibrate(frequency_mhz)
    }

    fn to_nanos(phase: Phase, ticks: u32, frequency_mhz: u32) -> u32 {
        CALIBRATION.to_nanos(phase, ticks, frequency_mhz)
    }
}
