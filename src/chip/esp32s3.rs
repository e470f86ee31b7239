//! ESP32-S3 (Xtensa LX7, dual core)

use super::CycleCalibration;
use crate::pin::PinLayout;
use crate::timing::{Cycles, Loops, MIN_TICKS, Phase, TimingProfile, TimingStrategy};

const NAME: &str = "esp32s3";
const PINS: PinLayout = PinLayout::first(49).without(22, 25);
const SUPPORTED_MHZ: &[u32] = &[80, 160, 240];

const CALIBRATION: CycleCalibration = CycleCalibration {
    overhead: TimingProfile::new(11, 15, 15, 24),
    low_clock: None,
};

/// ESP32-S3 polling the `CCOUNT` cycle counter
#[derive(Debug, Clone, Copy)]
pub struct Esp32S3;

impl TimingStrategy for Esp32S3 {
    type Unit = Cycles;

    const NAME: &'static str = NAME;
    const PINS: PinLayout = PINS;
    const SUPPORTED_MHZ: &'static [u32] = SUPPORTED_MHZ;

    fn calibrate(frequency_mhz: u32) -> TimingProfile<Cycles> {
        CALIBRATION.calibrate(frequency_mhz)
    }

    fn to_nanos(phase: Phase, ticks: u32, frequency_mhz: u32) -> u32 {
        CALIBRATION.to_nanos(phase, ticks, frequency_mhz)
    }
}

/// Loop counts for one clock frequency
///
/// The 240 and 160 MHz counts were tuned on hardware against a loop that
/// rewrote the set/clear register on every iteration. `loop_ns` and
/// `entry_ns` are nominal values fitted to those counts, and the 80 MHz row
/// is derived from them. The table has to be measured again for the
/// register-read spin in `hw::BusSpin`.
#[derive(Debug, Clone, Copy)]
struct LoopRow {
    frequency_mhz: u32,
    /// Nominal period of one iteration
    loop_ns: u32,
    /// Nominal cost of entering a pulse (register write, branch)
    entry_ns: u32,
    counts: TimingProfile<Loops>,
}

static LOOP_TABLE: [LoopRow; 3] = [
    LoopRow {
        frequency_mhz: 240,
        loop_ns: 60,
        entry_ns: 20,
        counts: TimingProfile::new(13, 7, 6, 14),
    },
    LoopRow {
        frequency_mhz: 160,
        loop_ns: 65,
        entry_ns: 20,
        counts: TimingProfile::new(12, 7, 6, 13),
    },
    LoopRow {
        frequency_mhz: 80,
        loop_ns: 90,
        entry_ns: 80,
        counts: TimingProfile::new(8, 4, 4, 9),
    },
];

/// Row measured closest to the requested clock
fn nearest_row(frequency_mhz: u32) -> &'static LoopRow {
    let mut nearest = &LOOP_TABLE[0];
    for row in &LOOP_TABLE[1..] {
        if row.frequency_mhz.abs_diff(frequency_mhz) < nearest.frequency_mhz.abs_diff(frequency_mhz)
        {
            nearest = row;
        }
    }
    nearest
}

/// Scale `value` by `numerator / denominator`, rounding to nearest
#[allow(clippy::cast_possible_truncation)]
fn scale(value: u64, numerator: u32, denominator: u32) -> u32 {
    let denominator = u64::from(denominator.max(1));
    let scaled = (value * u64::from(numerator) + denominator / 2) / denominator;
    scaled.min(u64::from(u32::MAX)) as u32
}

/// ESP32-S3 with a fixed-iteration busy-wait
///
/// For builds that cannot or should not use the cycle counter. Unlisted
/// frequencies scale the nearest measured row linearly and may fall
/// outside the WS2812 tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Esp32S3FixedLoop;

impl TimingStrategy for Esp32S3FixedLoop {
    type Unit = Loops;

    const NAME: &'static str = NAME;
    const PINS: PinLayout = PINS;
    const SUPPORTED_MHZ: &'static [u32] = SUPPORTED_MHZ;

    fn calibrate(frequency_mhz: u32) -> TimingProfile<Loops> {
        let row = nearest_row(frequency_mhz);
        if row.frequency_mhz == frequency_mhz {
            return row.counts;
        }
        TimingProfile::from_fn(|phase| {
            scale(
                u64::from(row.counts.get(phase)),
                frequency_mhz,
                row.frequency_mhz,
            )
            .max(MIN_TICKS)
        })
    }

    fn to_nanos(_phase: Phase, ticks: u32, frequency_mhz: u32) -> u32 {
        let row = nearest_row(frequency_mhz);
        let nanos = u64::from(ticks) * u64::from(row.loop_ns) + u64::from(row.entry_ns);
        scale(nanos, row.frequency_mhz, frequency_mhz)
    }
}
