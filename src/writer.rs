//! Caller-facing write API
//!
//! Ties the pieces together for one call: validate the pin, configure it as
//! an output, calibrate for the current CPU clock, permute the color into
//! wire order and emit.

use core::marker::PhantomData;

#[cfg(feature = "log")]
use esp_println::println;

use crate::OutputPort;
use crate::color::{ChannelOrder, Rgb, rgb_to_u32};
use crate::emitter::Emitter;
use crate::pin::{InvalidPin, PinDescriptor};
use crate::timing::{TimingProfile, TimingStrategy};
use crate::wait::BusyWait;

/// Source of the current CPU clock frequency
///
/// The clock may change at runtime, it is read on every write.
pub trait CpuClock {
    fn frequency_mhz(&self) -> u32;
}

/// Clock that never changes frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl CpuClock for FixedClock {
    fn frequency_mhz(&self) -> u32 {
        self.0
    }
}

impl<F: Fn() -> u32> CpuClock for F {
    fn frequency_mhz(&self) -> u32 {
        self()
    }
}

/// Options of a single write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteConfig {
    /// Number of daisy-chained LEDs painted with the same color
    pub led_count: u16,
    /// Channel order expected by the LEDs
    pub order: ChannelOrder,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            led_count: 1,
            order: ChannelOrder::Grb,
        }
    }
}

/// WS2812 writer for the chip family `S`
///
/// The busy-wait must count in the unit `S` is calibrated in, which is
/// enforced by the `W: BusyWait<Unit = S::Unit>` bound.
pub struct Ws2812Writer<S, P, W, C> {
    emitter: Emitter<P, W>,
    clock: C,
    strategy: PhantomData<S>,
}

impl<S, P, W, C> Ws2812Writer<S, P, W, C>
where
    S: TimingStrategy,
    P: OutputPort,
    W: BusyWait<Unit = S::Unit>,
    C: CpuClock,
{
    pub const fn new(port: P, wait: W, clock: C) -> Self {
        Self {
            emitter: Emitter::new(port, wait),
            clock,
            strategy: PhantomData,
        }
    }

    /// Calibration for the current clock
    pub fn profile(&self) -> TimingProfile<S::Unit> {
        S::calibrate(self.clock.frequency_mhz())
    }

    /// Paint one GRB LED with a `0xRRGGBB` color
    pub fn write(&mut self, pin: u8, color: u32) -> Result<(), InvalidPin> {
        self.write_with(pin, color, &WriteConfig::default())
    }

    /// Paint LEDs with an [`Rgb`] color
    pub fn write_rgb(&mut self, pin: u8, color: Rgb, config: &WriteConfig) -> Result<(), InvalidPin> {
        self.write_with(pin, rgb_to_u32(color), config)
    }

    /// Paint `config.led_count` LEDs with a `0xRRGGBB` color
    ///
    /// Bits above 23 of `color` are ignored. Fails without touching the
    /// hardware if the chip has no such pin.
    pub fn write_with(&mut self, pin: u8, color: u32, config: &WriteConfig) -> Result<(), InvalidPin> {
        let pin = PinDescriptor::new(pin, S::PINS)?;
        self.emitter.port_mut().configure_output(&pin);

        let frequency_mhz = self.clock.frequency_mhz();
        let profile = S::calibrate(frequency_mhz);
        let wire = config.order.to_wire(color);

        #[cfg(feature = "log")]
        println!(
            "[Ws2812Writer.write] {} gpio{} @ {} MHz, {} leds, one {}/{} zero {}/{}",
            S::NAME,
            pin.pin(),
            frequency_mhz,
            config.led_count,
            profile.one_high,
            profile.one_low,
            profile.zero_high,
            profile.zero_low
        );

        self.emitter.emit(wire, &pin, &profile, config.led_count);
        Ok(())
    }

    /// Get a reference to the emitter.
    pub fn emitter(&self) -> &Emitter<P, W> {
        &self.emitter
    }
}
