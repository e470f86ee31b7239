#![no_std]

pub mod chip;
pub mod color;
pub mod emitter;
#[cfg(target_arch = "xtensa")]
pub mod hw;
pub mod pin;
pub mod sim;
pub mod timing;
pub mod wait;
pub mod writer;

#[cfg(all(feature = "log", feature = "esp8266"))]
compile_error!("the `log` feature is not available for esp8266");

pub use chip::Target;
pub use color::{ChannelOrder, Rgb, rgb_from_u32, rgb_to_u32};
pub use emitter::Emitter;
pub use pin::{InvalidPin, PinDescriptor, PinLayout};
pub use timing::{Cycles, Loops, Phase, TimingProfile, TimingStrategy};
pub use wait::{BusyWait, CycleCounter, CyclePoll};
pub use writer::{CpuClock, FixedClock, WriteConfig, Ws2812Writer};

/// Abstract GPIO output port
///
/// Implement this trait to support different hardware platforms.
/// The emitter is generic over this trait. `set_high` and `set_low` sit in
/// the timing-critical loop and should compile down to a single store.
///
/// Mark `set_high` and `set_low` `#[inline(always)]`. A call that is not
/// inlined runs from flash and its cache misses stretch the pulses.
pub trait OutputPort {
    /// Configure the pin as a digital output
    fn configure_output(&mut self, pin: &PinDescriptor);

    /// Drive the pin high
    fn set_high(&mut self, pin: &PinDescriptor);

    /// Drive the pin low
    fn set_low(&mut self, pin: &PinDescriptor);
}
