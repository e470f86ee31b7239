//! Waveform emission
//!
//! Turns a 24-bit wire word into WS2812 pulses. The whole transmission,
//! every bit of every repetition, runs inside one critical section: a single
//! late edge corrupts the rest of the frame and there is no way to detect
//! it afterwards.

use crate::OutputPort;
use crate::color::COLOR_MASK;
use crate::pin::PinDescriptor;
use crate::timing::TimingProfile;
use crate::wait::BusyWait;

/// First bit on the wire
const MSB: u32 = 1 << 23;

/// Bit-banging emitter bound to a port and a busy-wait strategy
#[derive(Debug)]
pub struct Emitter<P, W> {
    port: P,
    wait: W,
}

impl<P: OutputPort, W: BusyWait> Emitter<P, W> {
    pub const fn new(port: P, wait: W) -> Self {
        Self { port, wait }
    }

    /// Get a reference to the output port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Get a mutable reference to the output port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Emit `word` on `pin` for `repeat` daisy-chained LEDs
    ///
    /// Bits 23 down to 0 are sent, bits above are ignored. Repetitions
    /// follow each other without a gap so a chain shows one uniform color.
    /// A `repeat` of zero emits nothing.
    ///
    /// The pin must already be configured as an output.
    ///
    /// On Xtensa the function is placed in instruction RAM. The port and
    /// busy-wait calls are only covered by that placement when their
    /// implementations are `#[inline(always)]`, see [`OutputPort`].
    #[inline(never)]
    #[cfg_attr(target_arch = "xtensa", unsafe(link_section = ".rwtext"))]
    pub fn emit(
        &mut self,
        word: u32,
        pin: &PinDescriptor,
        profile: &TimingProfile<W::Unit>,
        repeat: u16,
    ) {
        if repeat == 0 {
            return;
        }
        let word = word & COLOR_MASK;

        critical_section::with(|_cs| self.transmit(word, pin, profile, repeat));
    }

    // Must inline into `emit`, the RAM-placed symbol.
    #[inline(always)]
    fn transmit(&mut self, word: u32, pin: &PinDescriptor, profile: &TimingProfile<W::Unit>, repeat: u16) {
        for _ in 0..repeat {
            let mut bit = MSB;
            while bit != 0 {
                let one = word & bit != 0;

                self.port.set_high(pin);
                self.wait.wait(profile.high(one));

                self.port.set_low(pin);
                self.wait.wait(profile.low(one));

                bit >>= 1;
            }
        }
    }
}
