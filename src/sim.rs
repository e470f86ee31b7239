//! Simulated GPIO port and clock
//!
//! Lets the waveform be checked on the host. A [`SimBus`] owns a virtual
//! cycle clock and a bounded trace of pin edges; the port, counter and spin
//! handles it gives out all share that state.
//!
//! Cost model: a register write takes one cycle and every cycle-counter read
//! takes one cycle, so a polled pulse of `ticks` lasts `ticks + 2` cycles
//! ([`SimBus::POLL_OVERHEAD`]). A fixed spin of `ticks` loops advances the
//! clock by `ticks`, giving `ticks + 1` ([`SimBus::SPIN_OVERHEAD`]).

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::OutputPort;
use crate::pin::PinDescriptor;
use crate::timing::Loops;
use crate::wait::{BusyWait, CycleCounter};

/// Output level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// A recorded pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub pin: u8,
    pub level: Level,
    /// Clock value when the write was issued
    pub at: u32,
}

/// High time followed by low time of one bit, in cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub high: u32,
    pub low: u32,
}

/// Shared state of the simulated hardware
///
/// `N` is the number of edges the trace can hold. Edges past that are
/// dropped and [`SimBus::overflowed`] turns true.
#[derive(Debug)]
pub struct SimBus<const N: usize> {
    clock: Cell<u32>,
    edges: RefCell<Vec<Edge, N>>,
    overflowed: Cell<bool>,
    outputs: Cell<u64>,
}

impl<const N: usize> SimBus<N> {
    /// Cycles a polled pulse lasts beyond its calibrated duration
    pub const POLL_OVERHEAD: u32 = 2;

    /// Cycles a spun pulse lasts beyond its calibrated duration
    pub const SPIN_OVERHEAD: u32 = 1;

    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start the clock at an arbitrary value, e.g. just below a wrap
    pub const fn starting_at(cycles: u32) -> Self {
        Self {
            clock: Cell::new(cycles),
            edges: RefCell::new(Vec::new()),
            overflowed: Cell::new(false),
            outputs: Cell::new(0),
        }
    }

    pub const fn port(&self) -> SimPort<'_, N> {
        SimPort { bus: self }
    }

    pub const fn counter(&self) -> SimCounter<'_, N> {
        SimCounter { bus: self }
    }

    pub const fn spin(&self) -> SimSpin<'_, N> {
        SimSpin { bus: self }
    }

    /// Current clock value
    pub fn now(&self) -> u32 {
        self.clock.get()
    }

    /// Move the clock forward
    pub fn advance(&self, cycles: u32) {
        self.clock.set(self.clock.get().wrapping_add(cycles));
    }

    /// Check whether a pin was configured as output
    pub fn is_output(&self, pin: u8) -> bool {
        pin < 64 && self.outputs.get() & (1 << pin) != 0
    }

    /// Returns true if edges were dropped because the trace was full
    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    /// Copy of the recorded edges
    pub fn edges(&self) -> Vec<Edge, N> {
        self.edges.borrow().clone()
    }

    /// Forget the recorded edges, the clock keeps running
    pub fn clear(&self) {
        self.edges.borrow_mut().clear();
        self.overflowed.set(false);
    }

    /// Pair the recorded edges into bit pulses
    ///
    /// The low time of the last pulse runs until [`SimBus::now`].
    pub fn pulses(&self) -> Vec<Pulse, N> {
        let edges = self.edges.borrow();
        let mut pulses = Vec::new();
        for (index, rise) in edges.iter().enumerate() {
            if rise.level != Level::High {
                continue;
            }
            let Some(fall) = edges.get(index + 1) else {
                break;
            };
            let end = edges.get(index + 2).map_or(self.now(), |next| next.at);
            let pulse = Pulse {
                high: fall.at.wrapping_sub(rise.at),
                low: end.wrapping_sub(fall.at),
            };
            if pulses.push(pulse).is_err() {
                break;
            }
        }
        pulses
    }

    fn record(&self, pin: &PinDescriptor, level: Level) {
        let edge = Edge {
            pin: pin.pin(),
            level,
            at: self.now(),
        };
        if self.edges.borrow_mut().push(edge).is_err() {
            self.overflowed.set(true);
        }
        self.advance(1);
    }
}

impl<const N: usize> Default for SimBus<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated GPIO port recording every write
#[derive(Debug, Clone, Copy)]
pub struct SimPort<'a, const N: usize> {
    bus: &'a SimBus<N>,
}

impl<const N: usize> OutputPort for SimPort<'_, N> {
    fn configure_output(&mut self, pin: &PinDescriptor) {
        if pin.pin() < 64 {
            self.bus.outputs.set(self.bus.outputs.get() | (1 << pin.pin()));
        }
    }

    fn set_high(&mut self, pin: &PinDescriptor) {
        self.bus.record(pin, Level::High);
    }

    fn set_low(&mut self, pin: &PinDescriptor) {
        self.bus.record(pin, Level::Low);
    }
}

/// Simulated cycle counter, each read costs one cycle
#[derive(Debug, Clone, Copy)]
pub struct SimCounter<'a, const N: usize> {
    bus: &'a SimBus<N>,
}

impl<const N: usize> CycleCounter for SimCounter<'_, N> {
    fn cycles(&self) -> u32 {
        let now = self.bus.now();
        self.bus.advance(1);
        now
    }
}

/// Simulated fixed-iteration spin, each loop costs one cycle
#[derive(Debug, Clone, Copy)]
pub struct SimSpin<'a, const N: usize> {
    bus: &'a SimBus<N>,
}

impl<const N: usize> BusyWait for SimSpin<'_, N> {
    type Unit = Loops;

    fn wait(&mut self, ticks: u32) {
        self.bus.advance(ticks);
    }
}
