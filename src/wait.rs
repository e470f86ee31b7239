//! Busy-wait strategies
//!
//! The emitter calls [`BusyWait::wait`] right after each pin write. A build
//! uses exactly one implementation, fixed by the calibration's unit.

use crate::timing::Cycles;

/// Free-running CPU cycle counter
///
/// The counter is expected to wrap at `u32::MAX`.
pub trait CycleCounter {
    fn cycles(&self) -> u32;
}

/// Blocking delay measured in the unit `Self::Unit`
pub trait BusyWait {
    /// Unit of the `ticks` argument, see [`crate::timing::Cycles`] and
    /// [`crate::timing::Loops`]
    type Unit;

    /// Spin for `ticks` units, starting now
    ///
    /// Implementations should be `#[inline(always)]`, like the port writes
    /// of [`crate::OutputPort`].
    fn wait(&mut self, ticks: u32);
}

/// Busy-wait polling a cycle counter
///
/// The start sample is taken when `wait` is entered, which is right after
/// the register write retired.
#[derive(Debug)]
pub struct CyclePoll<C> {
    counter: C,
}

impl<C: CycleCounter> CyclePoll<C> {
    pub const fn new(counter: C) -> Self {
        Self { counter }
    }
}

impl<C: CycleCounter> BusyWait for CyclePoll<C> {
    type Unit = Cycles;

    #[inline(always)]
    fn wait(&mut self, ticks: u32) {
        let start = self.counter.cycles();
        while self.counter.cycles().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }
}
