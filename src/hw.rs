//! Register-level bindings for the selected chip
//!
//! Only built for Xtensa targets. Pin writes go straight to the GPIO
//! write-1-to-set / write-1-to-clear registers, so a level change is a
//! single store with no read-modify-write.
//!
//! Routing the pin to the GPIO matrix (IO_MUX function select) is left to
//! the HAL; [`RegisterPort::configure_output`] only sets the output enable
//! bit.

use core::ptr;

use crate::OutputPort;
use crate::chip::Target;
use crate::pin::PinDescriptor;
use crate::wait::CycleCounter;
use crate::writer::{CpuClock, Ws2812Writer};

#[derive(Debug, Clone, Copy)]
struct BankRegisters {
    set: usize,
    clear: usize,
    enable: usize,
}

#[cfg(feature = "esp32")]
const GPIO_BASE: usize = 0x3FF4_4000;
#[cfg(feature = "esp32s3")]
const GPIO_BASE: usize = 0x6000_4000;

#[cfg(feature = "fixed-loop")]
const GPIO_OUT: usize = GPIO_BASE + 0x04;

#[cfg(any(feature = "esp32", feature = "esp32s3"))]
const BANKS: [BankRegisters; 2] = [
    BankRegisters {
        set: GPIO_BASE + 0x08,
        clear: GPIO_BASE + 0x0C,
        enable: GPIO_BASE + 0x24,
    },
    BankRegisters {
        set: GPIO_BASE + 0x14,
        clear: GPIO_BASE + 0x18,
        enable: GPIO_BASE + 0x30,
    },
];

#[cfg(feature = "esp8266")]
const GPIO_BASE: usize = 0x6000_0300;

#[cfg(feature = "esp8266")]
const BANKS: [BankRegisters; 1] = [BankRegisters {
    set: GPIO_BASE + 0x04,
    clear: GPIO_BASE + 0x08,
    enable: GPIO_BASE + 0x10,
}];

#[inline(always)]
fn write_reg(address: usize, value: u32) {
    // SAFETY: `address` is one of the GPIO registers above, which are
    // write-1 registers; writing a mask only affects the masked pin.
    unsafe { ptr::write_volatile(address as *mut u32, value) }
}

/// GPIO port of the selected chip
#[derive(Debug)]
pub struct RegisterPort {
    _private: (),
}

impl RegisterPort {
    /// # Safety
    ///
    /// The caller must own every pin it later writes through this port;
    /// no other driver may reconfigure them concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl OutputPort for RegisterPort {
    fn configure_output(&mut self, pin: &PinDescriptor) {
        if let Some(bank) = BANKS.get(usize::from(pin.bank())) {
            write_reg(bank.clear, pin.mask());
            write_reg(bank.enable, pin.mask());
        }
    }

    #[inline(always)]
    fn set_high(&mut self, pin: &PinDescriptor) {
        if let Some(bank) = BANKS.get(usize::from(pin.bank())) {
            write_reg(bank.set, pin.mask());
        }
    }

    #[inline(always)]
    fn set_low(&mut self, pin: &PinDescriptor) {
        if let Some(bank) = BANKS.get(usize::from(pin.bank())) {
            write_reg(bank.clear, pin.mask());
        }
    }
}

/// The Xtensa `CCOUNT` special register
#[derive(Debug, Clone, Copy)]
pub struct CcountCounter;

impl CycleCounter for CcountCounter {
    #[inline(always)]
    fn cycles(&self) -> u32 {
        xtensa_lx::timer::get_cycle_count()
    }
}

/// Fixed-iteration spin, one GPIO register read per iteration
///
/// The peripheral bus access pins the loop period to the bus instead of the
/// CPU pipeline. The fixed-loop table was tuned against a register-write
/// loop, so its counts have to be measured again for this one.
#[cfg(feature = "fixed-loop")]
#[derive(Debug, Clone, Copy)]
pub struct BusSpin;

#[cfg(feature = "fixed-loop")]
impl crate::wait::BusyWait for BusSpin {
    type Unit = crate::timing::Loops;

    #[inline(always)]
    fn wait(&mut self, ticks: u32) {
        for _ in 0..ticks {
            // SAFETY: reading the output register has no side effects.
            let _ = unsafe { ptr::read_volatile(GPIO_OUT as *const u32) };
        }
    }
}

/// Busy-wait matching the unit of [`Target`]
#[cfg(not(feature = "fixed-loop"))]
pub type TargetWait = crate::wait::CyclePoll<CcountCounter>;

/// Busy-wait matching the unit of [`Target`]
#[cfg(feature = "fixed-loop")]
pub type TargetWait = BusSpin;

/// Writer wired to the selected chip's registers
pub type TargetWriter<C> = Ws2812Writer<Target, RegisterPort, TargetWait, C>;

/// Create a writer for the selected chip
///
/// # Safety
///
/// See [`RegisterPort::new`].
pub unsafe fn target_writer<C: CpuClock>(clock: C) -> TargetWriter<C> {
    // SAFETY: forwarded to the caller.
    let port = unsafe { RegisterPort::new() };
    #[cfg(not(feature = "fixed-loop"))]
    let wait = crate::wait::CyclePoll::new(CcountCounter);
    #[cfg(feature = "fixed-loop")]
    let wait = BusSpin;
    Ws2812Writer::new(port, wait, clock)
}
