//! GPIO pin addressing
//!
//! Chips with more than 32 GPIOs split the output set/clear registers into
//! banks of 32 pins. A [`PinDescriptor`] resolves a pin number into its bank
//! and in-register bit once, before the timing-critical loop starts.

/// Pins per set/clear register
pub const BANK_WIDTH: u8 = 32;

/// Error returned when a pin number is not addressable on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPin(pub u8);

/// GPIO layout of a chip family
///
/// Bit `n` of the mask is set when GPIO `n` exists and can drive an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLayout {
    outputs: u64,
}

impl PinLayout {
    pub const fn new(outputs: u64) -> Self {
        Self { outputs }
    }

    /// GPIOs `0..count`, all output capable
    pub const fn first(count: u8) -> Self {
        let outputs = if count >= 64 { u64::MAX } else { (1 << count) - 1 };
        Self { outputs }
    }

    /// Remove GPIOs `first..=last`
    pub const fn without(self, first: u8, last: u8) -> Self {
        let range = Self::first(last.saturating_add(1)).outputs & !Self::first(first).outputs;
        Self {
            outputs: self.outputs & !range,
        }
    }

    /// Output-capable GPIO mask
    pub const fn outputs(self) -> u64 {
        self.outputs
    }

    /// Number of register banks needed to cover every pin
    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
    pub const fn banks(self) -> u8 {
        let highest = u64::BITS - self.outputs.leading_zeros();
        highest.div_ceil(BANK_WIDTH as u32) as u8
    }

    pub const fn contains(self, pin: u8) -> bool {
        pin < 64 && self.outputs & (1 << pin) != 0
    }
}

/// Resolved output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDescriptor {
    pin: u8,
    bank: u8,
    mask: u32,
}

impl PinDescriptor {
    /// Resolve a pin number against a chip layout
    ///
    /// Returns `Err(InvalidPin(pin))` for pins the chip does not have or
    /// cannot drive, instead of writing an unrelated register bit.
    pub const fn new(pin: u8, layout: PinLayout) -> Result<Self, InvalidPin> {
        if !layout.contains(pin) {
            return Err(InvalidPin(pin));
        }
        Ok(Self {
            pin,
            bank: pin / BANK_WIDTH,
            mask: 1 << (pin % BANK_WIDTH),
        })
    }

    /// GPIO number
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    /// Register bank index
    pub const fn bank(&self) -> u8 {
        self.bank
    }

    /// Bit to write into the bank's set/clear register
    pub const fn mask(&self) -> u32 {
        self.mask
    }
}
