//! Wire order of the color channels
//!
//! WS2812 parts latch the three 8-bit lanes in a fixed order that differs
//! between vendors. Colors are always accepted as `0xRRGGBB` and permuted
//! into the wire order right before emission.

use super::utils::COLOR_MASK;

const ORDER_NAME_RGB: &str = "rgb";
const ORDER_NAME_BGR: &str = "bgr";
const ORDER_NAME_BRG: &str = "brg";
const ORDER_NAME_RBG: &str = "rbg";
const ORDER_NAME_GBR: &str = "gbr";
const ORDER_NAME_GRB: &str = "grb";

const ORDER_ID_RGB: u8 = 0;
const ORDER_ID_BGR: u8 = 1;
const ORDER_ID_BRG: u8 = 2;
const ORDER_ID_RBG: u8 = 3;
const ORDER_ID_GBR: u8 = 4;
const ORDER_ID_GRB: u8 = 5;

/// Lane shifts of the `0xRRGGBB` input word
const RED: u32 = 16;
const GREEN: u32 = 8;
const BLUE: u32 = 0;

/// Channel order expected on the wire.
///
/// `Grb` is what most WS2812 parts expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ChannelOrder {
    Rgb = ORDER_ID_RGB,
    Bgr = ORDER_ID_BGR,
    Brg = ORDER_ID_BRG,
    Rbg = ORDER_ID_RBG,
    Gbr = ORDER_ID_GBR,
    #[default]
    Grb = ORDER_ID_GRB,
}

impl ChannelOrder {
    /// All channel orders
    pub const ALL: [Self; 6] = [
        Self::Rgb,
        Self::Bgr,
        Self::Brg,
        Self::Rbg,
        Self::Gbr,
        Self::Grb,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ORDER_ID_RGB => Self::Rgb,
            ORDER_ID_BGR => Self::Bgr,
            ORDER_ID_BRG => Self::Brg,
            ORDER_ID_RBG => Self::Rbg,
            ORDER_ID_GBR => Self::Gbr,
            ORDER_ID_GRB => Self::Grb,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => ORDER_NAME_RGB,
            Self::Bgr => ORDER_NAME_BGR,
            Self::Brg => ORDER_NAME_BRG,
            Self::Rbg => ORDER_NAME_RBG,
            Self::Gbr => ORDER_NAME_GBR,
            Self::Grb => ORDER_NAME_GRB,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ORDER_NAME_RGB => Some(Self::Rgb),
            ORDER_NAME_BGR => Some(Self::Bgr),
            ORDER_NAME_BRG => Some(Self::Brg),
            ORDER_NAME_RBG => Some(Self::Rbg),
            ORDER_NAME_GBR => Some(Self::Gbr),
            ORDER_NAME_GRB => Some(Self::Grb),
            _ => None,
        }
    }

    /// Input lane shifts, listed from the first to the last lane on the wire
    const fn lanes(self) -> [u32; 3] {
        match self {
            Self::Rgb => [RED, GREEN, BLUE],
            Self::Bgr => [BLUE, GREEN, RED],
            Self::Brg => [BLUE, RED, GREEN],
            Self::Rbg => [RED, BLUE, GREEN],
            Self::Gbr => [GREEN, BLUE, RED],
            Self::Grb => [GREEN, RED, BLUE],
        }
    }

    /// Permute a `0xRRGGBB` word into wire order
    ///
    /// The first wire lane lands in bits 23:16 so it is emitted first.
    pub const fn to_wire(self, rgb: u32) -> u32 {
        let [first, second, third] = self.lanes();
        (((rgb >> first) & 0xFF) << 16) | (((rgb >> second) & 0xFF) << 8) | ((rgb >> third) & 0xFF)
    }

    /// Inverse of [`ChannelOrder::to_wire`]
    pub const fn from_wire(self, wire: u32) -> u32 {
        let [first, second, third] = self.lanes();
        let wire = wire & COLOR_MASK;
        (((wire >> 16) & 0xFF) << first) | (((wire >> 8) & 0xFF) << second) | ((wire & 0xFF) << third)
    }
}
