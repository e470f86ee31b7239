mod order;
mod utils;

pub use order::ChannelOrder;
use smart_leds::RGB8;
pub use utils::{COLOR_MASK, rgb_from_u32, rgb_to_u32};

pub type Rgb = RGB8;
