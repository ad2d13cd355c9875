pub mod draw;
pub mod lottery;

pub use draw::draw_config;
pub use lottery::{health, lottery_config};
