pub mod create_price_reading;
pub mod update_price_reading;

pub use create_price_reading::*;
pub use update_price_reading::*;
