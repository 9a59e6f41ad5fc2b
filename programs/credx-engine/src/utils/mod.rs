pub mod math;
pub mod oracle;
pub mod token;

pub use math::*;
pub use oracle::*;
pub use token::*;
