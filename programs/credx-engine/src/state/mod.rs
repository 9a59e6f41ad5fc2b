pub mod protocol;
pub mod loan;
pub mod collateral_vault;
pub mod price_reading;

pub use protocol::*;
pub use loan::*;
pub use collateral_vault::*;
pub use price_reading::*;
