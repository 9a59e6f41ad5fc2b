pub mod initialize_protocol;
pub mod update_config;
pub mod oracle;
pub mod initialize_loan;
pub mod deposit_collateral;
pub mod lend_credit_token;
pub mod cron_repayment;
pub mod withdraw_collateral;

pub use initialize_protocol::*;
pub use update_config::*;
pub use oracle::*;
pub use initialize_loan::*;
pub use deposit_collateral::*;
pub use lend_credit_token::*;
pub use cron_repayment::*;
pub use withdraw_collateral::*;
