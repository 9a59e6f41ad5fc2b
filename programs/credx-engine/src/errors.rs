use anchor_lang::prelude::*;

#[error_code]
pub enum ProtocolError {
    #[msg("Unauthorized: caller is not the configured authority")]
    Unauthorized,

    #[msg("Protocol already initialized for this admin")]
    AlreadyInitialized,

    #[msg("Loan already exists for this user")]
    AlreadyExists,

    #[msg("Configuration parameter out of range")]
    InvalidParameter,

    #[msg("Invalid amount provided")]
    InvalidAmount,

    #[msg("Protocol is locked: new borrows are disabled")]
    ProtocolLocked,

    #[msg("Borrow exceeds the LTV headroom of the collateral")]
    ExceedsLTV,

    #[msg("Oracle price is stale")]
    StalePrice,

    #[msg("Oracle price is zero or invalid")]
    InvalidPrice,

    #[msg("Oracle account does not match the protocol's price reading")]
    InvalidOracleAccount,

    #[msg("Outstanding debt must be repaid before withdrawal")]
    OutstandingDebt,

    #[msg("No unrecorded yield to reconcile")]
    NoYield,

    #[msg("Vault holds no collateral")]
    NoCollateral,

    #[msg("Borrower credit balance or allowance cannot cover the repayment")]
    InsufficientCreditTokens,

    #[msg("Loan owner mismatch")]
    InvalidOwner,

    #[msg("Loan is bound to a different protocol")]
    ProtocolMismatch,

    #[msg("Credit mint does not match the protocol")]
    InvalidCreditMint,

    #[msg("Collateral mint does not match the vault")]
    InvalidCollateralMint,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
