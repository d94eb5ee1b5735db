use anchor_lang::prelude::*;

#[error_code]
pub enum StakeError {
    #[msg("Unauthorized access")]
    Unauthorized = 1,
    #[msg("Invalid time: clock moved backwards")]
    InvalidTimestamp = 2,
    #[msg("Arithmetic overflow")]
    Overflow = 3,
    #[msg("Arithmetic underflow")]
    Underflow = 4,
    #[msg("Amount should be greater than 0")]
    InvalidAmount = 5,
    #[msg("Insufficient stake amount")]
    InsufficientStake = 6,
    #[msg("Stake account already initialized")]
    AlreadyInitialized = 7,

    #[msg("Invalid mint authority")]
    InvalidMintAuthority = 8,
    #[msg("Token Account is Invalid")]
    InvalidTokenAccount = 9,
    #[msg("Reward mint does not match the configured mint")]
    InvalidRewardMint = 10,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 11,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 12,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 13,
}
