use crate::error::StakeError;
use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

/// Reads the upgrade authority out of a `ProgramData` account's raw bytes.
/// A program deployed as immutable has none and cannot create a reward mint.
pub fn upgrade_authority(program_data: &[u8]) -> Result<Pubkey> {
    let loader_state = bincode::deserialize::<UpgradeableLoaderState>(program_data)
        .map_err(|_| error!(StakeError::InvalidProgramData))?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address: Some(authority),
            ..
        } => Ok(authority),
        UpgradeableLoaderState::ProgramData { .. } => err!(StakeError::NoUpgradeAuthority),
        _ => err!(StakeError::InvalidProgramData),
    }
}

/// Gates `initialize_reward_mint`: the reward mint and its config can only be
/// created by whoever holds the program's upgrade authority.
pub fn validate_program_update_authority(
    program_data_account: &UncheckedAccount,
    admin: &Signer,
) -> Result<()> {
    let program_data = program_data_account
        .try_borrow_data()
        .map_err(|_| error!(StakeError::InvalidProgramData))?;

    require_keys_eq!(
        admin.key(),
        upgrade_authority(&program_data)?,
        StakeError::InvalidUpgradeAuthority
    );
    Ok(())
}
