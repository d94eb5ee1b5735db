use crate::address::{
    config_address, mint_authority_address, reward_mint_address, stake_account_address,
};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token;

/// One variant per instruction, each carrying only what the caller must
/// choose. Every other account is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeRequest {
    InitializeRewardMint,
    CreatePdaAccount,
    Stake { amount: u64 },
    Unstake { amount: u64 },
    /// The reward token account must already exist.
    ClaimPoints { user_token_account: Pubkey },
    GetPoints,
}

impl StakeRequest {
    /// Claim into the owner's associated token account for the reward mint.
    pub fn claim_to_associated_account(owner: &Pubkey) -> Self {
        let (reward_mint, _) = reward_mint_address();
        StakeRequest::ClaimPoints {
            user_token_account: get_associated_token_address(owner, &reward_mint),
        }
    }

    /// Builds the instruction signed by `signer`. For every variant except
    /// `InitializeRewardMint` the signer is the stake account owner.
    pub fn instruction(&self, signer: &Pubkey) -> Instruction {
        let (accounts, data) = match *self {
            StakeRequest::InitializeRewardMint => (
                crate::accounts::InitializeRewardMint {
                    signer: *signer,
                    config: config_address().0,
                    reward_mint: reward_mint_address().0,
                    mint_authority: mint_authority_address().0,
                    program_data: bpf_loader_upgradeable::get_program_data_address(&crate::ID),
                    token_program: token::ID,
                    system_program: system_program::ID,
                    rent: anchor_lang::solana_program::sysvar::rent::ID,
                }
                .to_account_metas(None),
                crate::instruction::InitializeRewardMint {}.data(),
            ),
            StakeRequest::CreatePdaAccount => (
                crate::accounts::CreatePdaAccount {
                    payer: *signer,
                    pda_account: stake_account_address(signer).0,
                    system_program: system_program::ID,
                }
                .to_account_metas(None),
                crate::instruction::CreatePdaAccount {}.data(),
            ),
            StakeRequest::Stake { amount } => (
                crate::accounts::Stake {
                    user: *signer,
                    pda_account: stake_account_address(signer).0,
                    system_program: system_program::ID,
                }
                .to_account_metas(None),
                crate::instruction::Stake { amount }.data(),
            ),
            StakeRequest::Unstake { amount } => (
                crate::accounts::Unstake {
                    user: *signer,
                    pda_account: stake_account_address(signer).0,
                    system_program: system_program::ID,
                }
                .to_account_metas(None),
                crate::instruction::Unstake { amount }.data(),
            ),
            StakeRequest::ClaimPoints { user_token_account } => (
                crate::accounts::ClaimPoints {
                    user: *signer,
                    pda_account: stake_account_address(signer).0,
                    config: config_address().0,
                    reward_mint: reward_mint_address().0,
                    mint_authority: mint_authority_address().0,
                    user_token_account,
                    token_program: token::ID,
                }
                .to_account_metas(None),
                crate::instruction::ClaimPoints {}.data(),
            ),
            StakeRequest::GetPoints => (
                crate::accounts::GetPoints {
                    user: *signer,
                    pda_account: stake_account_address(signer).0,
                }
                .to_account_metas(None),
                crate::instruction::GetPoints {}.data(),
            ),
        };

        Instruction {
            program_id: crate::ID,
            accounts,
            data,
        }
    }
}
