//! End-to-end tests against the compiled program.
//!
//! They load `target/deploy/points_staking.so`, so run `anchor build` first
//! and then `cargo test -- --ignored`.

use std::path::PathBuf;

use anchor_lang::error::ERROR_CODE_OFFSET;
#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::{self, UpgradeableLoaderState};
use anchor_lang::AccountDeserialize;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::spl_token;
use anchor_spl::token::spl_token::solana_program::program_pack::Pack;
use litesvm::types::{FailedTransactionMetadata, TransactionMetadata};
use litesvm::LiteSVM;
use points_staking::address::{config_address, reward_mint_address, stake_account_address};
use points_staking::error::StakeError;
use points_staking::request::StakeRequest;
use points_staking::state::{RewardConfig, StakeAccount};
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::InstructionError,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::{Transaction, TransactionError},
};

type TxResult = Result<TransactionMetadata, FailedTransactionMetadata>;

fn program_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../target/deploy/points_staking.so");
    path
}

fn setup() -> (LiteSVM, Keypair) {
    let mut svm = LiteSVM::new();
    let path = program_path();
    svm.add_program_from_file(points_staking::ID, &path)
        .unwrap_or_else(|e| panic!("loading {:?}: {}", path, e));

    let user = Keypair::new();
    svm.airdrop(&user.pubkey(), 10 * LAMPORTS_PER_SOL).unwrap();

    (svm, user)
}

/// Installs a ProgramData account naming `admin` as upgrade authority, the
/// way an upgradeable deploy would.
fn set_upgrade_authority(svm: &mut LiteSVM, admin: &Pubkey) {
    let mut data = bincode::serialize(&UpgradeableLoaderState::ProgramData {
        slot: 0,
        upgrade_authority_address: Some(*admin),
    })
    .unwrap();
    data.extend_from_slice(&std::fs::read(program_path()).unwrap());

    let address = bpf_loader_upgradeable::get_program_data_address(&points_staking::ID);
    svm.set_account(
        address,
        Account {
            lamports: svm.minimum_balance_for_rent_exemption(data.len()),
            data,
            owner: bpf_loader_upgradeable::ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
}

/// Creates an empty reward token account for `owner` at its associated address.
fn create_reward_token_account(svm: &mut LiteSVM, owner: &Pubkey) -> Pubkey {
    let user_token_account = get_associated_token_address(owner, &reward_mint_address().0);

    let token_account = spl_token::state::Account {
        mint: reward_mint_address().0,
        owner: *owner,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(token_account, &mut data).unwrap();

    svm.set_account(
        user_token_account,
        Account {
            lamports: svm.minimum_balance_for_rent_exemption(data.len()),
            data,
            owner: spl_token::ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
    user_token_account
}

fn token_balance(svm: &LiteSVM, address: &Pubkey) -> u64 {
    let account = svm.get_account(address).expect("token account exists");
    spl_token::state::Account::unpack(&account.data).unwrap().amount
}

fn send(svm: &mut LiteSVM, signer: &Keypair, request: StakeRequest) -> TxResult {
    let ix = request.instruction(&signer.pubkey());
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signer.pubkey()),
        &[signer],
        svm.latest_blockhash(),
    );
    let result = svm.send_transaction(tx);
    svm.expire_blockhash();
    result
}

fn stake_account(svm: &LiteSVM, owner: &Pubkey) -> StakeAccount {
    let (address, _) = stake_account_address(owner);
    let account = svm.get_account(&address).expect("stake account exists");
    StakeAccount::try_deserialize(&mut account.data.as_slice()).unwrap()
}

fn lamports(svm: &LiteSVM, address: &Pubkey) -> u64 {
    svm.get_account(address).map(|a| a.lamports).unwrap_or(0)
}

fn advance_clock(svm: &mut LiteSVM, seconds: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp += seconds;
    svm.set_sysvar::<Clock>(&clock);
}

fn custom_code(result: TxResult) -> u32 {
    match result {
        Ok(_) => panic!("transaction should fail"),
        Err(failed) => match failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
            other => panic!("unexpected error: {:?}", other),
        },
    }
}

fn code(error: StakeError) -> u32 {
    ERROR_CODE_OFFSET + error as u32
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn create_initializes_empty_account_once() {
    let (mut svm, user) = setup();

    assert!(send(&mut svm, &user, StakeRequest::CreatePdaAccount).is_ok());

    let account = stake_account(&svm, &user.pubkey());
    assert_eq!(account.owner, user.pubkey());
    assert_eq!(account.staked_amount, 0);
    assert_eq!(account.total_points, 0);
    assert_eq!(account.bump, stake_account_address(&user.pubkey()).1);

    let second = send(&mut svm, &user, StakeRequest::CreatePdaAccount);
    assert_eq!(custom_code(second), code(StakeError::AlreadyInitialized));
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn stake_and_unstake_move_lamports_and_accrue_points() {
    let (mut svm, user) = setup();
    let (vault, _) = stake_account_address(&user.pubkey());

    send(&mut svm, &user, StakeRequest::CreatePdaAccount).unwrap();
    let rent_reserve = lamports(&svm, &vault);

    send(&mut svm, &user, StakeRequest::Stake { amount: LAMPORTS_PER_SOL }).unwrap();
    assert_eq!(lamports(&svm, &vault), rent_reserve + LAMPORTS_PER_SOL);

    advance_clock(&mut svm, 86_400);

    let user_before = lamports(&svm, &user.pubkey());
    send(
        &mut svm,
        &user,
        StakeRequest::Unstake { amount: LAMPORTS_PER_SOL / 2 },
    )
    .unwrap();

    assert_eq!(lamports(&svm, &vault), rent_reserve + LAMPORTS_PER_SOL / 2);
    assert!(lamports(&svm, &user.pubkey()) > user_before);

    let account = stake_account(&svm, &user.pubkey());
    assert_eq!(account.staked_amount, LAMPORTS_PER_SOL / 2);
    assert_eq!(account.total_points, 1_000_000);
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn get_points_persists_and_returns_total() {
    let (mut svm, user) = setup();

    send(&mut svm, &user, StakeRequest::CreatePdaAccount).unwrap();
    send(&mut svm, &user, StakeRequest::Stake { amount: 2 * LAMPORTS_PER_SOL }).unwrap();
    advance_clock(&mut svm, 43_200);

    let meta = send(&mut svm, &user, StakeRequest::GetPoints).unwrap();
    let mut returned = [0u8; 8];
    returned.copy_from_slice(&meta.return_data.data[..8]);
    assert_eq!(u64::from_le_bytes(returned), 1_000_000);

    let account = stake_account(&svm, &user.pubkey());
    assert_eq!(account.total_points, 1_000_000);
    assert_eq!(account.staked_amount, 2 * LAMPORTS_PER_SOL);
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn invalid_amounts_are_rejected() {
    let (mut svm, user) = setup();

    send(&mut svm, &user, StakeRequest::CreatePdaAccount).unwrap();
    send(&mut svm, &user, StakeRequest::Stake { amount: 1_000 }).unwrap();

    let zero = send(&mut svm, &user, StakeRequest::Stake { amount: 0 });
    assert_eq!(custom_code(zero), code(StakeError::InvalidAmount));

    let zero = send(&mut svm, &user, StakeRequest::Unstake { amount: 0 });
    assert_eq!(custom_code(zero), code(StakeError::InvalidAmount));

    let too_much = send(&mut svm, &user, StakeRequest::Unstake { amount: 1_001 });
    assert_eq!(custom_code(too_much), code(StakeError::InsufficientStake));

    assert_eq!(stake_account(&svm, &user.pubkey()).staked_amount, 1_000);
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn another_signer_cannot_touch_the_account() {
    let (mut svm, owner) = setup();
    send(&mut svm, &owner, StakeRequest::CreatePdaAccount).unwrap();
    send(&mut svm, &owner, StakeRequest::Stake { amount: LAMPORTS_PER_SOL }).unwrap();

    let attacker = Keypair::new();
    svm.airdrop(&attacker.pubkey(), LAMPORTS_PER_SOL).unwrap();

    // Point the attacker's unstake at the owner's stake account.
    let mut ix = StakeRequest::Unstake { amount: LAMPORTS_PER_SOL }.instruction(&attacker.pubkey());
    ix.accounts[1].pubkey = stake_account_address(&owner.pubkey()).0;

    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&attacker.pubkey()),
        &[&attacker],
        svm.latest_blockhash(),
    );
    let result = svm.send_transaction(tx);
    assert_eq!(custom_code(result), code(StakeError::Unauthorized));
    assert_eq!(
        stake_account(&svm, &owner.pubkey()).staked_amount,
        LAMPORTS_PER_SOL
    );
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn claim_without_reward_mint_fails() {
    let (mut svm, user) = setup();
    send(&mut svm, &user, StakeRequest::CreatePdaAccount).unwrap();

    let claim = StakeRequest::claim_to_associated_account(&user.pubkey());
    assert!(send(&mut svm, &user, claim).is_err());
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn only_upgrade_authority_creates_reward_mint() {
    let (mut svm, user) = setup();
    let admin = Keypair::new();
    svm.airdrop(&admin.pubkey(), LAMPORTS_PER_SOL).unwrap();
    set_upgrade_authority(&mut svm, &admin.pubkey());

    let result = send(&mut svm, &user, StakeRequest::InitializeRewardMint);
    assert_eq!(custom_code(result), code(StakeError::InvalidUpgradeAuthority));
    assert!(svm.get_account(&config_address().0).is_none());
}

#[test]
#[ignore = "needs target/deploy/points_staking.so from anchor build"]
fn claim_mints_accrued_points_and_resets_total() {
    let (mut svm, user) = setup();
    let admin = Keypair::new();
    svm.airdrop(&admin.pubkey(), LAMPORTS_PER_SOL).unwrap();
    set_upgrade_authority(&mut svm, &admin.pubkey());

    send(&mut svm, &admin, StakeRequest::InitializeRewardMint).unwrap();
    let config_account = svm.get_account(&config_address().0).unwrap();
    let config = RewardConfig::try_deserialize(&mut config_account.data.as_slice()).unwrap();
    assert_eq!(config.authority, admin.pubkey());
    assert_eq!(config.reward_mint, reward_mint_address().0);

    let token_account = create_reward_token_account(&mut svm, &user.pubkey());
    send(&mut svm, &user, StakeRequest::CreatePdaAccount).unwrap();
    send(&mut svm, &user, StakeRequest::Stake { amount: LAMPORTS_PER_SOL }).unwrap();
    advance_clock(&mut svm, 86_400);

    let claim = StakeRequest::ClaimPoints { user_token_account: token_account };
    send(&mut svm, &user, claim).unwrap();

    assert_eq!(token_balance(&svm, &token_account), 1_000_000);
    let account = stake_account(&svm, &user.pubkey());
    assert_eq!(account.total_points, 0);
    assert_eq!(account.staked_amount, LAMPORTS_PER_SOL);

    // nothing left to claim at the same instant
    let again = send(&mut svm, &user, claim);
    assert_eq!(custom_code(again), code(StakeError::InvalidAmount));
    assert_eq!(token_balance(&svm, &token_account), 1_000_000);
}
