#![cfg(feature = "program-test")]

use anchor_lang::solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey, system_program, sysvar,
};
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    clock::Clock,
    instruction::{Instruction, InstructionError},
    program_pack::Pack,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};
use spl_token::{
    instruction as token_instruction,
    state::{Account as TokenAccount, Mint},
};
use term_vesting::error::StakingError;
use term_vesting::pda;
use term_vesting::state::{PendingWithdrawal, RewardPolicy, StakeRecord, StakingPool};

const ONE_TOKEN: u64 = 1_000_000;
const LOCK_DURATION: i64 = 5;
const APR_BPS: u32 = 40_000;
const MINIMUM_STAKE: u64 = 10;
const CAPACITY_CAP: u64 = 200 * ONE_TOKEN;

struct Pool {
    admin: Keypair,
    mint: Pubkey,
    pool: Pubkey,
    term: Pubkey,
    treasury: Pubkey,
    distributor: Pubkey,
    vault_authority: Pubkey,
    opened_at: i64,
}

struct Investor {
    keypair: Keypair,
    token_account: Pubkey,
}

impl Investor {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    term_vesting::entry(program_id, accounts, data)
}

async fn start() -> ProgramTestContext {
    let test = ProgramTest::new(
        "term_vesting",
        term_vesting::ID,
        processor!(process_instruction),
    );
    test.start_with_context().await
}

#[tokio::test]
async fn initialize_without_treasury_signature_creates_nothing() {
    let mut context = start().await;
    let admin = Keypair::new();
    fund_accounts(&mut context, &[admin.pubkey()]).await;
    let mint = Keypair::new();
    create_mint(&mut context, &mint).await;

    let (pool, term, treasury) = (Keypair::new(), Keypair::new(), Keypair::new());
    let now = unix_time(&mut context).await;
    let mut ix = initialize_ix(
        &admin.pubkey(),
        &mint.pubkey(),
        &pool.pubkey(),
        &term.pubkey(),
        &treasury.pubkey(),
        now,
        0,
    );
    for meta in ix.accounts.iter_mut() {
        if meta.pubkey == treasury.pubkey() {
            meta.is_signer = false;
        }
    }

    let result = send(&mut context, &[ix], &[&admin, &pool, &term]).await;
    assert!(result.is_err());

    let (distributor, _) =
        pda::distributor_address(&mint.pubkey(), &admin.pubkey(), LOCK_DURATION, &term_vesting::ID)
            .unwrap();
    for address in [pool.pubkey(), term.pubkey(), treasury.pubkey(), distributor] {
        let account = context.banks_client.get_account(address).await.unwrap();
        assert!(account.is_none(), "{address} was created");
    }
}

#[tokio::test]
async fn stake_harvest_claim_pays_from_distributor() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let funder = new_investor(&mut context, &pool, 1_000 * ONE_TOKEN).await;
    let investor = new_investor(&mut context, &pool, 100 * ONE_TOKEN).await;

    send(&mut context, &[fund_distributor_ix(&pool, &funder, 1_000 * ONE_TOKEN)], &[&funder.keypair])
        .await
        .unwrap();

    let t0 = pool.opened_at;
    set_unix_time(&mut context, t0).await;
    send(&mut context, &[stake_ix(&pool, &investor, 100 * ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap();

    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, 0);
    let record: StakeRecord = load(&mut context, stake_address(&pool, &investor)).await;
    assert_eq!(record.principal, 100 * ONE_TOKEN);
    assert_eq!(record.lock_expires_at, t0 + LOCK_DURATION);
    assert_eq!(token_balance(&mut context, pool.treasury).await, 100 * ONE_TOKEN);

    set_unix_time(&mut context, t0 + 8).await;
    send(&mut context, &[harvest_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap();
    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, 101_471_334_348_046);

    let distributor_before = token_balance(&mut context, pool.distributor).await;
    send(&mut context, &[claim_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap();

    assert_eq!(token_balance(&mut context, investor.token_account).await, 101);
    assert_eq!(token_balance(&mut context, pool.distributor).await, distributor_before - 101);
    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, 0);
    assert_eq!(pending.total_claimed, 101);
}

#[tokio::test]
async fn harvest_before_any_stake_reports_not_staked() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let investor = new_investor(&mut context, &pool, ONE_TOKEN).await;

    let err = send(&mut context, &[harvest_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap_err();
    assert_eq!(custom_code(err), u32::from(StakingError::NotStaked));
}

#[tokio::test]
async fn paused_pool_rejects_stake_until_resumed() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let investor = new_investor(&mut context, &pool, 10 * ONE_TOKEN).await;

    let pause = admin_ix(&pool, term_vesting::instruction::SetPaused { paused: true }.data());
    send(&mut context, &[pause], &[&pool.admin]).await.unwrap();

    let err = send(&mut context, &[stake_ix(&pool, &investor, ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap_err();
    assert_eq!(custom_code(err), u32::from(StakingError::StakingPaused));
    assert!(context
        .banks_client
        .get_account(stake_address(&pool, &investor))
        .await
        .unwrap()
        .is_none());

    let resume = admin_ix(&pool, term_vesting::instruction::SetPaused { paused: false }.data());
    send(&mut context, &[resume], &[&pool.admin]).await.unwrap();
    send(&mut context, &[stake_ix(&pool, &investor, ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap();

    let state: StakingPool = load(&mut context, pool.pool).await;
    assert_eq!(state.total_staked, ONE_TOKEN);
}

#[tokio::test]
async fn slot_limit_rejects_new_investor_but_not_top_up() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 1).await;
    let first = new_investor(&mut context, &pool, 10 * ONE_TOKEN).await;
    let second = new_investor(&mut context, &pool, 10 * ONE_TOKEN).await;

    send(&mut context, &[stake_ix(&pool, &first, ONE_TOKEN)], &[&first.keypair])
        .await
        .unwrap();

    let err = send(&mut context, &[stake_ix(&pool, &second, ONE_TOKEN)], &[&second.keypair])
        .await
        .unwrap_err();
    assert_eq!(custom_code(err), u32::from(StakingError::SlotsExhausted));
    assert_eq!(token_balance(&mut context, second.token_account).await, 10 * ONE_TOKEN);

    send(&mut context, &[stake_ix(&pool, &first, 2 * ONE_TOKEN)], &[&first.keypair])
        .await
        .unwrap();

    let state: StakingPool = load(&mut context, pool.pool).await;
    assert_eq!(state.staker_count, 1);
    assert_eq!(state.total_staked, 3 * ONE_TOKEN);
}

#[tokio::test]
async fn claim_after_unlock_waits_for_lock_expiry() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let funder = new_investor(&mut context, &pool, 1_000 * ONE_TOKEN).await;
    let investor = new_investor(&mut context, &pool, 100 * ONE_TOKEN).await;
    send(&mut context, &[fund_distributor_ix(&pool, &funder, 1_000 * ONE_TOKEN)], &[&funder.keypair])
        .await
        .unwrap();

    let policy = term_vesting::instruction::SetRewardPolicy {
        policy: RewardPolicy::ClaimAfterUnlock,
    };
    send(&mut context, &[admin_ix(&pool, policy.data())], &[&pool.admin])
        .await
        .unwrap();

    let t0 = pool.opened_at;
    set_unix_time(&mut context, t0).await;
    send(&mut context, &[stake_ix(&pool, &investor, 100 * ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap();

    set_unix_time(&mut context, t0 + 2).await;
    send(&mut context, &[harvest_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap();
    let harvested: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;

    let err = send(&mut context, &[claim_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap_err();
    assert_eq!(custom_code(err), u32::from(StakingError::LockPeriodActive));
    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, harvested.pending_rewards);

    set_unix_time(&mut context, t0 + LOCK_DURATION).await;
    send(&mut context, &[claim_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap();
    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, 0);
    assert_eq!(
        token_balance(&mut context, investor.token_account).await as u128,
        harvested.pending_rewards / term_vesting::constants::REWARD_PRECISION
    );
}

#[tokio::test]
async fn underfunded_claim_keeps_pending() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let investor = new_investor(&mut context, &pool, 100 * ONE_TOKEN).await;

    let t0 = pool.opened_at;
    set_unix_time(&mut context, t0).await;
    send(&mut context, &[stake_ix(&pool, &investor, 100 * ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap();
    set_unix_time(&mut context, t0 + 8).await;
    send(&mut context, &[harvest_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap();

    let err = send(&mut context, &[claim_ix(&pool, &investor)], &[&investor.keypair])
        .await
        .unwrap_err();
    assert_eq!(custom_code(err), u32::from(StakingError::InsufficientDistributorFunds));
    let pending: PendingWithdrawal = load(&mut context, pending_address(&pool, &investor)).await;
    assert_eq!(pending.pending_rewards, 101_471_334_348_046);
}

#[tokio::test]
async fn claim_rejects_another_pools_distributor() {
    let mut context = start().await;
    let pool = create_pool(&mut context, 5).await;
    let other = create_pool(&mut context, 5).await;
    let investor = new_investor(&mut context, &pool, 100 * ONE_TOKEN).await;

    send(&mut context, &[stake_ix(&pool, &investor, 100 * ONE_TOKEN)], &[&investor.keypair])
        .await
        .unwrap();

    let mut ix = claim_ix(&pool, &investor);
    for meta in ix.accounts.iter_mut() {
        if meta.pubkey == pool.distributor {
            meta.pubkey = other.distributor;
        }
    }

    let err = send(&mut context, &[ix], &[&investor.keypair]).await.unwrap_err();
    assert_eq!(
        custom_code(err),
        anchor_lang::error::ErrorCode::ConstraintHasOne as u32
    );
}

// ---------------------------------------------------------------------------
// instruction builders

#[allow(clippy::too_many_arguments)]
fn initialize_ix(
    admin: &Pubkey,
    mint: &Pubkey,
    pool: &Pubkey,
    term: &Pubkey,
    treasury: &Pubkey,
    now: i64,
    total_slots: u8,
) -> Instruction {
    let (vault_authority, _) = pda::vault_authority_address(&term_vesting::ID).unwrap();
    let (distributor, _) =
        pda::distributor_address(mint, admin, LOCK_DURATION, &term_vesting::ID).unwrap();

    let mut accounts = term_vesting::accounts::Initialize {
        admin: *admin,
        pool: *pool,
        term: *term,
        staking_token: *mint,
        treasury: *treasury,
        vault_authority,
        distributor,
        system_program: system_program::ID,
        token_program: spl_token::ID,
        rent: sysvar::rent::ID,
    }
    .to_account_metas(None);
    for meta in accounts.iter_mut() {
        if [admin, pool, term, treasury].contains(&&meta.pubkey) {
            meta.is_signer = true;
        }
    }

    Instruction {
        program_id: term_vesting::ID,
        accounts,
        data: term_vesting::instruction::Initialize {
            minimum_stake: MINIMUM_STAKE,
            capacity_cap: CAPACITY_CAP,
            lock_duration: LOCK_DURATION,
            join_start: now - 3_000,
            join_end: now + 47_000,
            reserved: 10,
            apr_bps: APR_BPS,
            total_slots,
        }
        .data(),
    }
}

fn stake_address(pool: &Pool, investor: &Investor) -> Pubkey {
    pda::stake_record_address(&pool.pool, &pool.term, &investor.pubkey(), &term_vesting::ID)
        .unwrap()
        .0
}

fn pending_address(pool: &Pool, investor: &Investor) -> Pubkey {
    pda::pending_withdrawal_address(&pool.pool, &pool.term, &investor.pubkey(), &term_vesting::ID)
        .unwrap()
        .0
}

fn stake_ix(pool: &Pool, investor: &Investor, amount: u64) -> Instruction {
    Instruction {
        program_id: term_vesting::ID,
        accounts: term_vesting::accounts::Stake {
            investor: investor.pubkey(),
            pool: pool.pool,
            term: pool.term,
            stake_record: stake_address(pool, investor),
            pending_withdrawal: pending_address(pool, investor),
            investor_token_account: investor.token_account,
            treasury: pool.treasury,
            system_program: system_program::ID,
            token_program: spl_token::ID,
            rent: sysvar::rent::ID,
        }
        .to_account_metas(None),
        data: term_vesting::instruction::Stake { amount }.data(),
    }
}

fn harvest_ix(pool: &Pool, investor: &Investor) -> Instruction {
    Instruction {
        program_id: term_vesting::ID,
        accounts: term_vesting::accounts::Harvest {
            investor: investor.pubkey(),
            pool: pool.pool,
            term: pool.term,
            stake_record: stake_address(pool, investor),
            pending_withdrawal: pending_address(pool, investor),
        }
        .to_account_metas(None),
        data: term_vesting::instruction::Harvest {}.data(),
    }
}

fn claim_ix(pool: &Pool, investor: &Investor) -> Instruction {
    Instruction {
        program_id: term_vesting::ID,
        accounts: term_vesting::accounts::ClaimPendingReward {
            investor: investor.pubkey(),
            pool: pool.pool,
            term: pool.term,
            stake_record: stake_address(pool, investor),
            pending_withdrawal: pending_address(pool, investor),
            vault_authority: pool.vault_authority,
            distributor: pool.distributor,
            investor_token_account: investor.token_account,
            token_program: spl_token::ID,
        }
        .to_account_metas(None),
        data: term_vesting::instruction::ClaimPendingReward {}.data(),
    }
}

fn fund_distributor_ix(pool: &Pool, funder: &Investor, amount: u64) -> Instruction {
    Instruction {
        program_id: term_vesting::ID,
        accounts: term_vesting::accounts::FundDistributor {
            funder: funder.pubkey(),
            pool: pool.pool,
            funder_token_account: funder.token_account,
            distributor: pool.distributor,
            token_program: spl_token::ID,
        }
        .to_account_metas(None),
        data: term_vesting::instruction::FundDistributor { amount }.data(),
    }
}

fn admin_ix(pool: &Pool, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: term_vesting::ID,
        accounts: term_vesting::accounts::AdminControl {
            admin: pool.admin.pubkey(),
            pool: pool.pool,
            term: pool.term,
        }
        .to_account_metas(None),
        data,
    }
}

// ---------------------------------------------------------------------------
// ledger setup

async fn create_pool(context: &mut ProgramTestContext, total_slots: u8) -> Pool {
    let admin = Keypair::new();
    fund_accounts(context, &[admin.pubkey()]).await;
    let mint = Keypair::new();
    create_mint(context, &mint).await;

    let (pool, term, treasury) = (Keypair::new(), Keypair::new(), Keypair::new());
    let now = unix_time(context).await;
    let ix = initialize_ix(
        &admin.pubkey(),
        &mint.pubkey(),
        &pool.pubkey(),
        &term.pubkey(),
        &treasury.pubkey(),
        now,
        total_slots,
    );
    send(context, &[ix], &[&admin, &pool, &term, &treasury])
        .await
        .unwrap();

    let (vault_authority, _) = pda::vault_authority_address(&term_vesting::ID).unwrap();
    let (distributor, _) =
        pda::distributor_address(&mint.pubkey(), &admin.pubkey(), LOCK_DURATION, &term_vesting::ID)
            .unwrap();

    Pool {
        admin,
        mint: mint.pubkey(),
        pool: pool.pubkey(),
        term: term.pubkey(),
        treasury: treasury.pubkey(),
        distributor,
        vault_authority,
        opened_at: now,
    }
}

async fn new_investor(context: &mut ProgramTestContext, pool: &Pool, tokens: u64) -> Investor {
    let keypair = Keypair::new();
    fund_accounts(context, &[keypair.pubkey()]).await;

    let token_account = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();
    let payer = context.payer.pubkey();
    let create_ix = system_instruction::create_account(
        &payer,
        &token_account.pubkey(),
        rent.minimum_balance(TokenAccount::LEN),
        TokenAccount::LEN as u64,
        &spl_token::ID,
    );
    let init_ix = token_instruction::initialize_account(
        &spl_token::ID,
        &token_account.pubkey(),
        &pool.mint,
        &keypair.pubkey(),
    )
    .unwrap();
    send(context, &[create_ix, init_ix], &[&token_account])
        .await
        .unwrap();

    if tokens > 0 {
        let mint_ix = token_instruction::mint_to(
            &spl_token::ID,
            &pool.mint,
            &token_account.pubkey(),
            &payer,
            &[],
            tokens,
        )
        .unwrap();
        send(context, &[mint_ix], &[]).await.unwrap();
    }

    Investor {
        keypair,
        token_account: token_account.pubkey(),
    }
}

async fn fund_accounts(context: &mut ProgramTestContext, recipients: &[Pubkey]) {
    let payer = context.payer.pubkey();
    let ixs: Vec<Instruction> = recipients
        .iter()
        .map(|recipient| system_instruction::transfer(&payer, recipient, 5_000_000_000))
        .collect();
    send(context, &ixs, &[]).await.unwrap();
}

/// Mint with 6 decimals; the test payer is the mint authority.
async fn create_mint(context: &mut ProgramTestContext, mint: &Keypair) {
    let rent = context.banks_client.get_rent().await.unwrap();
    let payer = context.payer.pubkey();
    let create_ix = system_instruction::create_account(
        &payer,
        &mint.pubkey(),
        rent.minimum_balance(Mint::LEN),
        Mint::LEN as u64,
        &spl_token::ID,
    );
    let init_ix =
        token_instruction::initialize_mint(&spl_token::ID, &mint.pubkey(), &payer, None, 6)
            .unwrap();
    send(context, &[create_ix, init_ix], &[mint]).await.unwrap();
}

// ---------------------------------------------------------------------------
// runtime helpers

async fn unix_time(context: &mut ProgramTestContext) -> i64 {
    let clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp
}

async fn set_unix_time(context: &mut ProgramTestContext, unix_timestamp: i64) {
    let mut clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp = unix_timestamp;
    context.set_sysvar(&clock);
}

async fn load<T: AccountDeserialize>(context: &mut ProgramTestContext, address: Pubkey) -> T {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .expect("account exists");
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}

async fn token_balance(context: &mut ProgramTestContext, address: Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .expect("token account exists");
    TokenAccount::unpack(&account.data).unwrap().amount
}

fn custom_code(err: BanksClientError) -> u32 {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Sign with the payer plus `signers` on a fresh blockhash so repeated
/// instructions never collide as duplicate transactions.
async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    context.banks_client.process_transaction(tx).await
}
