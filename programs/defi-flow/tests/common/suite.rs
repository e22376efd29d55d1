//! Program-level test suite
//!
//! Runs the program natively under `solana-program-test` with the SPL Token
//! program loaded, so account constraints, PDA-signed token CPIs and
//! position closing run exactly as they do on a validator. The payer doubles
//! as pool admin, fee/oracle authority and liquidity provider.

use super::{program_err, TestResult};
use anchor_lang::{error::ERROR_CODE_OFFSET, AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::token::spl_token;
use defi_flow::constants::{
    FEE_CONFIG_SEED, POOL_AUTHORITY_SEED, POOL_SEED, POSITION_SEED, PRICE_FEED_SEED,
    REWARD_MINT_SEED, STAKE_SEED, STAKING_VAULT_SEED, VAULT_SEED,
};
use defi_flow::error::FlowError;
use defi_flow::state::{
    FeeCurve, GuardConfig, LpPosition, MitigationMode, Pool, StakeRecord, StakingVault,
    SwapDirection,
};
use defi_flow::{accounts, instruction, InitializePoolParams};
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, program_pack::Pack};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program, sysvar,
    transaction::{Transaction, TransactionError},
};

/// Starting balance of each of the user's pool-asset accounts
pub const USER_FUNDING: u64 = 10_000;

// The generated entrypoint ties the account slice to its elements' lifetime
fn process_instruction<'a, 'b, 'c, 'd>(
    program_id: &'a Pubkey,
    accounts: &'b [AccountInfo<'c>],
    data: &'d [u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    defi_flow::entry(program_id, accounts, data)
}

pub fn pda(seeds: &[&[u8]]) -> Pubkey {
    Pubkey::find_program_address(seeds, &defi_flow::ID).0
}

/// Custom program error carried by a failed transaction, if any
pub fn custom_error_code(err: BanksClientError) -> Option<u32> {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

pub fn flow_error_code(err: FlowError) -> u32 {
    err as u32 + ERROR_CODE_OFFSET
}

pub struct PoolSuite {
    pub context: ProgramTestContext,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub pool: Pubkey,
    pub pool_authority: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub reward_mint: Pubkey,
    pub fee_config: Pubkey,
    pub price_feed: Pubkey,
    pub staking_vault: Pubkey,
    pub position: Pubkey,
    pub stake_record: Pubkey,
    pub user_token_a: Pubkey,
    pub user_token_b: Pubkey,
    pub user_reward: Pubkey,
}

impl PoolSuite {
    /// Fresh pool with a funded user and empty reserves
    pub async fn start() -> TestResult<Self> {
        let program_test = ProgramTest::new(
            "defi_flow",
            defi_flow::ID,
            processor!(process_instruction),
        );
        let mut context = program_test.start_with_context().await;

        let mint_a = create_mint(&mut context).await?;
        let mint_b = create_mint(&mut context).await?;
        let user = context.payer.pubkey();

        let pool = pda(&[POOL_SEED, mint_a.as_ref(), mint_b.as_ref()]);
        let mut suite = Self {
            mint_a,
            mint_b,
            pool,
            pool_authority: pda(&[POOL_AUTHORITY_SEED, pool.as_ref()]),
            vault_a: pda(&[VAULT_SEED, pool.as_ref(), mint_a.as_ref()]),
            vault_b: pda(&[VAULT_SEED, pool.as_ref(), mint_b.as_ref()]),
            reward_mint: pda(&[REWARD_MINT_SEED, pool.as_ref()]),
            fee_config: pda(&[FEE_CONFIG_SEED, pool.as_ref()]),
            price_feed: pda(&[PRICE_FEED_SEED, pool.as_ref()]),
            staking_vault: pda(&[STAKING_VAULT_SEED, pool.as_ref()]),
            position: pda(&[POSITION_SEED, pool.as_ref(), user.as_ref()]),
            stake_record: pda(&[STAKE_SEED, pool.as_ref(), user.as_ref()]),
            user_token_a: Pubkey::default(),
            user_token_b: Pubkey::default(),
            user_reward: Pubkey::default(),
            context,
        };

        let init = suite.initialize_pool_ix(default_params(user));
        suite.process(&[init], &[]).await?;

        suite.user_token_a = suite.create_token_account(mint_a).await?;
        suite.user_token_b = suite.create_token_account(mint_b).await?;
        suite.user_reward = suite.create_token_account(suite.reward_mint).await?;
        suite.mint_to(mint_a, suite.user_token_a, USER_FUNDING).await?;
        suite.mint_to(mint_b, suite.user_token_b, USER_FUNDING).await?;

        Ok(suite)
    }

    pub fn user(&self) -> Pubkey {
        self.context.payer.pubkey()
    }

    /// Sign with the payer plus `signers` and submit
    pub async fn process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self.context.banks_client.get_latest_blockhash().await?;
        let mut all_signers = vec![&self.context.payer];
        all_signers.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.context.payer.pubkey()),
            all_signers.as_slice(),
            blockhash,
        );
        self.context.banks_client.process_transaction(tx).await
    }

    // ========================================================================
    // Token setup
    // ========================================================================

    pub async fn create_token_account(&mut self, mint: Pubkey) -> TestResult<Pubkey> {
        let account = Keypair::new();
        let rent = self.context.banks_client.get_rent().await?;
        let instructions = [
            system_instruction::create_account(
                &self.user(),
                &account.pubkey(),
                rent.minimum_balance(spl_token::state::Account::LEN),
                spl_token::state::Account::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_account(
                &spl_token::id(),
                &account.pubkey(),
                &mint,
                &self.user(),
            )?,
        ];
        self.process(&instructions, &[&account]).await?;
        Ok(account.pubkey())
    }

    pub async fn mint_to(&mut self, mint: Pubkey, account: Pubkey, amount: u64) -> TestResult {
        let ix = spl_token::instruction::mint_to(
            &spl_token::id(),
            &mint,
            &account,
            &self.user(),
            &[],
            amount,
        )?;
        self.process(&[ix], &[]).await?;
        Ok(())
    }

    // ========================================================================
    // Instructions
    // ========================================================================

    pub fn initialize_pool_ix(&self, params: InitializePoolParams) -> Instruction {
        build_ix(
            accounts::InitializePool {
                admin: self.user(),
                pool: self.pool,
                mint_a: self.mint_a,
                mint_b: self.mint_b,
                pool_authority: self.pool_authority,
                vault_a: self.vault_a,
                vault_b: self.vault_b,
                reward_mint: self.reward_mint,
                fee_config: self.fee_config,
                price_feed: self.price_feed,
                staking_vault: self.staking_vault,
                token_program: spl_token::id(),
                system_program: system_program::id(),
                rent: sysvar::rent::id(),
            },
            instruction::InitializePool { params },
        )
    }

    pub fn provide_liquidity_ix(&self, amount_a: u64, amount_b: u64) -> Instruction {
        build_ix(
            accounts::ProvideLiquidity {
                user: self.user(),
                pool: self.pool,
                position: self.position,
                user_token_a: self.user_token_a,
                user_token_b: self.user_token_b,
                vault_a: self.vault_a,
                vault_b: self.vault_b,
                reward_mint: self.reward_mint,
                user_reward_account: self.user_reward,
                pool_authority: self.pool_authority,
                token_program: spl_token::id(),
                system_program: system_program::id(),
            },
            instruction::ProvideLiquidity { amount_a, amount_b },
        )
    }

    pub fn remove_liquidity_ix(&self, shares: u64) -> Instruction {
        build_ix(
            accounts::RemoveLiquidity {
                user: self.user(),
                pool: self.pool,
                position: self.position,
                user_token_a: self.user_token_a,
                user_token_b: self.user_token_b,
                vault_a: self.vault_a,
                vault_b: self.vault_b,
                pool_authority: self.pool_authority,
                token_program: spl_token::id(),
            },
            instruction::RemoveLiquidity { shares },
        )
    }

    /// Swap accounts, exposed so callers can substitute one
    pub fn swap_accounts(&self) -> accounts::SwapTokens {
        accounts::SwapTokens {
            user: self.user(),
            pool: self.pool,
            user_token_a: self.user_token_a,
            user_token_b: self.user_token_b,
            vault_a: self.vault_a,
            vault_b: self.vault_b,
            pool_authority: self.pool_authority,
            token_program: spl_token::id(),
        }
    }

    pub fn swap_ix_with(
        &self,
        accounts: accounts::SwapTokens,
        amount_in: u64,
        min_amount_out: u64,
        direction: SwapDirection,
    ) -> Instruction {
        build_ix(
            accounts,
            instruction::SwapTokens {
                amount_in,
                min_amount_out,
                direction,
            },
        )
    }

    pub fn swap_ix(&self, amount_in: u64, min_amount_out: u64, direction: SwapDirection) -> Instruction {
        self.swap_ix_with(self.swap_accounts(), amount_in, min_amount_out, direction)
    }

    pub fn stake_ix(&self, amount: u64) -> Instruction {
        build_ix(
            accounts::StakeTokens {
                user: self.user(),
                pool: self.pool,
                staking_vault: self.staking_vault,
                position: self.position,
                stake_record: self.stake_record,
                system_program: system_program::id(),
            },
            instruction::StakeTokens { amount },
        )
    }

    pub fn unstake_ix(&self, amount: u64) -> Instruction {
        build_ix(
            accounts::UnstakeTokens {
                user: self.user(),
                pool: self.pool,
                staking_vault: self.staking_vault,
                position: self.position,
                stake_record: self.stake_record,
                system_program: system_program::id(),
            },
            instruction::UnstakeTokens { amount },
        )
    }

    pub fn claim_rewards_ix(&self) -> Instruction {
        build_ix(
            accounts::ClaimRewards {
                user: self.user(),
                pool: self.pool,
                staking_vault: self.staking_vault,
                stake_record: self.stake_record,
                reward_mint: self.reward_mint,
                user_reward_account: self.user_reward,
                pool_authority: self.pool_authority,
                token_program: spl_token::id(),
            },
            instruction::ClaimRewards {},
        )
    }

    pub fn distribute_rewards_ix(&self, amount: u64) -> Instruction {
        build_ix(
            accounts::DistributeRewards {
                admin: self.user(),
                pool: self.pool,
                staking_vault: self.staking_vault,
            },
            instruction::DistributeRewards { amount },
        )
    }

    // ========================================================================
    // Account reads
    // ========================================================================

    async fn anchor_account<T: AccountDeserialize>(&mut self, address: Pubkey) -> TestResult<Option<T>> {
        let Some(account) = self.context.banks_client.get_account(address).await? else {
            return Ok(None);
        };
        let state = T::try_deserialize(&mut account.data.as_slice()).map_err(program_err)?;
        Ok(Some(state))
    }

    pub async fn pool_state(&mut self) -> TestResult<Pool> {
        self.anchor_account(self.pool)
            .await?
            .ok_or_else(|| anyhow::anyhow!("pool account missing"))
    }

    pub async fn staking_vault_state(&mut self) -> TestResult<StakingVault> {
        self.anchor_account(self.staking_vault)
            .await?
            .ok_or_else(|| anyhow::anyhow!("staking vault missing"))
    }

    /// `None` once the position has been closed
    pub async fn position_state(&mut self) -> TestResult<Option<LpPosition>> {
        self.anchor_account(self.position).await
    }

    pub async fn stake_record_state(&mut self) -> TestResult<Option<StakeRecord>> {
        self.anchor_account(self.stake_record).await
    }

    pub async fn token_balance(&mut self, address: Pubkey) -> TestResult<u64> {
        let account = self
            .context
            .banks_client
            .get_account(address)
            .await?
            .ok_or_else(|| anyhow::anyhow!("token account {} missing", address))?;
        Ok(spl_token::state::Account::unpack(&account.data)?.amount)
    }
}

fn build_ix(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: defi_flow::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

pub fn default_params(authority: Pubkey) -> InitializePoolParams {
    InitializePoolParams {
        fee_bps: 25,
        ratio_tolerance_bps: 100,
        deposit_reward_bps: 100,
        fee_curve: FeeCurve {
            min_fee_bps: 10,
            max_fee_bps: 100,
            low_volatility: 10,
            high_volatility: 100,
        },
        volatility_window_size: 8,
        guard: GuardConfig {
            mode: MitigationMode::WidenFee,
            il_surcharge_bps: 50,
            restricted_max_swap_bps: 100,
            max_price_age_secs: 300,
        },
        fee_authority: authority,
        oracle_authority: authority,
    }
}

async fn create_mint(context: &mut ProgramTestContext) -> TestResult<Pubkey> {
    let mint = Keypair::new();
    let payer = context.payer.pubkey();
    let rent = context.banks_client.get_rent().await?;
    let instructions = [
        system_instruction::create_account(
            &payer,
            &mint.pubkey(),
            rent.minimum_balance(spl_token::state::Mint::LEN),
            spl_token::state::Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint(&spl_token::id(), &mint.pubkey(), &payer, None, 6)?,
    ];
    let blockhash = context.banks_client.get_latest_blockhash().await?;
    let tx = Transaction::new_signed_with_payer(
        &instructions,
        Some(&payer),
        &[&context.payer, &mint],
        blockhash,
    );
    context.banks_client.process_transaction(tx).await?;
    Ok(mint.pubkey())
}
