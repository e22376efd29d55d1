//! Token transfer utilities
//!
//! `SplTokenLedger` implements the `TokenLedger` seam with SPL Token CPIs.
//! User-owned accounts are debited under the signer's authority, vaults and
//! the reward mint under the pool authority PDA.

use crate::logic::{LedgerError, TokenAccountRole, TokenLedger};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo, Transfer};

pub struct SplTokenLedger<'a, 'info> {
    token_program: AccountInfo<'info>,
    user_authority: AccountInfo<'info>,
    pool_authority: AccountInfo<'info>,
    pool_authority_seeds: &'a [&'a [u8]],
    reward_mint: Option<AccountInfo<'info>>,
    accounts: Vec<(TokenAccountRole, AccountInfo<'info>)>,
}

impl<'a, 'info> SplTokenLedger<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        user_authority: AccountInfo<'info>,
        pool_authority: AccountInfo<'info>,
        pool_authority_seeds: &'a [&'a [u8]],
    ) -> Self {
        Self {
            token_program,
            user_authority,
            pool_authority,
            pool_authority_seeds,
            reward_mint: None,
            accounts: Vec::with_capacity(4),
        }
    }

    /// Register the token account that plays `role` in this instruction
    pub fn with_account(mut self, role: TokenAccountRole, account: AccountInfo<'info>) -> Self {
        self.accounts.push((role, account));
        self
    }

    pub fn with_reward_mint(mut self, mint: AccountInfo<'info>) -> Self {
        self.reward_mint = Some(mint);
        self
    }

    fn account(&self, role: TokenAccountRole) -> core::result::Result<AccountInfo<'info>, LedgerError> {
        self.accounts
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, info)| info.clone())
            .ok_or(LedgerError::UnknownAccount(role))
    }
}

impl<'a, 'info> TokenLedger for SplTokenLedger<'a, 'info> {
    fn transfer(
        &mut self,
        from: TokenAccountRole,
        to: TokenAccountRole,
        amount: u64,
    ) -> core::result::Result<(), LedgerError> {
        let cpi_accounts = Transfer {
            from: self.account(from)?,
            to: self.account(to)?,
            authority: match from {
                TokenAccountRole::Vault(_) => self.pool_authority.clone(),
                TokenAccountRole::User(_) | TokenAccountRole::UserReward => {
                    self.user_authority.clone()
                }
            },
        };
        let result = match from {
            TokenAccountRole::Vault(_) => {
                let signer_seeds = [self.pool_authority_seeds];
                let cpi_ctx = CpiContext::new_with_signer(
                    self.token_program.clone(),
                    cpi_accounts,
                    &signer_seeds,
                );
                token::transfer(cpi_ctx, amount)
            }
            _ => {
                let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
                token::transfer(cpi_ctx, amount)
            }
        };
        result.map_err(|e| LedgerError::Cpi(e.to_string()))
    }

    fn mint_reward(
        &mut self,
        to: TokenAccountRole,
        amount: u64,
    ) -> core::result::Result<(), LedgerError> {
        let mint = self
            .reward_mint
            .clone()
            .ok_or(LedgerError::UnknownAccount(to))?;
        let cpi_accounts = MintTo {
            mint,
            to: self.account(to)?,
            authority: self.pool_authority.clone(),
        };
        let signer_seeds = [self.pool_authority_seeds];
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            &signer_seeds,
        );
        token::mint_to(cpi_ctx, amount).map_err(|e| LedgerError::Cpi(e.to_string()))
    }
}
