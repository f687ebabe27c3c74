//! A liquidity pool of the sample AMM, identified by `(amm, mint_a, mint_b)`.
//!
//! Every account the pool's instructions touch is derived here from the pool's seeds, so callers
//! only ever supply the AMM, the two mints and the depositor.

use bootcamp_interface::{
    instructions::amm::{
        withdraw_liquidity,
        WithdrawLiquidityAccounts,
    },
    program_ids::SPL_TOKEN_ID,
};
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_interface::address::get_associated_token_address;

use crate::{
    context::token::TokenContext,
    error::BootcampResult,
    pda::{
        find_liquidity_mint_address,
        find_pool_address,
        find_pool_authority_address,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolContext {
    pub program_id: Pubkey,
    pub amm: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
}

impl PoolContext {
    pub const fn new(program_id: Pubkey, amm: Pubkey, mint_a: Pubkey, mint_b: Pubkey) -> Self {
        Self {
            program_id,
            amm,
            mint_a,
            mint_b,
        }
    }

    pub fn pool(&self) -> Pubkey {
        find_pool_address(&self.program_id, &self.amm, &self.mint_a, &self.mint_b).0
    }

    pub fn pool_authority(&self) -> Pubkey {
        find_pool_authority_address(&self.program_id, &self.amm, &self.mint_a, &self.mint_b).0
    }

    pub fn liquidity_mint(&self) -> Pubkey {
        find_liquidity_mint_address(&self.program_id, &self.amm, &self.mint_a, &self.mint_b).0
    }

    /// The pool's reserve of token A, held by the pool authority.
    pub fn pool_account_a(&self) -> Pubkey {
        get_associated_token_address(&self.pool_authority(), &self.mint_a)
    }

    pub fn pool_account_b(&self) -> Pubkey {
        get_associated_token_address(&self.pool_authority(), &self.mint_b)
    }

    /// The depositor's token accounts for A, B and the LP mint, in that order.
    pub fn depositor_accounts(&self, depositor: &Pubkey) -> [Pubkey; 3] {
        [
            get_associated_token_address(depositor, &self.mint_a),
            get_associated_token_address(depositor, &self.mint_b),
            get_associated_token_address(depositor, &self.liquidity_mint()),
        ]
    }

    pub fn withdraw_liquidity_accounts(&self, depositor: &Pubkey) -> WithdrawLiquidityAccounts {
        let [depositor_account_a, depositor_account_b, depositor_account_liquidity] =
            self.depositor_accounts(depositor);
        WithdrawLiquidityAccounts {
            pool: self.pool(),
            pool_authority: self.pool_authority(),
            mint_a: self.mint_a,
            mint_b: self.mint_b,
            mint_liquidity: self.liquidity_mint(),
            pool_account_a: self.pool_account_a(),
            pool_account_b: self.pool_account_b(),
            depositor_account_a,
            depositor_account_b,
            depositor_account_liquidity,
            depositor: *depositor,
        }
    }

    /// Burns `amount` LP tokens of `depositor` for their share of both reserves.
    pub fn withdraw_liquidity(
        &self,
        depositor: &Pubkey,
        amount: u64,
    ) -> BootcampResult<Instruction> {
        Ok(withdraw_liquidity(
            &self.program_id,
            &self.withdraw_liquidity_accounts(depositor),
            amount,
        )?)
    }

    /// Idempotently creates the depositor's A and B token accounts so the withdrawal has
    /// somewhere to land.
    pub fn create_depositor_token_accounts(
        &self,
        payer: &Pubkey,
        depositor: &Pubkey,
    ) -> [Instruction; 2] {
        [self.mint_a, self.mint_b].map(|mint| {
            TokenContext::new(None, mint, SPL_TOKEN_ID, 0).create_ata_idempotent(payer, depositor)
        })
    }
}
