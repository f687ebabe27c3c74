//! Client side of the sample constant-product AMM's `withdraw_liquidity` instruction.

use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    anchor::instruction_data,
    error::InterfaceError,
    instructions::require_nonzero,
    program_ids::{
        SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
        SPL_TOKEN_ID,
        SYSTEM_PROGRAM_ID,
    },
};

/// Pools are seeded with `[amm, mint_a, mint_b]`; these suffixes derive the pool's other PDAs.
pub const AUTHORITY_SEED: &[u8] = b"authority";
pub const MINT_LIQUIDITY_SEED: &[u8] = b"mint_liquidity";

pub const WITHDRAW_LIQUIDITY: &str = "withdraw_liquidity";

/// Every account `withdraw_liquidity` reads or writes, named after the program's account struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawLiquidityAccounts {
    pub pool: Pubkey,
    pub pool_authority: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub mint_liquidity: Pubkey,
    pub pool_account_a: Pubkey,
    pub pool_account_b: Pubkey,
    pub depositor_account_a: Pubkey,
    pub depositor_account_b: Pubkey,
    pub depositor_account_liquidity: Pubkey,
    pub depositor: Pubkey,
}

impl WithdrawLiquidityAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.pool, false),
            AccountMeta::new_readonly(self.pool_authority, false),
            AccountMeta::new_readonly(self.mint_a, false),
            AccountMeta::new_readonly(self.mint_b, false),
            AccountMeta::new(self.mint_liquidity, false),
            AccountMeta::new(self.pool_account_a, false),
            AccountMeta::new(self.pool_account_b, false),
            AccountMeta::new(self.depositor_account_a, false),
            AccountMeta::new(self.depositor_account_b, false),
            AccountMeta::new(self.depositor_account_liquidity, false),
            AccountMeta::new(self.depositor, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
            AccountMeta::new_readonly(SPL_ASSOCIATED_TOKEN_ACCOUNT_ID, false),
        ]
    }
}

/// Burns `amount` LP tokens from the depositor in exchange for their share of both pool reserves.
pub fn withdraw_liquidity(
    program_id: &Pubkey,
    accounts: &WithdrawLiquidityAccounts,
    amount: u64,
) -> Result<Instruction, InterfaceError> {
    require_nonzero(amount)?;
    Ok(Instruction::new_with_bytes(
        *program_id,
        &instruction_data(WITHDRAW_LIQUIDITY, &amount),
        accounts.to_account_metas(),
    ))
}
