//! Client side of the sample staking program: `initialize`, `stake` and `unstake`.

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

pub const REWARD_VAULT_SEED: &[u8] = b"reward";
pub const STAKE_INFO_SEED: &[u8] = b"stake_info";

pub const INITIALIZE: &str = "initialize";
pub const STAKE: &str = "stake";
pub const UNSTAKE: &str = "unstake";

/// Creates the per-mint reward vault that pays out staking rewards.
pub fn initialize(
    program_id: &Pubkey,
    admin: &Pubkey,
    mint: &Pubkey,
    reward_vault: &Pubkey,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &instruction_data(INITIALIZE, &()),
        vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*reward_vault, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
        ],
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeAccounts {
    pub staker: Pubkey,
    pub mint: Pubkey,
    pub stake_info: Pubkey,
    /// The stake info PDA's associated token account.
    pub vault_token_account: Pubkey,
    pub staker_token_account: Pubkey,
}

pub fn stake(
    program_id: &Pubkey,
    accounts: &StakeAccounts,
    amount: u64,
) -> Result<Instruction, InterfaceError> {
    require_nonzero(amount)?;
    Ok(Instruction::new_with_bytes(
        *program_id,
        &instruction_data(STAKE, &amount),
        vec![
            AccountMeta::new(accounts.staker, true),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new(accounts.stake_info, false),
            AccountMeta::new(accounts.vault_token_account, false),
            AccountMeta::new(accounts.staker_token_account, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
            AccountMeta::new_readonly(SPL_ASSOCIATED_TOKEN_ACCOUNT_ID, false),
        ],
    ))
}

/// Returns `amount` staked tokens plus the slot-based reward paid from `reward_vault`.
pub fn unstake(
    program_id: &Pubkey,
    accounts: &StakeAccounts,
    reward_vault: &Pubkey,
    amount: u64,
) -> Result<Instruction, InterfaceError> {
    require_nonzero(amount)?;
    Ok(Instruction::new_with_bytes(
        *program_id,
        &instruction_data(UNSTAKE, &amount),
        vec![
            AccountMeta::new(accounts.staker, true),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new(accounts.stake_info, false),
            AccountMeta::new(accounts.vault_token_account, false),
            AccountMeta::new(*reward_vault, false),
            AccountMeta::new(accounts.staker_token_account, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
            AccountMeta::new_readonly(SPL_ASSOCIATED_TOKEN_ACCOUNT_ID, false),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::instruction_discriminator,
        program_ids::STAKE_PROGRAM_ID,
    };

    fn accounts() -> StakeAccounts {
        StakeAccounts {
            staker: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            stake_info: Pubkey::new_unique(),
            vault_token_account: Pubkey::new_unique(),
            staker_token_account: Pubkey::new_unique(),
        }
    }

    #[test]
    fn initialize_has_no_args() {
        let program_id = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let ix = initialize(&program_id, &admin, &Pubkey::new_unique(), &Pubkey::new_unique());
        assert_eq!(ix.data, instruction_discriminator(INITIALIZE));
        assert_eq!(ix.accounts[0].pubkey, admin);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts.len(), 5);
    }

    #[test]
    fn unstake_places_reward_vault_after_the_stake_vault() {
        let accounts = accounts();
        let reward_vault = Pubkey::new_unique();
        let ix = unstake(&STAKE_PROGRAM_ID, &accounts, &reward_vault, 5).unwrap();
        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[3].pubkey, accounts.vault_token_account);
        assert_eq!(ix.accounts[4].pubkey, reward_vault);
        assert_eq!(ix.accounts[5].pubkey, accounts.staker_token_account);
        assert_eq!(&ix.data[..8], &[90, 95, 107, 42, 205, 124, 50, 225]);
    }

    #[test]
    fn stake_rejects_zero() {
        assert_eq!(
            stake(&STAKE_PROGRAM_ID, &accounts(), 0),
            Err(InterfaceError::ZeroAmount)
        );
        let ix = stake(&STAKE_PROGRAM_ID, &accounts(), 7).unwrap();
        assert_eq!(&ix.data[..8], &[206, 176, 202, 18, 200, 209, 179, 108]);
        assert_eq!(&ix.data[8..], &7u64.to_le_bytes());
    }
}
