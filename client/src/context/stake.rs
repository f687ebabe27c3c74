//! The sample staking program, scoped to one staked mint.

use bootcamp_interface::{
    instructions::stake::{
        self,
        StakeAccounts,
    },
    state::StakeInfo,
};
use solana_account::Account;
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_interface::address::get_associated_token_address;

use crate::{
    error::{
        BootcampError,
        BootcampResult,
    },
    pda::{
        find_reward_vault_address,
        find_stake_info_address,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeContext {
    pub program_id: Pubkey,
    pub mint: Pubkey,
}

impl StakeContext {
    pub const fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self { program_id, mint }
    }

    pub fn reward_vault(&self) -> Pubkey {
        find_reward_vault_address(&self.program_id, &self.mint).0
    }

    pub fn stake_info(&self, staker: &Pubkey) -> Pubkey {
        find_stake_info_address(&self.program_id, staker, &self.mint).0
    }

    pub fn accounts(&self, staker: &Pubkey) -> StakeAccounts {
        let stake_info = self.stake_info(staker);
        StakeAccounts {
            staker: *staker,
            mint: self.mint,
            stake_info,
            vault_token_account: get_associated_token_address(&stake_info, &self.mint),
            staker_token_account: get_associated_token_address(staker, &self.mint),
        }
    }

    pub fn initialize(&self, admin: &Pubkey) -> Instruction {
        stake::initialize(&self.program_id, admin, &self.mint, &self.reward_vault())
    }

    pub fn stake(&self, staker: &Pubkey, amount: u64) -> BootcampResult<Instruction> {
        Ok(stake::stake(&self.program_id, &self.accounts(staker), amount)?)
    }

    pub fn unstake(&self, staker: &Pubkey, amount: u64) -> BootcampResult<Instruction> {
        Ok(stake::unstake(
            &self.program_id,
            &self.accounts(staker),
            &self.reward_vault(),
            amount,
        )?)
    }

    /// Decodes a fetched stake info account, checking it belongs to the staking program.
    pub fn decode_stake_info(
        &self,
        address: &Pubkey,
        account: &Account,
    ) -> BootcampResult<StakeInfo> {
        if account.owner != self.program_id {
            return Err(BootcampError::InvalidAccountData {
                address: *address,
                reason: format!("owned by {}, not the staking program", account.owner),
            });
        }
        StakeInfo::try_from_account_data(&account.data).map_err(|e| {
            BootcampError::InvalidAccountData {
                address: *address,
                reason: e.to_string(),
            }
        })
    }
}
