use borsh::BorshDeserialize;
use solana_pubkey::Pubkey;

use crate::{
    anchor::{
        account_discriminator,
        DISCRIMINATOR_LEN,
    },
    error::InterfaceError,
};

/// The staking program's per-(staker, mint) position account.
#[derive(BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub staker: Pubkey,
    pub mint: Pubkey,
    /// The slot the current position was (re)staked at.
    pub stake_at: u64,
    pub is_staked: bool,
    pub amount: u64,
}

impl StakeInfo {
    pub const NAME: &'static str = "StakeInfo";
    pub const LEN: usize = DISCRIMINATOR_LEN + 32 + 32 + 8 + 1 + 8;

    /// Decodes the account body after checking its discriminator. Trailing bytes are ignored.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, InterfaceError> {
        if data.len() < Self::LEN {
            return Err(InterfaceError::AccountDataTooShort {
                len: data.len(),
                expected: Self::LEN,
            });
        }
        let (discriminator, body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != account_discriminator(Self::NAME) {
            return Err(InterfaceError::InvalidAccountDiscriminator(Self::NAME));
        }

        borsh::from_slice(&body[..Self::LEN - DISCRIMINATOR_LEN]).map_err(|e| {
            InterfaceError::MalformedAccountData {
                account: Self::NAME,
                reason: e.to_string(),
            }
        })
    }
}
