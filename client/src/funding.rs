//! Airdrop-if-low-balance, the first step of every devnet script.

use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
};

use crate::{
    connection::LedgerConnection,
    error::BootcampResult,
    transactions::{
        wait_for_confirmation,
        ConfirmConfig,
    },
    LAMPORTS_PER_SOL,
};

/// Balances at or below this trigger an airdrop.
pub const DEFAULT_FUNDING_THRESHOLD: u64 = LAMPORTS_PER_SOL;
pub const DEFAULT_AIRDROP_AMOUNT: u64 = LAMPORTS_PER_SOL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FundingOutcome {
    Sufficient {
        balance: u64,
    },
    Funded {
        signature: Signature,
        previous_balance: u64,
    },
}

impl FundingOutcome {
    pub fn was_funded(&self) -> bool {
        matches!(self, Self::Funded { .. })
    }
}

/// Reads the balance of `address`; when it's `<= threshold`, requests one airdrop of `amount` and
/// blocks until it's confirmed.
pub async fn fund_if_low<C: LedgerConnection + ?Sized>(
    connection: &C,
    address: &Pubkey,
    threshold: u64,
    amount: u64,
    confirm: &ConfirmConfig,
) -> BootcampResult<FundingOutcome> {
    let balance = connection.get_balance(address).await?;
    if balance > threshold {
        return Ok(FundingOutcome::Sufficient { balance });
    }

    let signature = connection.request_airdrop(address, amount).await?;
    wait_for_confirmation(connection, &signature, confirm).await?;

    Ok(FundingOutcome::Funded {
        signature,
        previous_balance: balance,
    })
}
