//! The remote ledger seam.
//!
//! Scripts only ever need a handful of request/response calls. They go through
//! [`LedgerConnection`] so the workflow runs unchanged against a live cluster through
//! [`RpcClient`] or against the in-memory mock used by the tests.

use async_trait::async_trait;
use solana_account::Account;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use solana_transaction_error::TransactionError;

use crate::error::BootcampResult;

/// Where a submitted transaction stands at a given commitment.
///
/// `None` means it hasn't reached the commitment (or isn't known yet). `Some(Err(_))` means it
/// landed and failed while executing.
pub type SignatureStatus = Option<Result<(), TransactionError>>;

#[async_trait]
pub trait LedgerConnection: Send + Sync {
    async fn get_balance(&self, address: &Pubkey) -> BootcampResult<u64>;

    async fn get_latest_blockhash(&self) -> BootcampResult<Hash>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> BootcampResult<u64>;

    /// Returns `None` when no account exists at `address`.
    async fn get_account(&self, address: &Pubkey) -> BootcampResult<Option<Account>>;

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> BootcampResult<Signature>;

    /// Sends a signed transaction once and returns its first signature.
    async fn send_transaction(&self, transaction: &VersionedTransaction)
        -> BootcampResult<Signature>;

    /// The status of `signature` at `commitment`. A single status query, no waiting.
    async fn confirmation_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> BootcampResult<SignatureStatus>;
}

#[async_trait]
impl LedgerConnection for RpcClient {
    async fn get_balance(&self, address: &Pubkey) -> BootcampResult<u64> {
        Ok(RpcClient::get_balance(self, address).await?)
    }

    async fn get_latest_blockhash(&self) -> BootcampResult<Hash> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> BootcampResult<u64> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }

    async fn get_account(&self, address: &Pubkey) -> BootcampResult<Option<Account>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> BootcampResult<Signature> {
        Ok(RpcClient::request_airdrop(self, address, lamports).await?)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> BootcampResult<Signature> {
        Ok(RpcClient::send_transaction(self, transaction).await?)
    }

    async fn confirmation_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> BootcampResult<SignatureStatus> {
        Ok(self
            .get_signature_status_with_commitment(signature, commitment)
            .await?)
    }
}
