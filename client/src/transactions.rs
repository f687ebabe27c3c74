use std::time::Duration;

use solana_commitment_config::CommitmentConfig;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
};
use tokio::time::sleep;

use crate::{
    config::ClientConfig,
    connection::LedgerConnection,
    envelope::{
        SignedEnvelope,
        UnsignedEnvelope,
    },
    error::{
        BootcampError,
        BootcampResult,
    },
    funding::{
        fund_if_low,
        FundingOutcome,
    },
    logs::{
        log_error,
        log_info,
        log_success,
        LogColor,
    },
    pretty::{
        explorer::{
            explorer_url,
            ExplorerTarget,
        },
        instruction_error::PrettyInstructionError,
        transaction::PrettyEnvelope,
    },
};

#[derive(Clone, Debug)]
pub struct SendTransactionConfig {
    /// When set, a compute unit limit and price are prepended to the caller's instructions.
    pub compute_budget: Option<u32>,
    pub debug_logs: bool,
    /// Block until the transaction reaches the client's commitment after sending it.
    pub wait_for_confirmation: bool,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: None,
            debug_logs: true,
            wait_for_confirmation: true,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConfirmConfig {
    pub commitment: CommitmentConfig,
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            max_attempts: 60,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Submits `envelope` exactly once.
///
/// An envelope missing any required signature is refused with
/// [`BootcampError::MissingSignatures`] before anything is sent.
pub async fn submit<C: LedgerConnection + ?Sized>(
    connection: &C,
    envelope: &SignedEnvelope,
) -> BootcampResult<Signature> {
    envelope.verify()?;
    connection.send_transaction(envelope.transaction()).await
}

/// Polls the status of `signature` until it reaches `config.commitment`.
///
/// This only queries status; the transaction is never resent. A transaction that landed but
/// failed is reported as [`BootcampError::Rejected`] with its execution error.
pub async fn wait_for_confirmation<C: LedgerConnection + ?Sized>(
    connection: &C,
    signature: &Signature,
    config: &ConfirmConfig,
) -> BootcampResult<()> {
    for attempt in 0..config.max_attempts {
        match connection
            .confirmation_status(signature, config.commitment)
            .await?
        {
            Some(Ok(())) => return Ok(()),
            Some(Err(error)) => {
                return Err(BootcampError::Rejected {
                    detail: format!("transaction {signature} failed: {error}"),
                    error: Some(error),
                })
            }
            None => {}
        }
        if attempt + 1 < config.max_attempts {
            sleep(config.poll_interval).await;
        }
    }
    Err(BootcampError::Unconfirmed(*signature))
}

/// Prepends the configured compute budget instructions. The caller's instructions keep their
/// relative order.
pub fn with_compute_budget(
    compute_budget: Option<u32>,
    instructions: &[Instruction],
) -> Vec<Instruction> {
    [
        compute_budget.map_or(vec![], |budget| {
            vec![
                ComputeBudgetInstruction::set_compute_unit_limit(budget),
                ComputeBudgetInstruction::set_compute_unit_price(1),
            ]
        }),
        instructions.to_vec(),
    ]
    .concat()
}

/// The transaction builder/submitter bound to a ledger connection.
pub struct BootcampClient<C> {
    pub connection: C,
    pub config: ClientConfig,
}

impl<C: LedgerConnection> BootcampClient<C> {
    pub fn new(connection: C, config: ClientConfig) -> Self {
        Self { connection, config }
    }

    pub async fn balance(&self, address: &Pubkey) -> BootcampResult<u64> {
        self.connection.get_balance(address).await
    }

    pub async fn rent_exempt_lamports(&self, data_len: usize) -> BootcampResult<u64> {
        self.connection
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
    }

    /// Fetches an account, failing with [`BootcampError::UninitializedAccount`] if it's absent.
    pub async fn account(&self, address: &Pubkey) -> BootcampResult<solana_account::Account> {
        self.connection
            .get_account(address)
            .await?
            .ok_or(BootcampError::UninitializedAccount(*address))
    }

    /// Airdrops `amount` to `address` if its balance is at or below `threshold`.
    pub async fn fund_if_low(
        &self,
        address: &Pubkey,
        threshold: u64,
        amount: u64,
    ) -> BootcampResult<FundingOutcome> {
        let outcome = fund_if_low(
            &self.connection,
            address,
            threshold,
            amount,
            &self.config.confirm,
        )
        .await?;

        match &outcome {
            FundingOutcome::Sufficient { balance } => {
                log_info("Balance", format!("{balance} lamports, no airdrop needed"))
            }
            FundingOutcome::Funded {
                signature,
                previous_balance,
            } => log_success(
                "Airdrop",
                format!("{amount} lamports (was {previous_balance}): {signature}"),
            ),
        }

        Ok(outcome)
    }

    /// Fetches a fresh blockhash and assembles `instructions` paid for by `payer`.
    pub async fn assemble(
        &self,
        payer: &Pubkey,
        instructions: &[Instruction],
    ) -> BootcampResult<UnsignedEnvelope> {
        if instructions.is_empty() {
            return Err(BootcampError::EmptyInstructions);
        }
        let blockhash = self.connection.get_latest_blockhash().await?;
        let instructions = with_compute_budget(self.config.send.compute_budget, instructions);
        UnsignedEnvelope::assemble(payer, &instructions, blockhash)
    }

    /// Assembles, signs with `payer` plus `signers`, submits and (by default) confirms.
    pub async fn send_transaction(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> BootcampResult<Signature> {
        let envelope = self.assemble(&payer.pubkey(), instructions).await?;

        let mut all_signers = vec![payer as &dyn Signer];
        all_signers.extend(
            signers
                .iter()
                .filter(|signer| signer.pubkey() != payer.pubkey())
                .map(|signer| *signer as &dyn Signer),
        );
        let signed = envelope.sign(&all_signers)?;

        self.submit_and_confirm(&signed).await
    }

    pub async fn send_single_signer(
        &self,
        signer: &Keypair,
        instructions: impl AsRef<[Instruction]>,
    ) -> BootcampResult<Signature> {
        self.send_transaction(signer, &[], instructions.as_ref())
            .await
    }

    /// Submits an already signed envelope, logging the outcome.
    pub async fn submit_and_confirm(&self, envelope: &SignedEnvelope) -> BootcampResult<Signature> {
        let res = async {
            let signature = submit(&self.connection, envelope).await?;
            if self.config.send.wait_for_confirmation {
                wait_for_confirmation(&self.connection, &signature, &self.config.confirm).await?;
            }
            Ok::<_, BootcampError>(signature)
        }
        .await;

        match res {
            Ok(signature) => {
                if self.config.send.debug_logs {
                    self.log_submission(envelope, &signature);
                }
                Ok(signature)
            }
            Err(error) => {
                log_transaction_error(&error, envelope);
                Err(error)
            }
        }
    }

    fn log_submission(&self, envelope: &SignedEnvelope, signature: &Signature) {
        use colored::Colorize;

        println!();
        let sender_info = format!("{}: {}", "sender".color(LogColor::Gray), envelope.payer());
        log_success("Signature", format!("{signature}\n{sender_info}"));
        println!(
            "\n{}",
            PrettyEnvelope {
                indent_size: 2,
                instructions: envelope.instructions(),
            }
        );
        log_info(
            "Explorer",
            explorer_url(ExplorerTarget::Transaction(signature), &self.config),
        );
    }
}

pub fn log_transaction_error(error: &BootcampError, envelope: &SignedEnvelope) {
    match error
        .transaction_error()
        .and_then(|err| PrettyInstructionError::new(err, envelope.instructions()))
    {
        Some(pretty) => print!("{pretty}"),
        None => log_error("Transaction failed", error),
    }
    log_info("Payer", envelope.payer());
}
