//! An in-memory [`LedgerConnection`].
//!
//! Balances, blockhashes and signature statuses are tracked locally. Submitted transactions go
//! through the same checks a validator's preflight would run for the cases the scripts care about:
//! every required signature must verify, the blockhash must still be live, the fee payer must cover
//! the fee, and System program transfers/account creations must be fundable. Instructions for any
//! other program are recorded in order but don't touch balances.
//!
//! With [`MockLedger::skip_preflight`] set, a transaction whose instructions fail still lands: the
//! fee is charged and the failure is reported through its signature status.
//!
//! Every call is appended to a log so tests can assert on the exact sequence of remote requests.

use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        Mutex,
        MutexGuard,
        PoisonError,
    },
};

use async_trait::async_trait;
use bootcamp_interface::program_ids::SYSTEM_PROGRAM_ID;
use solana_account::Account;
use solana_commitment_config::CommitmentConfig;
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_instruction_error::InstructionError;
use solana_sdk::{
    hash::Hash,
    message::VersionedMessage,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use solana_system_interface::{
    error::SystemError,
    instruction::SystemInstruction,
};
use solana_transaction_error::TransactionError;

use crate::{
    connection::{
        LedgerConnection,
        SignatureStatus,
    },
    envelope::verify_signatures,
    error::{
        BootcampError,
        BootcampResult,
    },
};

pub const DEFAULT_LAMPORTS_PER_SIGNATURE: u64 = 5_000;

const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;
const LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;
const EXEMPTION_THRESHOLD_YEARS: u64 = 2;

/// One remote request, as seen by the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    GetBalance(Pubkey),
    GetLatestBlockhash,
    GetMinimumBalanceForRentExemption(usize),
    GetAccount(Pubkey),
    RequestAirdrop { address: Pubkey, lamports: u64 },
    SendTransaction(Signature),
    ConfirmationStatus(Signature),
}

/// How many status queries a signature needs before it reports as confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    Immediate,
    AfterPolls(u32),
    Never,
}

struct Landed {
    /// Number of status queries made so far.
    polls: u32,
    result: Result<(), TransactionError>,
}

impl Landed {
    fn succeeded() -> Self {
        Self {
            polls: 0,
            result: Ok(()),
        }
    }
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    live_blockhashes: HashSet<Hash>,
    latest_blockhash: Hash,
    landed: HashMap<Signature, Landed>,
    executed: Vec<Instruction>,
    calls: Vec<LedgerCall>,
    nonce: u64,
}

impl LedgerState {
    fn next_bytes<const N: usize>(&mut self) -> [u8; N] {
        self.nonce += 1;
        let mut bytes = [0u8; N];
        let nonce = self.nonce.to_le_bytes();
        bytes[..nonce.len()].copy_from_slice(&nonce);
        bytes[N - 1] = 0xb0;
        bytes
    }

    fn lamports(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |acc| acc.lamports)
    }
}

pub struct MockLedger {
    state: Mutex<LedgerState>,
    confirmation: Mutex<ConfirmationPolicy>,
    pub lamports_per_signature: u64,
    pub airdrops_enabled: bool,
    /// Land transactions whose instructions fail instead of rejecting them at send time.
    pub skip_preflight: bool,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        let ledger = Self {
            state: Mutex::new(LedgerState::default()),
            confirmation: Mutex::new(ConfirmationPolicy::Immediate),
            lamports_per_signature: DEFAULT_LAMPORTS_PER_SIGNATURE,
            airdrops_enabled: true,
            skip_preflight: false,
        };
        ledger.expire_blockhash();
        ledger
    }

    /// A ledger that refuses airdrops, like mainnet.
    pub fn without_airdrops() -> Self {
        Self {
            airdrops_enabled: false,
            ..Self::new()
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: LedgerCall) {
        self.state().calls.push(call);
    }

    /// Rotates to a fresh blockhash; every previously issued blockhash stops being accepted.
    pub fn expire_blockhash(&self) -> Hash {
        let mut state = self.state();
        let blockhash = Hash::new_from_array(state.next_bytes());
        state.live_blockhashes.clear();
        state.live_blockhashes.insert(blockhash);
        state.latest_blockhash = blockhash;
        blockhash
    }

    pub fn set_balance(&self, address: &Pubkey, lamports: u64) {
        self.state()
            .accounts
            .entry(*address)
            .or_insert_with(|| Account::new(0, 0, &SYSTEM_PROGRAM_ID))
            .lamports = lamports;
    }

    pub fn set_account(&self, address: &Pubkey, account: Account) {
        self.state().accounts.insert(*address, account);
    }

    pub fn set_confirmation_policy(&self, policy: ConfirmationPolicy) {
        *self
            .confirmation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = policy;
    }

    /// The blockhash `get_latest_blockhash` currently returns, without logging a call.
    pub fn latest_blockhash(&self) -> Hash {
        self.state().latest_blockhash
    }

    pub fn balance_of(&self, address: &Pubkey) -> u64 {
        self.state().lamports(address)
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.state().accounts.get(address).cloned()
    }

    /// Every remote request made so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Instructions of every landed transaction, in execution order.
    pub fn executed_instructions(&self) -> Vec<Instruction> {
        self.state().executed.clone()
    }

    /// The number of transactions (airdrops and failed executions included) that landed.
    pub fn landed_count(&self) -> usize {
        self.state().landed.len()
    }

    pub fn count_calls(&self, matches: impl Fn(&LedgerCall) -> bool) -> usize {
        self.state().calls.iter().filter(|call| matches(call)).count()
    }

    fn rent_exempt_minimum(data_len: usize) -> u64 {
        (ACCOUNT_STORAGE_OVERHEAD + data_len as u64)
            * LAMPORTS_PER_BYTE_YEAR
            * EXEMPTION_THRESHOLD_YEARS
    }

    fn process(&self, transaction: &VersionedTransaction) -> Result<Signature, TransactionError> {
        let mut state = self.state();
        let signature = transaction
            .signatures
            .first()
            .copied()
            .ok_or(TransactionError::MissingSignatureForFee)?;

        // A resubmitted transaction is recognized by its signature and isn't applied twice.
        if state.landed.contains_key(&signature) {
            return Ok(signature);
        }

        if !verify_signatures(transaction).is_empty() {
            return Err(TransactionError::SignatureFailure);
        }
        if !state
            .live_blockhashes
            .contains(transaction.message.recent_blockhash())
        {
            return Err(TransactionError::BlockhashNotFound);
        }

        let instructions = decompile(&transaction.message)?;
        let payer = *transaction
            .message
            .static_account_keys()
            .first()
            .ok_or(TransactionError::SanitizeFailure)?;
        let fee = self.lamports_per_signature * transaction.signatures.len() as u64;

        let mut charged = state.accounts.clone();
        debit(&mut charged, &payer, fee).ok_or(TransactionError::InsufficientFundsForFee)?;

        let mut accounts = charged.clone();
        let executed = instructions
            .iter()
            .enumerate()
            .filter(|(_, instruction)| instruction.program_id == SYSTEM_PROGRAM_ID)
            .try_for_each(|(idx, instruction)| {
                apply_system_instruction(&mut accounts, instruction)
                    .map_err(|error| TransactionError::InstructionError(idx as u8, error))
            });

        match executed {
            Ok(()) => {
                state.accounts = accounts;
                state.executed.extend(instructions);
                state.landed.insert(signature, Landed::succeeded());
            }
            Err(error) if self.skip_preflight => {
                state.accounts = charged;
                state.landed.insert(
                    signature,
                    Landed {
                        polls: 0,
                        result: Err(error),
                    },
                );
            }
            Err(error) => return Err(error),
        }
        Ok(signature)
    }
}

/// Rebuilds the instruction list from the compiled message's static keys.
fn decompile(message: &VersionedMessage) -> Result<Vec<Instruction>, TransactionError> {
    let keys = message.static_account_keys();
    let header = message.header();
    let num_signers = header.num_required_signatures as usize;
    let num_writable_signers = num_signers
        .checked_sub(header.num_readonly_signed_accounts as usize)
        .ok_or(TransactionError::SanitizeFailure)?;
    let num_writable_unsigned = keys
        .len()
        .checked_sub(num_signers)
        .and_then(|unsigned| unsigned.checked_sub(header.num_readonly_unsigned_accounts as usize))
        .ok_or(TransactionError::SanitizeFailure)?;

    let is_writable = |idx: usize| match idx < num_signers {
        true => idx < num_writable_signers,
        false => idx - num_signers < num_writable_unsigned,
    };

    message
        .instructions()
        .iter()
        .map(|compiled| {
            let program_id = *keys
                .get(compiled.program_id_index as usize)
                .ok_or(TransactionError::ProgramAccountNotFound)?;
            let accounts = compiled
                .accounts
                .iter()
                .map(|&idx| {
                    let idx = idx as usize;
                    keys.get(idx)
                        .map(|key| AccountMeta {
                            pubkey: *key,
                            is_signer: idx < num_signers,
                            is_writable: is_writable(idx),
                        })
                        .ok_or(TransactionError::AccountNotFound)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Instruction {
                program_id,
                accounts,
                data: compiled.data.clone(),
            })
        })
        .collect()
}

fn debit(accounts: &mut HashMap<Pubkey, Account>, address: &Pubkey, lamports: u64) -> Option<()> {
    let account = accounts.get_mut(address)?;
    account.lamports = account.lamports.checked_sub(lamports)?;
    Some(())
}

fn credit(accounts: &mut HashMap<Pubkey, Account>, address: &Pubkey, lamports: u64) {
    accounts
        .entry(*address)
        .or_insert_with(|| Account::new(0, 0, &SYSTEM_PROGRAM_ID))
        .lamports += lamports;
}

fn apply_system_instruction(
    accounts: &mut HashMap<Pubkey, Account>,
    instruction: &Instruction,
) -> Result<(), InstructionError> {
    let system_instruction: SystemInstruction = bincode::deserialize(&instruction.data)
        .map_err(|_| InstructionError::InvalidInstructionData)?;
    let key = |idx: usize| {
        instruction
            .accounts
            .get(idx)
            .map(|meta| meta.pubkey)
            .ok_or(InstructionError::NotEnoughAccountKeys)
    };

    match system_instruction {
        SystemInstruction::Transfer { lamports } => {
            let (from, to) = (key(0)?, key(1)?);
            debit(accounts, &from, lamports)
                .ok_or(InstructionError::Custom(SystemError::ResultWithNegativeLamports as u32))?;
            credit(accounts, &to, lamports);
        }
        SystemInstruction::CreateAccount {
            lamports,
            space,
            owner,
        } => {
            let (from, new_account) = (key(0)?, key(1)?);
            if accounts
                .get(&new_account)
                .is_some_and(|acc| acc.lamports > 0 || !acc.data.is_empty())
            {
                return Err(InstructionError::Custom(
                    SystemError::AccountAlreadyInUse as u32,
                ));
            }
            debit(accounts, &from, lamports)
                .ok_or(InstructionError::Custom(SystemError::ResultWithNegativeLamports as u32))?;
            accounts.insert(new_account, Account::new(lamports, space as usize, &owner));
        }
        _ => return Err(InstructionError::InvalidInstructionData),
    }

    Ok(())
}

#[async_trait]
impl LedgerConnection for MockLedger {
    async fn get_balance(&self, address: &Pubkey) -> BootcampResult<u64> {
        self.record(LedgerCall::GetBalance(*address));
        Ok(self.balance_of(address))
    }

    async fn get_latest_blockhash(&self) -> BootcampResult<Hash> {
        self.record(LedgerCall::GetLatestBlockhash);
        Ok(self.state().latest_blockhash)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> BootcampResult<u64> {
        self.record(LedgerCall::GetMinimumBalanceForRentExemption(data_len));
        Ok(Self::rent_exempt_minimum(data_len))
    }

    async fn get_account(&self, address: &Pubkey) -> BootcampResult<Option<Account>> {
        self.record(LedgerCall::GetAccount(*address));
        Ok(self.account(address))
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> BootcampResult<Signature> {
        self.record(LedgerCall::RequestAirdrop {
            address: *address,
            lamports,
        });
        if !self.airdrops_enabled {
            return Err(BootcampError::rejected("airdrops are disabled on this cluster"));
        }

        let mut state = self.state();
        let signature = Signature::from(state.next_bytes::<64>());
        credit(&mut state.accounts, address, lamports);
        state.landed.insert(signature, Landed::succeeded());
        Ok(signature)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> BootcampResult<Signature> {
        let signature = transaction.signatures.first().copied().unwrap_or_default();
        self.record(LedgerCall::SendTransaction(signature));

        self.process(transaction)
            .map_err(|error| BootcampError::Rejected {
                detail: format!("transaction simulation failed: {error}"),
                error: Some(error),
            })
    }

    async fn confirmation_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> BootcampResult<SignatureStatus> {
        self.record(LedgerCall::ConfirmationStatus(*signature));
        let policy = *self
            .confirmation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut state = self.state();
        let Some(landed) = state.landed.get_mut(signature) else {
            return Ok(None);
        };
        landed.polls += 1;
        let reached = match policy {
            ConfirmationPolicy::Immediate => true,
            ConfirmationPolicy::AfterPolls(n) => landed.polls >= n,
            ConfirmationPolicy::Never => false,
        };
        Ok(reached.then(|| landed.result.clone()))
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::{
        signature::Keypair,
        signer::Signer,
    };
    use solana_system_interface::instruction::transfer;

    use super::*;
    use crate::envelope::UnsignedEnvelope;

    fn signed_transfer(ledger: &MockLedger, from: &Keypair, to: &Pubkey) -> VersionedTransaction {
        let blockhash = ledger.latest_blockhash();
        let ix = transfer(&from.pubkey(), to, 1_000);
        UnsignedEnvelope::assemble(&from.pubkey(), &[ix], blockhash)
            .and_then(|envelope| envelope.sign(&[from as &dyn Signer]))
            .map(|signed| signed.transaction().clone())
            .expect("should sign")
    }

    #[tokio::test]
    async fn applies_transfers_and_fees() {
        let ledger = MockLedger::new();
        let from = Keypair::new();
        let to = Pubkey::new_unique();
        ledger.set_balance(&from.pubkey(), 1_000_000);

        let tx = signed_transfer(&ledger, &from, &to);
        ledger.send_transaction(&tx).await.expect("should land");

        assert_eq!(ledger.balance_of(&to), 1_000);
        assert_eq!(
            ledger.balance_of(&from.pubkey()),
            1_000_000 - 1_000 - DEFAULT_LAMPORTS_PER_SIGNATURE
        );
    }

    #[tokio::test]
    async fn rejects_overdrawn_transfers_without_side_effects() {
        let ledger = MockLedger::new();
        let from = Keypair::new();
        let to = Pubkey::new_unique();
        ledger.set_balance(&from.pubkey(), DEFAULT_LAMPORTS_PER_SIGNATURE + 10);

        let tx = signed_transfer(&ledger, &from, &to);
        let err = ledger.send_transaction(&tx).await.expect_err("should fail");

        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::InstructionError(
                0,
                InstructionError::Custom(SystemError::ResultWithNegativeLamports as u32)
            ))
        );
        assert_eq!(ledger.balance_of(&from.pubkey()), DEFAULT_LAMPORTS_PER_SIGNATURE + 10);
        assert_eq!(ledger.landed_count(), 0);
    }

    #[test]
    fn rent_matches_the_default_rent_sysvar() {
        assert_eq!(MockLedger::rent_exempt_minimum(0), 890_880);
        assert_eq!(MockLedger::rent_exempt_minimum(165), 2_039_280);
    }

    #[tokio::test]
    async fn unknown_signatures_never_confirm() {
        let ledger = MockLedger::new();
        let confirmed = ledger
            .confirmation_status(&Signature::default(), CommitmentConfig::confirmed())
            .await
            .expect("status");
        assert_eq!(confirmed, None);
    }

    #[tokio::test]
    async fn failed_execution_lands_when_preflight_is_skipped() {
        let mut ledger = MockLedger::new();
        ledger.skip_preflight = true;
        let from = Keypair::new();
        let to = Pubkey::new_unique();
        let starting = DEFAULT_LAMPORTS_PER_SIGNATURE + 10;
        ledger.set_balance(&from.pubkey(), starting);

        let tx = signed_transfer(&ledger, &from, &to);
        let signature = ledger.send_transaction(&tx).await.expect("should land");
        let status = ledger
            .confirmation_status(&signature, CommitmentConfig::confirmed())
            .await
            .expect("status");

        assert_eq!(
            status,
            Some(Err(TransactionError::InstructionError(
                0,
                InstructionError::Custom(SystemError::ResultWithNegativeLamports as u32)
            )))
        );
        assert_eq!(ledger.balance_of(&from.pubkey()), 10);
        assert_eq!(ledger.balance_of(&to), 0);
        assert!(ledger.executed_instructions().is_empty());
    }

    #[test]
    fn malformed_headers_fail_sanitization() {
        let blockhash = Hash::new_unique();
        let payer = Pubkey::new_unique();
        let mut message = solana_sdk::message::Message::new_with_blockhash(
            &[transfer(&payer, &Pubkey::new_unique(), 1)],
            Some(&payer),
            &blockhash,
        );
        message.header.num_readonly_signed_accounts = 5;

        let res = decompile(&VersionedMessage::Legacy(message.clone()));
        assert_eq!(res, Err(TransactionError::SanitizeFailure));

        message.header.num_readonly_signed_accounts = 0;
        message.header.num_readonly_unsigned_accounts = 10;
        let res = decompile(&VersionedMessage::Legacy(message));
        assert_eq!(res, Err(TransactionError::SanitizeFailure));
    }

    #[tokio::test]
    async fn transactions_without_account_keys_are_rejected() {
        let ledger = MockLedger::new();
        let message = solana_sdk::message::Message {
            recent_blockhash: ledger.latest_blockhash(),
            ..Default::default()
        };
        let tx = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(message),
        };

        assert_eq!(ledger.process(&tx), Err(TransactionError::SanitizeFailure));
        assert_eq!(ledger.landed_count(), 0);
    }
}
