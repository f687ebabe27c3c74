//! Failure taxonomy for the transaction workflow.
//!
//! Three classes: transport failures reaching the cluster, rejections reported by the cluster, and
//! local precondition failures caught before anything is sent.

use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    },
    rpc_response::RpcSimulateTransactionResult,
};
use solana_sdk::{
    message::CompileError,
    program_error::ProgramError,
    pubkey::Pubkey,
    signature::Signature,
    signer::SignerError,
};
use solana_transaction_error::TransactionError;
use thiserror::Error;

pub type BootcampResult<T> = Result<T, BootcampError>;

#[derive(Debug, Error)]
pub enum BootcampError {
    /// The cluster couldn't be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The cluster refused the request. `error` carries the structured transaction error when
    /// the cluster reported one, e.g. a failing instruction's index and program error.
    #[error("rejected by the cluster: {detail}")]
    Rejected {
        detail: String,
        error: Option<TransactionError>,
    },

    #[error("a transaction needs at least one instruction")]
    EmptyInstructions,

    #[error("failed to compile the transaction message: {0}")]
    Compile(#[from] CompileError),

    #[error("missing signatures for required signers: {}", display_keys(.0))]
    MissingSignatures(Vec<Pubkey>),

    #[error("{0} signed but isn't a required signer")]
    UnexpectedSigner(Pubkey),

    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error("account {0} isn't initialized")]
    UninitializedAccount(Pubkey),

    #[error("invalid account data for {address}: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },

    #[error("transaction {0} wasn't confirmed")]
    Unconfirmed(Signature),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("couldn't load keypair: {0}")]
    Keypair(String),

    #[error("failed to build instruction: {0}")]
    Instruction(#[from] ProgramError),

    #[error(transparent)]
    Interface(#[from] bootcamp_interface::error::InterfaceError),
}

fn display_keys(keys: &[Pubkey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BootcampError {
    pub fn rejected(detail: impl ToString) -> Self {
        Self::Rejected {
            detail: detail.to_string(),
            error: None,
        }
    }

    /// The structured transaction error, if the cluster rejected a transaction with one.
    pub fn transaction_error(&self) -> Option<&TransactionError> {
        match self {
            Self::Rejected { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

/// Pulls the [`TransactionError`] out of a preflight failure or a processed transaction failure.
fn extract_transaction_error(error: &ClientError) -> Option<TransactionError> {
    match error.kind() {
        ClientErrorKind::RpcError(RpcResponseError {
            data:
                RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                    err: Some(ui_err),
                    ..
                }),
            ..
        }) => Some(ui_err.clone().into()),
        ClientErrorKind::TransactionError(error) => Some(error.clone()),
        _ => None,
    }
}

impl From<ClientError> for BootcampError {
    fn from(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
                Self::Transport(error.to_string())
            }
            _ => Self::Rejected {
                error: extract_transaction_error(&error),
                detail: error.to_string(),
            },
        }
    }
}
