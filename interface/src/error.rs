use strum_macros::{
    Display,
    FromRepr,
};
use thiserror::Error;

/// Anchor offsets user-defined error codes by 6000.
pub const ANCHOR_CUSTOM_ERROR_OFFSET: u32 = 6000;

/// Custom errors returned by the sample staking program.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, FromRepr)]
#[repr(u32)]
pub enum StakeError {
    IsStaked = 6000,
    NotStaked,
    NoToken,
    InvalidStaker,
    InvalidMint,
}

impl StakeError {
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            StakeError::IsStaked => "Tokens are already staked",
            StakeError::NotStaked => "Tokens are not staked",
            StakeError::NoToken => "No tokens to stake",
            StakeError::InvalidStaker => "Invalid staker",
            StakeError::InvalidMint => "Invalid mint",
        }
    }
}

/// Argument validation failures caught before an instruction is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("{field} is {len} bytes long, the maximum is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("seller fee of {0} basis points exceeds 10000")]
    InvalidSellerFee(u16),
    #[error("{0} creators exceed the limit of 5")]
    TooManyCreators(usize),
    #[error("creator shares sum to {0}, expected 100")]
    InvalidCreatorShares(u32),
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("account data is too short: {len} bytes, expected {expected}")]
    AccountDataTooShort { len: usize, expected: usize },
    #[error("account discriminator doesn't match {0}")]
    InvalidAccountDiscriminator(&'static str),
    #[error("malformed {account} account data: {reason}")]
    MalformedAccountData {
        account: &'static str,
        reason: String,
    },
}
