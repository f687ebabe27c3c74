//! Instruction builders for the external programs called by the bootcamp scripts.

pub mod amm;
pub mod metadata;
pub mod stake;

use crate::error::InterfaceError;

pub(crate) fn require_nonzero(amount: u64) -> Result<(), InterfaceError> {
    match amount {
        0 => Err(InterfaceError::ZeroAmount),
        _ => Ok(()),
    }
}
