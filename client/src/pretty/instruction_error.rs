//! Interprets on-chain instruction failures into readable stake program / Solana error messages.

use std::fmt::Display;

use bootcamp_interface::{
    error::StakeError,
    program_ids::STAKE_PROGRAM_ID,
};
use solana_instruction::Instruction;
use solana_instruction_error::InstructionError as SolanaInstructionError;
use solana_transaction_error::TransactionError;

use crate::{
    fmt_kv,
    pretty::transaction::KnownProgram,
    LogColor,
};

enum InstructionError {
    Solana {
        instruction_index: u8,
        instruction_name: String,
        error: SolanaInstructionError,
    },
    Stake {
        instruction_index: u8,
        instruction_name: String,
        error: StakeError,
    },
}

pub struct PrettyInstructionError(InstructionError);

impl PrettyInstructionError {
    /// Returns `None` unless the failure is attributable to a single instruction in `instructions`.
    pub fn new(error: &TransactionError, instructions: &[Instruction]) -> Option<Self> {
        let TransactionError::InstructionError(instruction_index, instruction_error) = error else {
            return None;
        };
        let instruction = instructions.get(*instruction_index as usize)?;
        let instruction_name = KnownProgram::from_program_id(&instruction.program_id)
            .map(|known| format!("{known}::{}", known.instruction_name(&instruction.data)))
            .unwrap_or_else(|| instruction.program_id.to_string());

        let stake_error = match instruction_error {
            SolanaInstructionError::Custom(code) if instruction.program_id == STAKE_PROGRAM_ID => {
                StakeError::from_code(*code)
            }
            _ => None,
        };

        let res = match stake_error {
            Some(error) => InstructionError::Stake {
                instruction_index: *instruction_index,
                instruction_name,
                error,
            },
            None => InstructionError::Solana {
                instruction_index: *instruction_index,
                instruction_name,
                error: instruction_error.clone(),
            },
        };

        Some(Self(res))
    }
}

impl Display for PrettyInstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (error_type, index, instruction, error) = match &self.0 {
            InstructionError::Solana {
                instruction_index,
                instruction_name,
                error,
            } => (
                "SolanaInstructionError",
                instruction_index,
                instruction_name,
                error.to_string(),
            ),
            InstructionError::Stake {
                instruction_index,
                instruction_name,
                error,
            } => (
                "StakeError",
                instruction_index,
                instruction_name,
                format!("{error} ({})", error.message()),
            ),
        };

        let message = format!("#{index} {instruction}, {error}");
        let error_message = fmt_kv!(error_type, message, LogColor::Error);
        writeln!(f, "{error_message}")
    }
}

#[cfg(test)]
mod tests {
    use bootcamp_interface::{
        anchor::instruction_discriminator,
        instructions::stake::UNSTAKE,
    };
    use solana_sdk::pubkey::Pubkey;
    use solana_system_interface::instruction::transfer;

    use super::*;

    #[test]
    fn decodes_stake_program_custom_errors() {
        colored::control::set_override(false);
        let unstake = Instruction::new_with_bytes(
            STAKE_PROGRAM_ID,
            &instruction_discriminator(UNSTAKE),
            vec![],
        );
        let error = TransactionError::InstructionError(0, SolanaInstructionError::Custom(6001));
        let pretty = PrettyInstructionError::new(&error, &[unstake]).expect("instruction error");
        let out = pretty.to_string();
        assert!(out.starts_with("StakeError: #0 stake::unstake"), "{out}");
        assert!(out.contains(StakeError::NotStaked.message()), "{out}");
    }

    #[test]
    fn falls_back_to_solana_errors() {
        colored::control::set_override(false);
        let ix = transfer(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        let error =
            TransactionError::InstructionError(0, SolanaInstructionError::InsufficientFunds);
        let out = PrettyInstructionError::new(&error, &[ix])
            .expect("instruction error")
            .to_string();
        assert!(out.starts_with("SolanaInstructionError: #0 system_program::Transfer"), "{out}");
    }

    #[test]
    fn ignores_errors_not_tied_to_an_instruction() {
        assert!(PrettyInstructionError::new(&TransactionError::BlockhashNotFound, &[]).is_none());
        let error = TransactionError::InstructionError(3, SolanaInstructionError::InvalidSeeds);
        assert!(PrettyInstructionError::new(&error, &[]).is_none());
    }
}
