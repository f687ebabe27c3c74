use std::fmt::{
    self,
    Debug,
    Display,
    Formatter,
};

use bootcamp_interface::{
    anchor::{
        instruction_discriminator,
        DISCRIMINATOR_LEN,
    },
    instructions::{
        amm::WITHDRAW_LIQUIDITY,
        metadata::CREATE_METADATA_ACCOUNT_V3_TAG,
        stake::{
            INITIALIZE,
            STAKE,
            UNSTAKE,
        },
    },
    program_ids::{
        COMPUTE_BUDGET_ID,
        SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
        SPL_TOKEN_ID,
        STAKE_PROGRAM_ID,
        SYSTEM_PROGRAM_ID,
        TOKEN_METADATA_ID,
    },
};
use colored::{
    Color,
    Colorize,
};
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::instruction::SystemInstruction;
use spl_associated_token_account_interface::instruction::AssociatedTokenAccountInstruction;
use spl_token_interface::instruction::TokenInstruction;

use crate::logs::LogColor;

/// Anchor handlers the scripts call, matched by discriminator when the program id isn't known.
const ANCHOR_HANDLERS: [&str; 4] = [WITHDRAW_LIQUIDITY, INITIALIZE, STAKE, UNSTAKE];

const UNKNOWN_INSTRUCTION: &str = "UnknownInstruction";

pub struct PrettyEnvelope<'a> {
    /// The amount of spaces preceding each line in the output.
    pub indent_size: usize,
    pub instructions: &'a [Instruction],
}

pub struct PrettyInstruction<'a> {
    pub instruction: &'a Instruction,
}

impl Display for PrettyInstruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let instruction = self.instruction;
        let known_program = KnownProgram::from_program_id(&instruction.program_id);

        let name_highlight_color: Color = match known_program {
            Some(_) => LogColor::Debug.into(),
            None => LogColor::Warning.into(),
        };

        let program_name = known_program
            .as_ref()
            .map_or_else(|| instruction.program_id.to_string(), ToString::to_string);
        let instruction_name = match known_program {
            Some(known) => known.instruction_name(&instruction.data),
            None => anchor_instruction_name(&instruction.data),
        };

        let signers = instruction
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .count();
        let details = format!(
            " {} accounts, {} signers, {} bytes",
            instruction.accounts.len(),
            signers,
            instruction.data.len()
        )
        .color(LogColor::FadedGray);

        write!(
            f,
            "{}::{instruction_name}{details}",
            program_name.color(name_highlight_color)
        )
    }
}

impl Display for PrettyEnvelope<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let indentation = " ".repeat(self.indent_size);
        for (i, instruction) in self.instructions.iter().enumerate() {
            let idx = format_instruction_index(i + 1);
            writeln!(f, "{idx}{indentation}{}", PrettyInstruction { instruction })?;
        }
        Ok(())
    }
}

#[derive(strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum KnownProgram {
    SystemProgram,
    SplToken,
    AssociatedTokenAccount,
    ComputeBudget,
    TokenMetadata,
    Stake,
}

impl KnownProgram {
    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        match *program_id {
            id if id == SYSTEM_PROGRAM_ID => Some(Self::SystemProgram),
            id if id == SPL_TOKEN_ID => Some(Self::SplToken),
            id if id == SPL_ASSOCIATED_TOKEN_ACCOUNT_ID => Some(Self::AssociatedTokenAccount),
            id if id == COMPUTE_BUDGET_ID => Some(Self::ComputeBudget),
            id if id == TOKEN_METADATA_ID => Some(Self::TokenMetadata),
            id if id == STAKE_PROGRAM_ID => Some(Self::Stake),
            _ => None,
        }
    }

    pub fn instruction_name(&self, instruction_data: &[u8]) -> String {
        match self {
            Self::SystemProgram => bincode::deserialize::<SystemInstruction>(instruction_data)
                .map(|ix| enum_name(&ix))
                .unwrap_or_else(|_| UNKNOWN_INSTRUCTION.into()),
            Self::SplToken => TokenInstruction::unpack(instruction_data)
                .map(|ix| enum_name(&ix))
                .unwrap_or_else(|_| UNKNOWN_INSTRUCTION.into()),
            // Empty data is the legacy, non-idempotent `Create`.
            Self::AssociatedTokenAccount if instruction_data.is_empty() => "Create".into(),
            Self::AssociatedTokenAccount => {
                borsh::from_slice::<AssociatedTokenAccountInstruction>(instruction_data)
                    .map(|ix| enum_name(&ix))
                    .unwrap_or_else(|_| UNKNOWN_INSTRUCTION.into())
            }
            Self::ComputeBudget => match instruction_data.first() {
                Some(1) => "RequestHeapFrame",
                Some(2) => "SetComputeUnitLimit",
                Some(3) => "SetComputeUnitPrice",
                Some(4) => "SetLoadedAccountsDataSizeLimit",
                _ => UNKNOWN_INSTRUCTION,
            }
            .into(),
            Self::TokenMetadata => match instruction_data.first() {
                Some(&CREATE_METADATA_ACCOUNT_V3_TAG) => "CreateMetadataAccountV3",
                _ => UNKNOWN_INSTRUCTION,
            }
            .into(),
            Self::Stake => anchor_instruction_name(instruction_data),
        }
    }
}

fn anchor_instruction_name(instruction_data: &[u8]) -> String {
    instruction_data
        .get(..DISCRIMINATOR_LEN)
        .and_then(|discriminator| {
            ANCHOR_HANDLERS
                .iter()
                .find(|name| instruction_discriminator(name) == discriminator)
        })
        .map_or_else(|| UNKNOWN_INSTRUCTION.into(), |name| name.to_string())
}

// This should only be used with enums. It assumes that `Debug` will print the value like `Ident {`.
fn enum_name<T: Debug>(value: &T) -> String {
    let s = format!("{:?}", value);
    s.split_once([' ', '{', '('])
        .map(|(n, _)| n)
        .unwrap_or(&s)
        .into()
}

fn format_instruction_index(idx: usize) -> String {
    format!("{idx:>2}").color(LogColor::FadedGray).to_string()
}
