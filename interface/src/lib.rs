//! Program ids, seeds, instruction encodings and account layouts for the on-chain programs the
//! bootcamp scripts call into.
//!
//! Nothing in this crate talks to the network. Every builder returns a plain
//! [`solana_instruction::Instruction`] whose account order matches the target program's
//! externally-defined schema.

pub mod anchor;
pub mod error;
pub mod instructions;
pub mod program_ids;
pub mod state;
