//! Client-side building blocks for the bootcamp scripts.
//!
//! The core is the transaction builder/submitter in [`envelope`] and [`transactions`]: assemble an
//! ordered instruction list into a v0 message, sign it with every required signer, submit it once
//! and optionally wait for confirmation. Everything remote goes through the
//! [`connection::LedgerConnection`] seam so the workflow can run against a live cluster or the
//! in-memory [`test_helpers::mock_ledger::MockLedger`].

pub mod config;
pub mod connection;
pub mod context;
pub mod envelope;
pub mod error;
pub mod funding;
pub mod logs;
pub mod pda;
pub mod pretty;
pub mod test_helpers;
pub mod transactions;

pub use error::{
    BootcampError,
    BootcampResult,
};
pub use logs::LogColor;

/// 1 SOL in lamports.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts lamports to SOL for display.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
