//! Helpers for pretty-printing envelopes, instruction errors and explorer links in a readable,
//! colorized format.

pub mod explorer;
pub mod instruction_error;
pub mod transaction;
