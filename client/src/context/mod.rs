//! Contexts that know the addresses involved in one program interaction and build its
//! instructions.

pub mod nft;
pub mod pool;
pub mod stake;
pub mod token;
