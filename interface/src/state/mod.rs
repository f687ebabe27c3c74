mod stake_info;

pub use stake_info::*;
