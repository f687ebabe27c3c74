//! Program ids for every program the bootcamp scripts build instructions for.

use solana_sdk::pubkey::Pubkey;

/// The System program.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::from_str_const("11111111111111111111111111111111");
/// The SPL Token program.
pub const SPL_TOKEN_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
/// The SPL Associated Token Account program.
pub const SPL_ASSOCIATED_TOKEN_ACCOUNT_ID: Pubkey =
    Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
/// The Compute Budget program.
pub const COMPUTE_BUDGET_ID: Pubkey =
    Pubkey::from_str_const("ComputeBudget111111111111111111111111111111");
/// The Metaplex Token Metadata program.
pub const TOKEN_METADATA_ID: Pubkey =
    Pubkey::from_str_const("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
/// The bootcamp's sample staking program as deployed for the course.
pub const STAKE_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("5ZH5NAc5AeWpYW5MgxDgsHSPjzBYmN6qbn1dSwTYBj6X");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_their_base58_strings() {
        assert_eq!(SYSTEM_PROGRAM_ID, Pubkey::default());
        assert_eq!(
            SPL_TOKEN_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            TOKEN_METADATA_ID.to_string(),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
    }
}
