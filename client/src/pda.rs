//! PDA helpers for the programs the scripts call.

use bootcamp_interface::{
    instructions::{
        amm::{
            AUTHORITY_SEED,
            MINT_LIQUIDITY_SEED,
        },
        metadata::METADATA_SEED,
        stake::{
            REWARD_VAULT_SEED,
            STAKE_INFO_SEED,
        },
    },
    program_ids::TOKEN_METADATA_ID,
};
use solana_sdk::pubkey::Pubkey;

/// The Metaplex metadata account for `mint`.
pub fn find_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_ID,
    )
}

pub fn find_pool_address(
    amm_program: &Pubkey,
    amm: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[amm.as_ref(), mint_a.as_ref(), mint_b.as_ref()],
        amm_program,
    )
}

pub fn find_pool_authority_address(
    amm_program: &Pubkey,
    amm: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            amm.as_ref(),
            mint_a.as_ref(),
            mint_b.as_ref(),
            AUTHORITY_SEED,
        ],
        amm_program,
    )
}

pub fn find_liquidity_mint_address(
    amm_program: &Pubkey,
    amm: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            amm.as_ref(),
            mint_a.as_ref(),
            mint_b.as_ref(),
            MINT_LIQUIDITY_SEED,
        ],
        amm_program,
    )
}

pub fn find_reward_vault_address(stake_program: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_VAULT_SEED, mint.as_ref()], stake_program)
}

pub fn find_stake_info_address(
    stake_program: &Pubkey,
    staker: &Pubkey,
    mint: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[STAKE_INFO_SEED, staker.as_ref(), mint.as_ref()],
        stake_program,
    )
}
