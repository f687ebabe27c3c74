//! Token-level context containing mint metadata and helpers for deriving associated token accounts
//! and building token instructions.

use bootcamp_interface::program_ids::SPL_TOKEN_ID;
use solana_instruction::Instruction;
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
};
use solana_system_interface::instruction::create_account;
use spl_associated_token_account_interface::{
    address::get_associated_token_address_with_program_id,
    instruction::{
        create_associated_token_account,
        create_associated_token_account_idempotent,
    },
};
use spl_token_interface::{
    instruction::{
        initialize_mint2,
        mint_to_checked,
    },
    state::{
        Account as TokenAccount,
        Mint,
    },
};

use crate::error::{
    BootcampError,
    BootcampResult,
};

pub const MINT_SIZE: usize = Mint::LEN;

pub struct TokenContext {
    pub mint_authority: Option<Pubkey>,
    pub mint_address: Pubkey,
    pub token_program: Pubkey,
    pub mint_decimals: u8,
}

impl TokenContext {
    pub const fn new(
        mint_authority: Option<Pubkey>,
        mint_address: Pubkey,
        token_program: Pubkey,
        mint_decimals: u8,
    ) -> Self {
        Self {
            mint_authority,
            mint_address,
            token_program,
            mint_decimals,
        }
    }

    /// A context for a mint owned by the SPL Token program.
    pub const fn spl(
        mint_authority: Option<Pubkey>,
        mint_address: Pubkey,
        mint_decimals: u8,
    ) -> Self {
        Self::new(mint_authority, mint_address, SPL_TOKEN_ID, mint_decimals)
    }

    /// Creates a [`TokenContext`] from an on-chain mint account's owner and data.
    pub fn from_account_data(
        mint_address: Pubkey,
        owner: Pubkey,
        data: &[u8],
    ) -> BootcampResult<Self> {
        if owner != SPL_TOKEN_ID {
            return Err(BootcampError::InvalidAccountData {
                address: mint_address,
                reason: format!("owned by {owner}, not the token program"),
            });
        }
        let mint = Mint::unpack(data).map_err(|e| BootcampError::InvalidAccountData {
            address: mint_address,
            reason: e.to_string(),
        })?;
        Ok(Self::new(
            mint.mint_authority.into(),
            mint_address,
            owner,
            mint.decimals,
        ))
    }

    /// Converts a UI amount like `100` whole tokens into base units.
    pub fn to_base_units(&self, ui_amount: u64) -> u64 {
        ui_amount * 10u64.pow(self.mint_decimals as u32)
    }

    pub fn get_ata_for(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, &self.mint_address, &self.token_program)
    }

    /// Builds the System `create_account` and `initialize_mint2` pair that brings the mint into
    /// existence. The mint account must sign the transaction.
    ///
    /// `rent_lamports` should be the rent-exempt minimum for [`MINT_SIZE`] bytes.
    pub fn create_mint(
        &self,
        payer: &Pubkey,
        rent_lamports: u64,
        freeze_authority: Option<&Pubkey>,
    ) -> BootcampResult<[Instruction; 2]> {
        let mint_authority = self.require_mint_authority()?;
        Ok([
            create_account(
                payer,
                &self.mint_address,
                rent_lamports,
                MINT_SIZE as u64,
                &self.token_program,
            ),
            initialize_mint2(
                &self.token_program,
                &self.mint_address,
                mint_authority,
                freeze_authority,
                self.mint_decimals,
            )?,
        ])
    }

    /// Builds a create-ATA instruction for the given `owner`, funded by `funder`.
    pub fn create_ata(&self, funder: &Pubkey, owner: &Pubkey) -> Instruction {
        create_associated_token_account(funder, owner, &self.mint_address, &self.token_program)
    }

    /// Builds an idempotent create-ATA instruction for the given `owner`, funded by `funder`.
    pub fn create_ata_idempotent(&self, funder: &Pubkey, owner: &Pubkey) -> Instruction {
        create_associated_token_account_idempotent(
            funder,
            owner,
            &self.mint_address,
            &self.token_program,
        )
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to the `owner`'s
    /// associated token account.
    ///
    /// To mint directly to an associated token account, use [TokenContext::mint_to_ata]
    pub fn mint_to_owner(&self, owner: &Pubkey, amount: u64) -> BootcampResult<Instruction> {
        self.mint_to_ata(&self.get_ata_for(owner), amount)
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to `destination_ata`.
    pub fn mint_to_ata(
        &self,
        destination_ata: &Pubkey,
        amount: u64,
    ) -> BootcampResult<Instruction> {
        let mint_authority = self.require_mint_authority()?;
        Ok(mint_to_checked(
            &self.token_program,
            &self.mint_address,
            destination_ata,
            mint_authority,
            &[],
            amount,
            self.mint_decimals,
        )?)
    }

    fn require_mint_authority(&self) -> BootcampResult<&Pubkey> {
        self.mint_authority
            .as_ref()
            .ok_or_else(|| BootcampError::InvalidAccountData {
                address: self.mint_address,
                reason: "token doesn't have a mint authority".into(),
            })
    }
}

/// Reads the token amount out of a token account's data.
pub fn token_account_amount(address: &Pubkey, data: &[u8]) -> BootcampResult<u64> {
    TokenAccount::unpack(data)
        .map(|account| account.amount)
        .map_err(|e| BootcampError::InvalidAccountData {
            address: *address,
            reason: e.to_string(),
        })
}
