//! Metaplex Token Metadata `CreateMetadataAccountV3`.
//!
//! The layout follows the on-chain program: a one byte instruction tag followed by the borsh
//! encoding of [`CreateMetadataAccountArgsV3`].

use borsh::BorshSerialize;
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::InterfaceError,
    program_ids::{
        SYSTEM_PROGRAM_ID,
        TOKEN_METADATA_ID,
    },
};

pub const CREATE_METADATA_ACCOUNT_V3_TAG: u8 = 33;
pub const METADATA_SEED: &[u8] = b"metadata";

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_CREATOR_LIMIT: usize = 5;
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Percentage of royalties, all creators must sum to 100.
    pub share: u8,
}

impl BorshSerialize for Creator {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        writer.write_all(self.address.as_ref())?;
        self.verified.serialize(writer)?;
        self.share.serialize(writer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

impl BorshSerialize for Collection {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        self.verified.serialize(writer)?;
        writer.write_all(self.key.as_ref())
    }
}

#[derive(BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseMethod {
    Burn,
    Multiple,
    Single,
}

#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct Uses {
    pub use_method: UseMethod,
    pub remaining: u64,
    pub total: u64,
}

#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub enum CollectionDetails {
    V1 { size: u64 },
}

#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMetadataAccountArgsV3 {
    pub data: DataV2,
    pub is_mutable: bool,
    pub collection_details: Option<CollectionDetails>,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), InterfaceError> {
    if value.len() > max {
        return Err(InterfaceError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

impl DataV2 {
    /// Checks the limits the metadata program enforces so a bad argument fails before signing.
    pub fn validate(&self) -> Result<(), InterfaceError> {
        check_len("name", &self.name, MAX_NAME_LENGTH)?;
        check_len("symbol", &self.symbol, MAX_SYMBOL_LENGTH)?;
        check_len("uri", &self.uri, MAX_URI_LENGTH)?;

        if self.seller_fee_basis_points > MAX_SELLER_FEE_BASIS_POINTS {
            return Err(InterfaceError::InvalidSellerFee(
                self.seller_fee_basis_points,
            ));
        }

        if let Some(creators) = &self.creators {
            if creators.len() > MAX_CREATOR_LIMIT {
                return Err(InterfaceError::TooManyCreators(creators.len()));
            }
            let total: u32 = creators.iter().map(|c| c.share as u32).sum();
            if !creators.is_empty() && total != 100 {
                return Err(InterfaceError::InvalidCreatorShares(total));
            }
        }

        Ok(())
    }
}

pub struct CreateMetadataAccountV3Accounts {
    pub metadata: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub payer: Pubkey,
    pub update_authority: Pubkey,
}

/// Builds `CreateMetadataAccountV3`. The update authority is marked as a signer, which is what
/// allows a creator matching it to be `verified` at creation time.
pub fn create_metadata_account_v3(
    accounts: CreateMetadataAccountV3Accounts,
    args: &CreateMetadataAccountArgsV3,
) -> Result<Instruction, InterfaceError> {
    args.data.validate()?;

    let mut data = vec![CREATE_METADATA_ACCOUNT_V3_TAG];
    args.serialize(&mut data)
        .expect("Serializing into a Vec is infallible");

    Ok(Instruction::new_with_bytes(
        TOKEN_METADATA_ID,
        &data,
        vec![
            AccountMeta::new(accounts.metadata, false),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new_readonly(accounts.mint_authority, true),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.update_authority, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(creator: Pubkey) -> DataV2 {
        DataV2 {
            name: "Bootcamp NFT".into(),
            symbol: "BCNFT".into(),
            uri: "https://example.com/nft.json".into(),
            seller_fee_basis_points: 1000,
            creators: Some(vec![Creator {
                address: creator,
                verified: true,
                share: 100,
            }]),
            collection: None,
            uses: None,
        }
    }

    #[test]
    fn encodes_tag_then_borsh_args() {
        let payer = Pubkey::new_unique();
        let args = CreateMetadataAccountArgsV3 {
            data: data(payer),
            is_mutable: true,
            collection_details: None,
        };
        let ix = create_metadata_account_v3(
            CreateMetadataAccountV3Accounts {
                metadata: Pubkey::new_unique(),
                mint: Pubkey::new_unique(),
                mint_authority: payer,
                payer,
                update_authority: payer,
            },
            &args,
        )
        .unwrap();

        assert_eq!(ix.program_id, TOKEN_METADATA_ID);
        assert_eq!(ix.data[0], CREATE_METADATA_ACCOUNT_V3_TAG);
        // name: u32 length prefix + bytes.
        assert_eq!(&ix.data[1..5], &12u32.to_le_bytes());
        assert_eq!(&ix.data[5..17], b"Bootcamp NFT");

        // ... creators(Some, len 1, address, verified, share), collection, uses, is_mutable,
        // collection_details.
        assert_eq!(&ix.data[ix.data.len() - 5..], &[100, 0, 0, 1, 0]);

        assert_eq!(ix.accounts.len(), 6);
        assert!(ix.accounts[0].is_writable);
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
        assert!(ix.accounts[4].is_signer);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let creator = Pubkey::new_unique();

        let mut long_symbol = data(creator);
        long_symbol.symbol = "TOO_LONG_SYMBOL".into();
        assert_eq!(
            long_symbol.validate(),
            Err(InterfaceError::FieldTooLong {
                field: "symbol",
                len: 15,
                max: MAX_SYMBOL_LENGTH,
            })
        );

        let mut fee = data(creator);
        fee.seller_fee_basis_points = 10_001;
        assert_eq!(fee.validate(), Err(InterfaceError::InvalidSellerFee(10_001)));

        let mut shares = data(creator);
        shares.creators.as_mut().unwrap()[0].share = 50;
        assert_eq!(
            shares.validate(),
            Err(InterfaceError::InvalidCreatorShares(50))
        );
    }
}
