//! Single-edition NFTs: a zero-decimal mint, one token in the owner's ATA, and Metaplex metadata.

use bootcamp_interface::instructions::metadata::{
    create_metadata_account_v3,
    CreateMetadataAccountArgsV3,
    CreateMetadataAccountV3Accounts,
    Creator,
    DataV2,
};
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

use crate::{
    context::token::TokenContext,
    error::BootcampResult,
    pda::find_metadata_address,
};

#[derive(Clone, Debug)]
pub struct NftMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Royalty in basis points, `1000` is 10%.
    pub seller_fee_basis_points: u16,
    pub is_mutable: bool,
}

pub struct NftContext {
    pub token: TokenContext,
    /// Mint authority, update authority and sole verified creator.
    pub authority: Pubkey,
}

impl NftContext {
    pub const fn new(mint_address: Pubkey, authority: Pubkey) -> Self {
        Self {
            token: TokenContext::spl(Some(authority), mint_address, 0),
            authority,
        }
    }

    pub fn metadata_address(&self) -> Pubkey {
        find_metadata_address(&self.token.mint_address).0
    }

    pub fn create_metadata(
        &self,
        payer: &Pubkey,
        metadata: &NftMetadata,
    ) -> BootcampResult<Instruction> {
        let args = CreateMetadataAccountArgsV3 {
            data: DataV2 {
                name: metadata.name.clone(),
                symbol: metadata.symbol.clone(),
                uri: metadata.uri.clone(),
                seller_fee_basis_points: metadata.seller_fee_basis_points,
                creators: Some(vec![Creator {
                    address: self.authority,
                    verified: true,
                    share: 100,
                }]),
                collection: None,
                uses: None,
            },
            is_mutable: metadata.is_mutable,
            collection_details: None,
        };

        Ok(create_metadata_account_v3(
            CreateMetadataAccountV3Accounts {
                metadata: self.metadata_address(),
                mint: self.token.mint_address,
                mint_authority: self.authority,
                payer: *payer,
                update_authority: self.authority,
            },
            &args,
        )?)
    }

    /// Every instruction needed to mint the NFT to `owner`, in execution order: create the mint,
    /// initialize it, create the owner's ATA, mint exactly one token, attach the metadata.
    pub fn mint_instructions(
        &self,
        payer: &Pubkey,
        owner: &Pubkey,
        mint_rent_lamports: u64,
        metadata: &NftMetadata,
    ) -> BootcampResult<Vec<Instruction>> {
        let [create_mint, initialize_mint] =
            self.token
                .create_mint(payer, mint_rent_lamports, Some(&self.authority))?;
        Ok(vec![
            create_mint,
            initialize_mint,
            self.token.create_ata(payer, owner),
            self.token.mint_to_owner(owner, 1)?,
            self.create_metadata(payer, metadata)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use bootcamp_interface::program_ids::TOKEN_METADATA_ID;

    use super::*;

    fn metadata() -> NftMetadata {
        NftMetadata {
            name: "Bootcamp NFT 2024".into(),
            symbol: "BCNFT".into(),
            uri: "https://example.com/nft-metadata.json".into(),
            seller_fee_basis_points: 1000,
            is_mutable: true,
        }
    }

    #[test]
    fn mint_instructions_end_with_metadata() {
        let payer = Pubkey::new_unique();
        let nft = NftContext::new(Pubkey::new_unique(), payer);
        let ixs = nft.mint_instructions(&payer, &payer, 1_461_600, &metadata()).unwrap();

        assert_eq!(ixs.len(), 5);
        let metadata_ix = ixs.last().unwrap();
        assert_eq!(metadata_ix.program_id, TOKEN_METADATA_ID);
        assert_eq!(metadata_ix.accounts[0].pubkey, nft.metadata_address());
        assert_eq!(metadata_ix.accounts[1].pubkey, nft.token.mint_address);
    }

    #[test]
    fn invalid_metadata_fails_before_signing() {
        let payer = Pubkey::new_unique();
        let nft = NftContext::new(Pubkey::new_unique(), payer);
        let mut bad = metadata();
        bad.name = "x".repeat(33);
        assert!(nft.create_metadata(&payer, &bad).is_err());
    }
}
