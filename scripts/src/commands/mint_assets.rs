//! Fungible token and NFT minting in one transaction, signed by the payer and both new mints.

use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    context::{
        nft::{
            NftContext,
            NftMetadata,
        },
        token::{
            TokenContext,
            MINT_SIZE,
        },
    },
    logs::{
        log_info,
        log_success,
    },
    pretty::explorer::{
        explorer_url,
        ExplorerTarget,
    },
    print_kv,
    transactions::BootcampClient,
    BootcampResult,
};
use solana_instruction::Instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

pub const FUNGIBLE_DECIMALS: u8 = 6;
pub const PAYER_FUNGIBLE_AMOUNT: u64 = 100;
pub const RECEIVER_FUNGIBLE_AMOUNT: u64 = 10;

#[derive(clap::Args, Debug)]
pub struct MintAssetsArgs {
    /// Receives a share of the fungible token.
    #[arg(long)]
    pub receiver: Pubkey,

    #[arg(long, default_value = "Bootcamp NFT 2024")]
    pub name: String,

    #[arg(long, default_value = "BCNFT")]
    pub symbol: String,

    #[arg(
        long,
        default_value = "https://raw.githubusercontent.com/trankhacvy/solana-bootcamp-autumn-2024/main/assets/nft-metadata.json"
    )]
    pub uri: String,

    /// NFT royalty, `1000` is 10%.
    #[arg(long, default_value_t = 1000)]
    pub seller_fee_basis_points: u16,
}

impl MintAssetsArgs {
    fn metadata(&self) -> NftMetadata {
        NftMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone(),
            seller_fee_basis_points: self.seller_fee_basis_points,
            is_mutable: true,
        }
    }
}

/// Every instruction of the mint script in execution order: the fungible mint and its two token
/// accounts and mints, then the NFT mint, its token account, its single token and its metadata.
pub fn mint_assets_instructions(
    payer: &Pubkey,
    receiver: &Pubkey,
    fungible_mint: &Pubkey,
    nft_mint: &Pubkey,
    mint_rent_lamports: u64,
    metadata: &NftMetadata,
) -> BootcampResult<Vec<Instruction>> {
    let fungible = TokenContext::spl(Some(*payer), *fungible_mint, FUNGIBLE_DECIMALS);
    let nft = NftContext::new(*nft_mint, *payer);

    let [create_fungible_mint, initialize_fungible_mint] =
        fungible.create_mint(payer, mint_rent_lamports, Some(payer))?;

    let mut instructions = vec![
        create_fungible_mint,
        initialize_fungible_mint,
        fungible.create_ata(payer, payer),
        fungible.create_ata(payer, receiver),
        fungible.mint_to_owner(payer, fungible.to_base_units(PAYER_FUNGIBLE_AMOUNT))?,
        fungible.mint_to_owner(receiver, fungible.to_base_units(RECEIVER_FUNGIBLE_AMOUNT))?,
    ];
    instructions.extend(nft.mint_instructions(payer, payer, mint_rent_lamports, metadata)?);

    Ok(instructions)
}

pub async fn mint_assets<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    args: &MintAssetsArgs,
) -> anyhow::Result<(Pubkey, Pubkey)> {
    let fungible_mint = Keypair::new();
    let nft_mint = Keypair::new();
    print_kv!("Fungible mint", fungible_mint.pubkey());
    print_kv!("NFT mint", nft_mint.pubkey());

    let mint_rent = client
        .rent_exempt_lamports(MINT_SIZE)
        .await
        .context("fetching the mint rent")?;
    let instructions = mint_assets_instructions(
        &payer.pubkey(),
        &args.receiver,
        &fungible_mint.pubkey(),
        &nft_mint.pubkey(),
        mint_rent,
        &args.metadata(),
    )?;

    let signature = client
        .send_transaction(payer, &[&fungible_mint, &nft_mint], &instructions)
        .await
        .context("minting the fungible token and the NFT")?;

    log_success("Minted", signature);
    log_info(
        "NFT",
        explorer_url(
            ExplorerTarget::Address(&nft_mint.pubkey()),
            &client.config,
        ),
    );
    Ok((fungible_mint.pubkey(), nft_mint.pubkey()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bootcamp_client::{
        config::ClientConfig,
        envelope::UnsignedEnvelope,
        test_helpers::{
            mock_ledger::MockLedger,
            test_accounts::{
                fungible_mint,
                nft_mint,
                payer,
                receiver,
            },
        },
        LAMPORTS_PER_SOL,
    };
    use bootcamp_interface::program_ids::{
        SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
        SPL_TOKEN_ID,
        SYSTEM_PROGRAM_ID,
        TOKEN_METADATA_ID,
    };
    use solana_sdk::hash::Hash;

    use super::*;

    fn args() -> MintAssetsArgs {
        MintAssetsArgs {
            receiver: receiver().pubkey(),
            name: "Bootcamp NFT 2024".into(),
            symbol: "BCNFT".into(),
            uri: "https://example.com/nft.json".into(),
            seller_fee_basis_points: 1000,
        }
    }

    fn instructions() -> Vec<Instruction> {
        mint_assets_instructions(
            &payer().pubkey(),
            &receiver().pubkey(),
            &fungible_mint().pubkey(),
            &nft_mint().pubkey(),
            1_461_600,
            &args().metadata(),
        )
        .expect("valid instructions")
    }

    #[test]
    fn instruction_order_matches_the_script() {
        let program_ids: Vec<_> = instructions().iter().map(|ix| ix.program_id).collect();
        assert_eq!(
            program_ids,
            vec![
                SYSTEM_PROGRAM_ID,
                SPL_TOKEN_ID,
                SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
                SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
                SPL_TOKEN_ID,
                SPL_TOKEN_ID,
                SYSTEM_PROGRAM_ID,
                SPL_TOKEN_ID,
                SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
                SPL_TOKEN_ID,
                TOKEN_METADATA_ID,
            ]
        );
    }

    #[test]
    fn both_mints_must_co_sign() -> anyhow::Result<()> {
        let envelope =
            UnsignedEnvelope::assemble(&payer().pubkey(), &instructions(), Hash::default())?;

        let signers = envelope.required_signers();
        assert_eq!(signers.len(), 3);
        assert_eq!(signers[0], payer().pubkey());
        assert!(signers.contains(&fungible_mint().pubkey()));
        assert!(signers.contains(&nft_mint().pubkey()));

        let partial = envelope.sign(&[payer() as &dyn Signer, fungible_mint()])?;
        assert_eq!(partial.missing_signers(), vec![nft_mint().pubkey()]);
        Ok(())
    }

    #[tokio::test]
    async fn mint_accounts_are_created_on_the_ledger() -> anyhow::Result<()> {
        let ledger = MockLedger::new();
        ledger.set_balance(&payer().pubkey(), LAMPORTS_PER_SOL);
        let mut config = ClientConfig::default();
        config.confirm.poll_interval = Duration::from_millis(1);
        let client = BootcampClient::new(ledger, config);

        let (fungible, nft) = mint_assets(&client, payer(), &args()).await?;

        for mint in [fungible, nft] {
            let account = client.connection.account(&mint).expect("mint should exist");
            assert_eq!(account.owner, SPL_TOKEN_ID);
            assert_eq!(account.data.len(), MINT_SIZE);
        }
        Ok(())
    }
}
