use std::collections::HashMap;

use bootcamp_client::{
    context::{
        nft::{
            NftContext,
            NftMetadata,
        },
        token::{
            token_account_amount,
            TokenContext,
            MINT_SIZE,
        },
    },
    LAMPORTS_PER_SOL,
};
use bootcamp_interface::program_ids::SYSTEM_PROGRAM_ID;
use mollusk_svm::{
    Mollusk,
    MolluskContext,
};
use solana_account::Account;
use solana_address::Address;
use solana_sdk::{
    program_pack::Pack,
    rent::Rent,
};
use spl_token_interface::state::Mint;

const DECIMALS: u8 = 6;

fn new_token_mollusk_context(payer: Address) -> MolluskContext<HashMap<Address, Account>> {
    let mut mollusk = Mollusk::default();
    mollusk_svm_programs_token::token::add_program(&mut mollusk);
    mollusk_svm_programs_token::associated_token::add_program(&mut mollusk);

    let context = mollusk.with_context(HashMap::new());
    context.account_store.borrow_mut().insert(
        payer,
        Account::new(100 * LAMPORTS_PER_SOL, 0, &SYSTEM_PROGRAM_ID),
    );
    context
}

#[test]
fn mint_and_distribute_fungible_tokens() -> anyhow::Result<()> {
    let payer = Address::new_unique();
    let receiver = Address::new_unique();
    let mint = Address::new_unique();
    let mollusk = new_token_mollusk_context(payer);
    let token = TokenContext::spl(Some(payer), mint, DECIMALS);

    let [create_mint, initialize_mint] =
        token.create_mint(&payer, Rent::default().minimum_balance(MINT_SIZE), None)?;
    let res = mollusk.process_instruction_chain(&[
        create_mint,
        initialize_mint,
        token.create_ata(&payer, &payer),
        token.create_ata(&payer, &receiver),
        token.mint_to_owner(&payer, token.to_base_units(100))?,
        token.mint_to_owner(&receiver, token.to_base_units(10))?,
    ]);
    assert!(res.program_result.is_ok());

    let get_account = |address: &Address| mollusk.account_store.borrow().get(address).cloned();

    let mint_account = get_account(&mint).expect("mint should exist");
    let decoded = TokenContext::from_account_data(mint, mint_account.owner, &mint_account.data)?;
    assert_eq!(decoded.mint_decimals, DECIMALS);
    assert_eq!(decoded.mint_authority, Some(payer));

    let payer_ata = token.get_ata_for(&payer);
    let receiver_ata = token.get_ata_for(&receiver);
    let payer_tokens = get_account(&payer_ata).expect("payer ATA should exist");
    let receiver_tokens = get_account(&receiver_ata).expect("receiver ATA should exist");
    assert_eq!(token_account_amount(&payer_ata, &payer_tokens.data)?, 100_000_000);
    assert_eq!(token_account_amount(&receiver_ata, &receiver_tokens.data)?, 10_000_000);

    Ok(())
}

#[test]
fn minting_before_the_token_account_exists_fails() -> anyhow::Result<()> {
    let payer = Address::new_unique();
    let mint = Address::new_unique();
    let mollusk = new_token_mollusk_context(payer);
    let token = TokenContext::spl(Some(payer), mint, DECIMALS);

    let [create_mint, initialize_mint] =
        token.create_mint(&payer, Rent::default().minimum_balance(MINT_SIZE), None)?;
    let res = mollusk.process_instruction_chain(&[
        create_mint,
        initialize_mint,
        token.mint_to_owner(&payer, 1)?,
    ]);

    assert!(res.program_result.is_err());
    Ok(())
}

#[test]
fn mint_a_single_edition_nft() -> anyhow::Result<()> {
    let payer = Address::new_unique();
    let mint = Address::new_unique();
    let mollusk = new_token_mollusk_context(payer);
    let nft = NftContext::new(mint, payer);
    let metadata = NftMetadata {
        name: "Bootcamp NFT".into(),
        symbol: "BCNFT".into(),
        uri: "https://example.com/nft.json".into(),
        seller_fee_basis_points: 1000,
        is_mutable: true,
    };

    let mut instructions = nft.mint_instructions(
        &payer,
        &payer,
        Rent::default().minimum_balance(MINT_SIZE),
        &metadata,
    )?;
    // The metadata program isn't loaded; everything before it runs against the token programs.
    instructions.pop();
    let res = mollusk.process_instruction_chain(&instructions);
    assert!(res.program_result.is_ok());

    let get_account = |address: &Address| mollusk.account_store.borrow().get(address).cloned();

    let mint_account = get_account(&mint).expect("mint should exist");
    let decoded = Mint::unpack(&mint_account.data)?;
    assert_eq!(decoded.decimals, 0);
    assert_eq!(decoded.supply, 1);
    assert_eq!(Option::<Address>::from(decoded.mint_authority), Some(payer));
    assert_eq!(Option::<Address>::from(decoded.freeze_authority), Some(payer));

    let ata = nft.token.get_ata_for(&payer);
    let ata_account = get_account(&ata).expect("ATA should exist");
    assert_eq!(token_account_amount(&ata, &ata_account.data)?, 1);

    Ok(())
}
