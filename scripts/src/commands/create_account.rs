use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    logs::{
        log_info,
        log_success,
    },
    pretty::explorer::{
        explorer_url,
        ExplorerTarget,
    },
    transactions::BootcampClient,
};
use bootcamp_interface::program_ids::SYSTEM_PROGRAM_ID;
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};
use solana_system_interface::instruction::create_account as create_account_ix;

/// Allocates a fresh, rent-exempt account of `space` bytes owned by the System program. The new
/// account co-signs its own creation.
pub async fn create_account<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    space: u64,
) -> anyhow::Result<Keypair> {
    let new_account = Keypair::new();
    log_info("New account", new_account.pubkey());

    let lamports = client
        .rent_exempt_lamports(space as usize)
        .await
        .context("fetching the rent-exempt minimum")?;
    log_info("Rent", format!("{lamports} lamports for {space} bytes"));

    let ix = create_account_ix(
        &payer.pubkey(),
        &new_account.pubkey(),
        lamports,
        space,
        &SYSTEM_PROGRAM_ID,
    );
    client
        .send_transaction(payer, &[&new_account], &[ix])
        .await
        .context("creating the account")?;

    log_success(
        "Account created",
        explorer_url(
            ExplorerTarget::Address(&new_account.pubkey()),
            &client.config,
        ),
    );
    Ok(new_account)
}
