use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    logs::log_balance,
    transactions::BootcampClient,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
};
use solana_system_interface::instruction::transfer as transfer_ix;

pub async fn transfer<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    to: &Pubkey,
    lamports: u64,
) -> anyhow::Result<Signature> {
    let signature = client
        .send_single_signer(payer, [transfer_ix(&payer.pubkey(), to, lamports)])
        .await
        .with_context(|| format!("transferring {lamports} lamports to {to}"))?;

    log_balance("Recipient", client.balance(to).await?);
    Ok(signature)
}
