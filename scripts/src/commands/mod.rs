use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    funding::{
        FundingOutcome,
        DEFAULT_AIRDROP_AMOUNT,
        DEFAULT_FUNDING_THRESHOLD,
    },
    logs::{
        log_balance,
        log_divider,
        log_info,
        log_warning,
    },
    transactions::BootcampClient,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::cli::Commands;

pub mod create_account;
pub mod mint_assets;
pub mod stake;
pub mod transfer;
pub mod withdraw_liquidity;

pub async fn run<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    command: Commands,
) -> anyhow::Result<()> {
    log_info("Cluster", client.config.cluster);
    log_info("Payer", payer.pubkey());

    match command {
        Commands::Balance { address } => {
            let address = address.unwrap_or_else(|| payer.pubkey());
            log_balance(address, client.balance(&address).await?);
        }
        Commands::Airdrop { threshold, amount } => {
            fund(client, &payer.pubkey(), threshold, amount).await?;
        }
        Commands::CreateAccount { space } => {
            ensure_funded(client, &payer.pubkey()).await?;
            create_account::create_account(client, payer, space).await?;
        }
        Commands::Transfer { to, lamports } => {
            ensure_funded(client, &payer.pubkey()).await?;
            transfer::transfer(client, payer, &to, lamports).await?;
        }
        Commands::MintAssets(args) => {
            ensure_funded(client, &payer.pubkey()).await?;
            mint_assets::mint_assets(client, payer, &args).await?;
        }
        Commands::WithdrawLiquidity(args) => {
            ensure_funded(client, &payer.pubkey()).await?;
            withdraw_liquidity::withdraw_liquidity(client, payer, &args).await?;
        }
        Commands::Stake(args) => stake::run(client, payer, args).await?,
    }

    log_divider();
    Ok(())
}

/// The opening step of the spending scripts: top up the payer on clusters that hand out airdrops.
pub(crate) async fn ensure_funded<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Pubkey,
) -> anyhow::Result<()> {
    if !client.config.cluster.supports_airdrop() {
        log_balance("Balance", client.balance(payer).await?);
        return Ok(());
    }
    fund(
        client,
        payer,
        DEFAULT_FUNDING_THRESHOLD,
        DEFAULT_AIRDROP_AMOUNT,
    )
    .await
}

async fn fund<C: LedgerConnection>(
    client: &BootcampClient<C>,
    address: &Pubkey,
    threshold: u64,
    amount: u64,
) -> anyhow::Result<()> {
    if !client.config.cluster.supports_airdrop() {
        log_warning("Airdrop", format!("not available on {}", client.config.cluster));
        return Ok(());
    }

    let outcome = client
        .fund_if_low(address, threshold, amount)
        .await
        .context("funding the payer")?;
    if let FundingOutcome::Funded { .. } = outcome {
        log_balance("Balance", client.balance(address).await?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bootcamp_client::{
        config::ClientConfig,
        test_helpers::{
            mock_ledger::{
                LedgerCall,
                MockLedger,
            },
            test_accounts::payer,
        },
    };

    use super::*;
    use crate::commands::{
        stake::{
            StakeArgs,
            StakeCommand,
        },
        withdraw_liquidity::WithdrawLiquidityArgs,
    };

    fn unfunded_client() -> BootcampClient<MockLedger> {
        let mut config = ClientConfig::default();
        config.send.debug_logs = false;
        config.confirm.poll_interval = Duration::from_millis(1);
        BootcampClient::new(MockLedger::new(), config)
    }

    fn opens_with_an_airdrop(calls: &[LedgerCall]) -> bool {
        matches!(
            calls,
            [
                LedgerCall::GetBalance(_),
                LedgerCall::RequestAirdrop { .. },
                ..
            ]
        )
    }

    #[tokio::test]
    async fn withdraw_liquidity_funds_the_payer_first() {
        let client = unfunded_client();
        let command = Commands::WithdrawLiquidity(WithdrawLiquidityArgs {
            amm_program: Pubkey::new_unique(),
            amm: Pubkey::new_unique(),
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            amount: 1_000,
            create_atas: false,
        });

        // The withdrawal itself may fail against the mock; only the funding step matters here.
        let _ = run(&client, payer(), command).await;

        assert!(opens_with_an_airdrop(&client.connection.calls()));
        assert_eq!(
            client.connection.calls()[1],
            LedgerCall::RequestAirdrop {
                address: payer().pubkey(),
                lamports: DEFAULT_AIRDROP_AMOUNT,
            }
        );
    }

    #[tokio::test]
    async fn staking_funds_the_payer_first() -> anyhow::Result<()> {
        let client = unfunded_client();
        let command = Commands::Stake(StakeArgs {
            program_id: bootcamp_interface::program_ids::STAKE_PROGRAM_ID,
            mint: Pubkey::new_unique(),
            command: StakeCommand::Stake { amount: 10 },
        });

        run(&client, payer(), command).await?;

        assert!(opens_with_an_airdrop(&client.connection.calls()));
        assert_eq!(
            client
                .connection
                .count_calls(|call| matches!(call, LedgerCall::SendTransaction(_))),
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn stake_status_never_airdrops() {
        let client = unfunded_client();
        let command = Commands::Stake(StakeArgs {
            program_id: bootcamp_interface::program_ids::STAKE_PROGRAM_ID,
            mint: Pubkey::new_unique(),
            command: StakeCommand::Status { staker: None },
        });

        // No position exists, so the status read fails.
        assert!(run(&client, payer(), command).await.is_err());
        assert_eq!(
            client
                .connection
                .count_calls(|call| matches!(call, LedgerCall::RequestAirdrop { .. })),
            0
        );
    }
}
