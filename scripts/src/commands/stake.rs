use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    context::stake::StakeContext,
    logs::log_success,
    print_kv,
    transactions::BootcampClient,
};
use bootcamp_interface::{
    program_ids::STAKE_PROGRAM_ID,
    state::StakeInfo,
};
use clap::Subcommand;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::commands::ensure_funded;

#[derive(clap::Args, Debug)]
pub struct StakeArgs {
    #[arg(long, default_value_t = STAKE_PROGRAM_ID)]
    pub program_id: Pubkey,

    /// The staked token's mint.
    #[arg(long)]
    pub mint: Pubkey,

    #[command(subcommand)]
    pub command: StakeCommand,
}

#[derive(Subcommand, Debug)]
pub enum StakeCommand {
    /// Creates the reward vault for the mint, with the payer as admin.
    Initialize,

    /// Stakes `amount` base units from the payer's token account.
    Stake {
        #[arg(long)]
        amount: u64,
    },

    /// Unstakes `amount` base units, collecting rewards.
    Unstake {
        #[arg(long)]
        amount: u64,
    },

    /// Prints a staker's position, the payer's by default.
    Status {
        #[arg(long)]
        staker: Option<Pubkey>,
    },
}

pub async fn run<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    args: StakeArgs,
) -> anyhow::Result<()> {
    let ctx = StakeContext::new(args.program_id, args.mint);
    let staker = payer.pubkey();

    let (label, instruction) = match args.command {
        StakeCommand::Status { staker } => {
            let info = status(client, &ctx, &staker.unwrap_or(payer.pubkey())).await?;
            print_stake_info(&info);
            return Ok(());
        }
        StakeCommand::Initialize => {
            print_kv!("Reward vault", ctx.reward_vault());
            ("Initialized", ctx.initialize(&staker))
        }
        StakeCommand::Stake { amount } => ("Staked", ctx.stake(&staker, amount)?),
        StakeCommand::Unstake { amount } => ("Unstaked", ctx.unstake(&staker, amount)?),
    };
    ensure_funded(client, &staker).await?;

    let signature = client
        .send_single_signer(payer, [instruction])
        .await
        .with_context(|| format!("calling the staking program at {}", ctx.program_id))?;
    log_success(label, signature);
    Ok(())
}

pub async fn status<C: LedgerConnection>(
    client: &BootcampClient<C>,
    ctx: &StakeContext,
    staker: &Pubkey,
) -> anyhow::Result<StakeInfo> {
    let address = ctx.stake_info(staker);
    let account = client
        .account(&address)
        .await
        .with_context(|| format!("fetching the stake info of {staker}"))?;
    Ok(ctx.decode_stake_info(&address, &account)?)
}

fn print_stake_info(info: &StakeInfo) {
    print_kv!("Staker", info.staker);
    print_kv!("Mint", info.mint);
    print_kv!("Staked", info.is_staked);
    print_kv!("Amount", info.amount);
    print_kv!("Staked at slot", info.stake_at);
}
