use std::path::PathBuf;

use anyhow::Context;
use bootcamp_client::{
    config::{
        default_keypair_path,
        parse_commitment,
        read_keypair_file,
        ClientConfig,
        Cluster,
    },
    funding::{
        DEFAULT_AIRDROP_AMOUNT,
        DEFAULT_FUNDING_THRESHOLD,
    },
};
use clap::{
    Parser,
    Subcommand,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
};

use crate::commands::{
    mint_assets::MintAssetsArgs,
    stake::StakeArgs,
    withdraw_liquidity::WithdrawLiquidityArgs,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solana bootcamp scripts", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// localnet, devnet, testnet or mainnet-beta.
    #[arg(long, env = "BOOTCAMP_CLUSTER", default_value = "devnet", global = true)]
    pub cluster: Cluster,

    /// Overrides the cluster's public RPC url.
    #[arg(long, env = "BOOTCAMP_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Fee payer keypair file. Defaults to the Solana CLI keypair.
    #[arg(long, env = "BOOTCAMP_KEYPAIR", global = true)]
    pub keypair: Option<PathBuf>,

    /// processed, confirmed or finalized.
    #[arg(long, default_value = "confirmed", global = true)]
    pub commitment: String,

    /// Prepends compute budget instructions requesting this many compute units.
    #[arg(long, global = true)]
    pub compute_units: Option<u32>,

    /// Don't pretty-print the instructions of each sent transaction.
    #[arg(long, global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::for_cluster(self.cluster);
        config.rpc_url = self.rpc_url.clone();
        config.confirm.commitment = parse_commitment(&self.commitment)?;
        config.send.compute_budget = self.compute_units;
        config.send.debug_logs = !self.quiet;
        Ok(config)
    }

    pub fn payer(&self) -> anyhow::Result<Keypair> {
        let path = self.keypair.clone().unwrap_or_else(default_keypair_path);
        read_keypair_file(&path)
            .with_context(|| format!("loading the payer keypair from {}", path.display()))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the SOL balance of an address, the payer's by default.
    Balance {
        #[arg(long)]
        address: Option<Pubkey>,
    },

    /// Airdrops to the payer when its balance is at or below the threshold.
    Airdrop {
        /// Lamports.
        #[arg(long, default_value_t = DEFAULT_FUNDING_THRESHOLD)]
        threshold: u64,

        /// Lamports.
        #[arg(long, default_value_t = DEFAULT_AIRDROP_AMOUNT)]
        amount: u64,
    },

    /// Creates a new, rent-exempt, System-owned account.
    CreateAccount {
        /// Bytes of account data to allocate.
        #[arg(long, default_value_t = 0)]
        space: u64,
    },

    /// Sends lamports from the payer.
    Transfer {
        #[arg(long)]
        to: Pubkey,

        #[arg(long)]
        lamports: u64,
    },

    /// Mints a fungible token and an NFT with metadata in a single transaction.
    MintAssets(MintAssetsArgs),

    /// Withdraws liquidity from an AMM pool.
    WithdrawLiquidity(WithdrawLiquidityArgs),

    /// Calls the staking program.
    Stake(StakeArgs),
}
