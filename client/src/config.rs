//! Cluster selection, client settings and keypair loading.

use std::{
    path::{
        Path,
        PathBuf,
    },
    str::FromStr,
};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::signature::Keypair;
use strum_macros::{
    Display,
    EnumString,
};

use crate::{
    error::{
        BootcampError,
        BootcampResult,
    },
    transactions::{
        ConfirmConfig,
        SendTransactionConfig,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    pub const fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Localnet => "http://localhost:8899",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    /// Airdrops only exist on test networks.
    pub const fn supports_airdrop(&self) -> bool {
        !matches!(self, Cluster::MainnetBeta)
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub cluster: Cluster,
    /// Overrides the cluster's public RPC url.
    pub rpc_url: Option<String>,
    pub send: SendTransactionConfig,
    pub confirm: ConfirmConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::default())
    }
}

impl ClientConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            cluster,
            rpc_url: None,
            send: SendTransactionConfig::default(),
            confirm: ConfirmConfig::default(),
        }
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.cluster.rpc_url())
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.confirm.commitment
    }

    pub fn connect(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url().to_string(), self.commitment())
    }
}

/// Parses `processed`, `confirmed` or `finalized`.
pub fn parse_commitment(value: &str) -> BootcampResult<CommitmentConfig> {
    CommitmentConfig::from_str(value)
        .map_err(|_| BootcampError::InvalidConfig(format!("unknown commitment level: {value}")))
}

/// `~/.config/solana/id.json`, the Solana CLI's default keypair location.
pub fn default_keypair_path() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join(".config/solana/id.json")
}

/// Parses a keypair from the Solana CLI's JSON format: an array of the 64 secret key bytes.
pub fn parse_keypair_json(json: &str) -> BootcampResult<Keypair> {
    let bytes: Vec<u8> =
        serde_json::from_str(json).map_err(|e| BootcampError::Keypair(e.to_string()))?;
    if bytes.len() != 64 {
        return Err(BootcampError::Keypair(format!(
            "expected 64 bytes, found {}",
            bytes.len()
        )));
    }
    Keypair::try_from(bytes.as_slice()).map_err(|e| BootcampError::Keypair(e.to_string()))
}

pub fn read_keypair_file(path: impl AsRef<Path>) -> BootcampResult<Keypair> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| BootcampError::Keypair(format!("{}: {e}", path.display())))?;
    parse_keypair_json(&json)
}
