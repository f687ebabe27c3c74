use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
};
use url::form_urlencoded::byte_serialize;

use crate::config::{
    ClientConfig,
    Cluster,
};

const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

pub enum ExplorerTarget<'a> {
    Transaction(&'a Signature),
    Address(&'a Pubkey),
}

fn cluster_query(config: &ClientConfig) -> String {
    match config.cluster {
        Cluster::MainnetBeta => String::new(),
        Cluster::Localnet => {
            let custom_url: String = byte_serialize(config.rpc_url().as_bytes()).collect();
            format!("?cluster=custom&customUrl={custom_url}")
        }
        other => format!("?cluster={other}"),
    }
}

/// Builds a Solana Explorer link to a transaction or an address on the configured cluster.
///
/// Localnet links point the explorer at the effective RPC url, including any override.
pub fn explorer_url(target: ExplorerTarget<'_>, config: &ClientConfig) -> String {
    let path = match target {
        ExplorerTarget::Transaction(signature) => format!("tx/{signature}"),
        ExplorerTarget::Address(address) => format!("address/{address}"),
    };
    format!("{EXPLORER_BASE_URL}/{path}{}", cluster_query(config))
}
