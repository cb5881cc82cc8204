use std::{fmt::Display, str::FromStr};

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use url::form_urlencoded;

use crate::constants::EXPLORER_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
    Custom(String),
}

impl FromStr for Cluster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Cluster::Custom(url.to_string()))
            }
            _ => Err(anyhow::anyhow!("Invalid cluster: {}", s)),
        }
    }
}

impl Cluster {
    fn query(&self) -> Option<String> {
        match self {
            Cluster::MainnetBeta => None,
            Cluster::Devnet => Some("cluster=devnet".to_string()),
            Cluster::Testnet => Some("cluster=testnet".to_string()),
            Cluster::Localnet => Some(
                "cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899".to_string(),
            ),
            Cluster::Custom(url) => Some(format!("cluster=custom&customUrl={}", encode(url))),
        }
    }
}

pub enum ExplorerTarget {
    Address(Pubkey),
    Transaction(Signature),
}

impl Display for ExplorerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerTarget::Address(address) => write!(f, "address/{}", address),
            ExplorerTarget::Transaction(signature) => write!(f, "tx/{}", signature),
        }
    }
}

pub fn explorer_url(target: &ExplorerTarget, cluster: &Cluster) -> String {
    match cluster.query() {
        Some(query) => format!("{}/{}?{}", EXPLORER_BASE_URL, target, query),
        None => format!("{}/{}", EXPLORER_BASE_URL, target),
    }
}

fn encode(url: &str) -> String {
    form_urlencoded::byte_serialize(url.as_bytes()).collect()
}
