use mpl_token_metadata::accounts::Metadata;
use serde::{Deserialize, Serialize};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::decode::{decode_metadata, DecodeError};
use crate::derive::{derive_edition_pda, derive_metadata_pda};

/// The accounts a token-metadata instruction needs for one mint.
pub struct Asset {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub edition: Option<Pubkey>,
}

impl Asset {
    pub fn new(mint: Pubkey) -> Self {
        let metadata = derive_metadata_pda(&mint);

        Self {
            mint,
            metadata,
            edition: None,
        }
    }

    pub fn add_edition(&mut self) {
        self.edition = Some(derive_edition_pda(&self.mint));
    }

    pub async fn get_metadata(&self, client: &RpcClient) -> Result<Metadata, DecodeError> {
        decode_metadata(client, &self.metadata).await
    }
}

pub struct MintResult {
    pub signature: Signature,
    pub mint: Pubkey,
}

/// Off-chain JSON document the on-chain `uri` points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: String,
    pub seller_fee_basis_points: u16,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "Seven Seas".to_string(),
            symbol: "7SEAS".to_string(),
            description: None,
            image: "https://bafkreidf4cwzo36gm3stc2jlhzqaai44ufdtinpityei7gxgunowyv6ygu.ipfs.nftstorage.link/"
                .to_string(),
            seller_fee_basis_points: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub is_mutable: bool,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            symbol: "SHIP".to_string(),
            // 5.00% royalty
            seller_fee_basis_points: 500,
            is_mutable: true,
        }
    }
}

impl ShipConfig {
    pub fn item(&self, name: String, uri: String) -> CollectionItem {
        CollectionItem {
            name,
            symbol: self.symbol.clone(),
            uri,
            seller_fee_basis_points: self.seller_fee_basis_points,
            is_mutable: self.is_mutable,
        }
    }
}

/// On-chain fields of one NFT that goes into a collection.
#[derive(Debug, Clone)]
pub struct CollectionItem {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub is_mutable: bool,
}

/// A fungible token to create with on-chain metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl TokenConfig {
    pub fn new(decimals: u8, name: &str, symbol: &str, uri: &str) -> Self {
        Self {
            decimals,
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
        }
    }
}

pub fn default_token_configs() -> Vec<TokenConfig> {
    let uri = "https://thisisnot.arealurl/info.json";
    vec![
        TokenConfig::new(2, "Seven Seas Gold", "GOLD", uri),
        TokenConfig::new(2, "Seven Seas Gold", "GOLD", uri),
        TokenConfig::new(2, "Seven Seas Rum", "RUM", uri),
        TokenConfig::new(2, "Seven Seas Cannons", "CANNONS", uri),
    ]
}
