use anyhow::{bail, Result};
use mpl_token_metadata::types::DataV2;

use crate::constants::{MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH};
use crate::data::{CollectionConfig, JsonMetadata, TokenConfig};

/// Fungible tokens carry no creators, royalty, collection or uses.
pub fn convert_token_config(local: &TokenConfig) -> Result<DataV2> {
    check_lengths(&local.name, &local.symbol, &local.uri)?;

    Ok(DataV2 {
        name: local.name.clone(),
        symbol: local.symbol.clone(),
        uri: local.uri.clone(),
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    })
}

pub fn collection_json(config: &CollectionConfig, description: String) -> JsonMetadata {
    JsonMetadata {
        name: config.name.clone(),
        symbol: config.symbol.clone(),
        description: config.description.clone().unwrap_or(description),
        image: config.image.clone(),
    }
}

pub fn check_lengths(name: &str, symbol: &str, uri: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        bail!("name {:?} is longer than {} bytes", name, MAX_NAME_LENGTH);
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        bail!("symbol {:?} is longer than {} bytes", symbol, MAX_SYMBOL_LENGTH);
    }
    if uri.len() > MAX_URI_LENGTH {
        bail!("uri is longer than {} bytes", MAX_URI_LENGTH);
    }
    Ok(())
}
