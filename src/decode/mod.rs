use mpl_token_metadata::accounts::Metadata;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

pub mod errors;
pub use errors::DecodeError;

use crate::derive::derive_metadata_pda;

/// Anything that can name an account: a `Pubkey` or its base58 string.
pub trait ToPubkey {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError>;
}

impl ToPubkey for Pubkey {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError> {
        Ok(self)
    }
}

impl ToPubkey for &Pubkey {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError> {
        Ok(*self)
    }
}

impl ToPubkey for String {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError> {
        self.as_str().to_pubkey()
    }
}

impl ToPubkey for &String {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError> {
        self.as_str().to_pubkey()
    }
}

impl ToPubkey for &str {
    fn to_pubkey(self) -> Result<Pubkey, DecodeError> {
        Pubkey::from_str(self).map_err(|_| DecodeError::PubkeyParseFailed(self.to_string()))
    }
}

pub async fn decode_metadata_from_mint<P: ToPubkey>(
    client: &RpcClient,
    mint: P,
) -> Result<Metadata, DecodeError> {
    let mint = mint.to_pubkey()?;
    let metadata_pda = derive_metadata_pda(&mint);

    decode_metadata(client, &metadata_pda).await
}

pub async fn decode_metadata(
    client: &RpcClient,
    metadata_pubkey: &Pubkey,
) -> Result<Metadata, DecodeError> {
    let account_data = client
        .get_account_data(metadata_pubkey)
        .await
        .map_err(|e| DecodeError::ClientError(e.kind))?;

    if account_data.is_empty() {
        return Err(DecodeError::MissingAccount(metadata_pubkey.to_string()));
    }

    Metadata::from_bytes(&account_data).map_err(|e| DecodeError::DecodeMetadataFailed(e.to_string()))
}
