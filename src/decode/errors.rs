use solana_client::client_error::ClientErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no account data found for {0}")]
    MissingAccount(String),

    #[error("failed to get account data: {0}")]
    ClientError(ClientErrorKind),

    #[error("failed to parse string into Pubkey: {0}")]
    PubkeyParseFailed(String),

    #[error("failed to decode metadata: {0}")]
    DecodeMetadataFailed(String),
}
