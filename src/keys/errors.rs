use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("failed to access key store {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("key store {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored key {name} is not a valid Pubkey: {value}")]
    InvalidPubkey { name: String, value: String },
}
