use std::fs;

use seven_seas_lib::{
    config::FleetConfig,
    fleet::{run, FleetContext, FleetError},
    keys::KeyStoreError,
    upload::MemoryUploader,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Keypair;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

// Nothing listens here; these runs must stop before touching the network.
const UNREACHABLE_RPC: &str = "http://127.0.0.1:9";

fn context(keys_path: String) -> FleetContext {
    let config = FleetConfig {
        rpc_url: UNREACHABLE_RPC.to_string(),
        keys_path,
        ..FleetConfig::default()
    };

    FleetContext::new(
        RpcClient::new(config.rpc_url.clone()),
        Keypair::new(),
        Box::new(MemoryUploader::default()),
        config,
    )
    .unwrap()
}

#[tokio::test]
async fn missing_token_mint_stops_before_any_chain_call() {
    let dir = tempdir().unwrap();
    let ctx = context(dir.path().join("keys.json").display().to_string());

    let err = run(&ctx, CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, FleetError::MissingTokenMint));
}

#[tokio::test]
async fn corrupt_token_mint_is_a_key_store_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keys.json");
    fs::write(&path, r#"{"tokenMint": "definitely not base58!"}"#).unwrap();
    let ctx = context(path.display().to_string());

    let err = run(&ctx, CancellationToken::new()).await.unwrap_err();
    assert!(matches!(
        err,
        FleetError::KeyStore(KeyStoreError::InvalidPubkey { .. })
    ));
}

#[test]
fn unknown_cluster_is_rejected() {
    let config = FleetConfig {
        cluster: "atlantis".to_string(),
        ..FleetConfig::default()
    };
    let result = FleetContext::new(
        RpcClient::new(UNREACHABLE_RPC.to_string()),
        Keypair::new(),
        Box::new(MemoryUploader::default()),
        config,
    );
    assert!(result.is_err());
}
