#![allow(dead_code)]

use std::time::Duration;

use anyhow::Result;
use mpl_token_metadata::accounts::Metadata;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;

pub const LOCALNET: &str = "http://localhost:8899";

pub async fn airdrop(client: &RpcClient, receiver: &Pubkey, lamports: u64) -> Result<()> {
    let recent_blockhash = client.get_latest_blockhash().await?;
    let signature = client
        .request_airdrop_with_blockhash(receiver, lamports, &recent_blockhash)
        .await?;

    println!("Airdropping funds to {}...", receiver);
    client
        .confirm_transaction_with_spinner(
            &signature,
            &recent_blockhash,
            CommitmentConfig::finalized(),
        )
        .await?;

    Ok(())
}

pub fn trimmed(value: &str) -> &str {
    value.trim_matches(char::from(0))
}

pub fn assert_in_collection(metadata: &Metadata, collection_mint: &Pubkey, verified: bool) {
    let collection = metadata
        .collection
        .as_ref()
        .expect("metadata has no collection");
    assert_eq!(&collection.key, collection_mint);
    assert_eq!(collection.verified, verified);
}

/// Paused-clock sleeps land on their deadline to within a tick.
pub fn assert_slept(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "expected ~{:?} of sleep, got {:?}",
        expected,
        elapsed
    );
}
