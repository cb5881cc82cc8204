use anyhow::Result;
use retry::delay::Exponential;
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_program::instruction::Instruction;
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use thiserror::Error;
use tracing::debug;

/// A send that failed after the transaction was signed. The signature is still
/// useful for looking the transaction up in an explorer.
#[derive(Error, Debug)]
#[error("transaction {signature} failed: {source}")]
pub struct FailedTransaction {
    pub signature: Signature,
    #[source]
    pub source: ClientError,
}

macro_rules! transaction {
    ($signers:expr, $instructions:expr, $client:expr) => {
        Transaction::new_signed_with_payer(
            $instructions,
            Some(&$signers[0].pubkey()),
            $signers,
            $client.get_latest_blockhash().await?,
        )
    };
}

/// Sign `ixs` with `signers`, the first signer paying the fees, then send and confirm.
pub async fn send_and_confirm_tx(
    client: &RpcClient,
    signers: &[&Keypair],
    ixs: &[Instruction],
) -> Result<Signature> {
    let tx = transaction!(signers, ixs, client);

    let signature = client
        .send_and_confirm_transaction(&tx)
        .await
        .map_err(|source| failed(&tx, source))?;

    Ok(signature)
}

pub async fn send_and_confirm_tx_with_retries(
    client: &RpcClient,
    signers: &[&Keypair],
    ixs: &[Instruction],
) -> Result<Signature> {
    let tx = transaction!(signers, ixs, client);

    // Send tx with retries.
    let mut delays = Exponential::from_millis_with_factor(250, 2.0).take(3);
    loop {
        match client.send_and_confirm_transaction(&tx).await {
            Ok(signature) => return Ok(signature),
            Err(err) => match delays.next() {
                Some(delay) => {
                    debug!("send failed, resending in {:?}: {}", delay, err);
                    tokio::time::sleep(delay).await;
                }
                None => return Err(failed(&tx, err).into()),
            },
        }
    }
}

fn failed(tx: &Transaction, source: ClientError) -> FailedTransaction {
    FailedTransaction {
        signature: tx.signatures.first().copied().unwrap_or_default(),
        source,
    }
}
