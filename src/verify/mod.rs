use anyhow::Result;
use mpl_token_metadata::instructions::VerifyCollectionV1Builder;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{data::Asset, decode::ToPubkey, transaction::send_and_confirm_tx_with_retries};

mod collection;

pub use collection::*;
