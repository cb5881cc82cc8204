//! The end-to-end fleet run: a collection, a batch of ships minted into it, and
//! the fungible cargo tokens.

use std::str::FromStr;

use rand::Rng;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::batch::run_batch;
use crate::config::FleetConfig;
use crate::constants::TOKEN_MINT_KEY;
use crate::convert::collection_json;
use crate::data::JsonMetadata;
use crate::explorer::{explorer_url, Cluster, ExplorerTarget};
use crate::fungible::{create_fungible_token, CreateFungibleArgs};
use crate::keys::{KeyStore, KeyStoreError};
use crate::mint::{create_collection, ChainMinter, CreateCollectionArgs, MintAndVerify};
use crate::names::{random_description, random_ship_name, ship_image_url};
use crate::submit::{SubmissionOutcome, SubmitError, Submitter};
use crate::transaction::FailedTransaction;
use crate::upload::MetadataUploader;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("no {} found in the local key store; create the token mint first", TOKEN_MINT_KEY)]
    MissingTokenMint,

    #[error("ship {} could not be minted, batch aborted: {source:#}", .index + 1)]
    BatchAborted {
        index: usize,
        source: anyhow::Error,
    },

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Everything a run needs, created once at startup and passed by reference.
pub struct FleetContext {
    pub client: RpcClient,
    pub payer: Keypair,
    pub uploader: Box<dyn MetadataUploader>,
    pub config: FleetConfig,
    pub cluster: Cluster,
}

impl FleetContext {
    pub fn new(
        client: RpcClient,
        payer: Keypair,
        uploader: Box<dyn MetadataUploader>,
        config: FleetConfig,
    ) -> anyhow::Result<Self> {
        let cluster = Cluster::from_str(&config.cluster)?;
        Ok(Self {
            client,
            payer,
            uploader,
            config,
            cluster,
        })
    }
}

#[derive(Debug)]
pub struct FleetReport {
    pub collection_mint: Pubkey,
    pub ships: Vec<Pubkey>,
    pub tokens: Vec<Pubkey>,
}

pub async fn run(ctx: &FleetContext, cancel: CancellationToken) -> Result<FleetReport, FleetError> {
    info!("Payer address: {}", ctx.payer.pubkey());

    let keys = KeyStore::load(&ctx.config.keys_path)?;
    if ctx.config.require_token_mint {
        let token_mint = match keys.get(TOKEN_MINT_KEY)? {
            Some(token_mint) => token_mint,
            None => {
                warn!("No local keys were found in {}", ctx.config.keys_path);
                return Err(FleetError::MissingTokenMint);
            }
        };
        info!("Token's mint address: {}", token_mint);
        info!(
            "{}",
            explorer_url(&ExplorerTarget::Address(token_mint), &ctx.cluster)
        );
    }

    let submitter = Submitter::with_cancellation(ctx.config.retry_policy(), cancel);

    let collection_mint = create_fleet_collection(ctx).await?;
    let ships = mint_ships(ctx, &submitter, collection_mint).await?;
    let tokens = create_cargo_tokens(ctx).await?;

    Ok(FleetReport {
        collection_mint,
        ships,
        tokens,
    })
}

async fn create_fleet_collection(ctx: &FleetContext) -> Result<Pubkey, FleetError> {
    let description = random_description(&mut rand::thread_rng());
    let metadata = collection_json(&ctx.config.collection, description);
    let uri = ctx.uploader.upload(&metadata).await?;

    let result = create_collection(
        &ctx.client,
        CreateCollectionArgs::V1 {
            authority: &ctx.payer,
            name: metadata.name,
            symbol: metadata.symbol,
            uri,
            seller_fee_basis_points: ctx.config.collection.seller_fee_basis_points,
        },
    )
    .await?;

    info!("Collection address {}", result.mint);
    info!(
        "{}",
        explorer_url(&ExplorerTarget::Address(result.mint), &ctx.cluster)
    );

    Ok(result.mint)
}

pub fn ship_metadata<R: Rng + ?Sized>(rng: &mut R, index: usize, symbol: &str) -> JsonMetadata {
    JsonMetadata {
        name: random_ship_name(rng),
        symbol: symbol.to_string(),
        description: random_description(rng),
        image: ship_image_url(index),
    }
}

async fn mint_ships(
    ctx: &FleetContext,
    submitter: &Submitter,
    collection_mint: Pubkey,
) -> Result<Vec<Pubkey>, FleetError> {
    let items: Vec<JsonMetadata> = {
        let mut rng = rand::thread_rng();
        (0..ctx.config.ship_count)
            .map(|index| ship_metadata(&mut rng, index, &ctx.config.ships.symbol))
            .collect()
    };

    let report = run_batch(submitter, items, move |index, metadata| {
        mint_ship(ctx, submitter, collection_mint, index, metadata)
    })
    .await?;

    match report.aborted {
        None => Ok(report.completed),
        Some(abort) => Err(FleetError::BatchAborted {
            index: abort.index,
            source: abort.error,
        }),
    }
}

async fn mint_ship(
    ctx: &FleetContext,
    submitter: &Submitter,
    collection_mint: Pubkey,
    index: usize,
    metadata: JsonMetadata,
) -> Result<SubmissionOutcome<Pubkey>, SubmitError> {
    info!("==== Creating Ship {} ====", index + 1);

    let uri = match submitter
        .submit("upload ship metadata", || ctx.uploader.upload(&metadata))
        .await?
    {
        SubmissionOutcome::Success(uri) => uri,
        SubmissionOutcome::ExhaustedRetries(err) => {
            return Ok(SubmissionOutcome::ExhaustedRetries(err))
        }
    };

    let op = MintAndVerify::new(
        ChainMinter::new(&ctx.client, &ctx.payer),
        ctx.config.ships.item(metadata.name, uri),
        collection_mint,
        ctx.cluster.clone(),
    );

    submitter.submit("Minting", || op.run()).await
}

async fn create_cargo_tokens(ctx: &FleetContext) -> Result<Vec<Pubkey>, FleetError> {
    let mut minted = Vec::with_capacity(ctx.config.tokens.len());

    for config in &ctx.config.tokens {
        info!("Creating {} ({}), {} decimals", config.name, config.symbol, config.decimals);
        let mint = Keypair::new();

        let result = create_fungible_token(
            &ctx.client,
            CreateFungibleArgs::V1 {
                payer: &ctx.payer,
                mint: &mint,
                config,
            },
        )
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                if let Some(failed) = err.downcast_ref::<FailedTransaction>() {
                    error!(
                        "Failed signature: {}",
                        explorer_url(&ExplorerTarget::Transaction(failed.signature), &ctx.cluster)
                    );
                }
                return Err(err.into());
            }
        };

        info!("Transaction completed.");
        info!(
            "{}",
            explorer_url(&ExplorerTarget::Transaction(result.signature), &ctx.cluster)
        );

        KeyStore::save_key(&ctx.config.keys_path, TOKEN_MINT_KEY, &result.mint)?;
        minted.push(result.mint);
    }

    Ok(minted)
}
