use anyhow::{anyhow, Result};
use clap::Parser;
use dotenv::dotenv;
use seven_seas_lib::{
    config::FleetConfig,
    fleet::{self, FleetContext, FleetError},
    logging,
    upload::{HttpUploader, MemoryUploader, MetadataUploader},
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signature::read_keypair_file};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Mint a pirate-ship collection and its cargo tokens on Solana.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "SevenSeas.toml")]
    config: String,

    /// Number of ships to mint into the collection.
    #[arg(long)]
    ships: Option<usize>,

    #[arg(long)]
    rpc_url: Option<String>,

    /// Payer keypair file.
    #[arg(short, long)]
    keypair: Option<String>,

    /// Keep metadata in memory instead of uploading it.
    #[arg(long)]
    dry_run: bool,

    /// Do not require a previously created token mint in the key store.
    #[arg(long)]
    skip_key_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = FleetConfig::load(&args.config)?;
    if let Some(ships) = args.ships {
        config.ship_count = ships;
    }
    if let Some(rpc_url) = args.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(keypair) = args.keypair {
        config.keypair_path = keypair;
    }
    if args.skip_key_check {
        config.require_token_mint = false;
    }

    logging::init(&config.log_level)?;
    info!("Loaded config from {}", args.config);

    let payer = read_keypair_file(&config.keypair_path)
        .map_err(|e| anyhow!("failed to read keypair {}: {}", config.keypair_path, e))?;
    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    let uploader: Box<dyn MetadataUploader> = if args.dry_run {
        Box::new(MemoryUploader::default())
    } else {
        Box::new(HttpUploader::from_settings(&config.upload)?)
    };

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling the run");
            signal_token.cancel();
        }
    });

    let ctx = FleetContext::new(client, payer, uploader, config)?;

    match fleet::run(&ctx, cancel).await {
        Ok(report) => {
            info!(
                "Fleet complete: collection {}, {} ships, {} tokens",
                report.collection_mint,
                report.ships.len(),
                report.tokens.len()
            );
            Ok(())
        }
        Err(FleetError::MissingTokenMint) => {
            warn!("No token mint in the local key store. Create one first or pass --skip-key-check");
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            Err(err.into())
        }
    }
}
