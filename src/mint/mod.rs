use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use mpl_token_metadata::{
    instructions::{CreateV1Builder, MintV1Builder},
    types::{Collection, CollectionDetails, PrintSupply, TokenStandard},
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
    signer::{keypair::Keypair, Signer},
};
use spl_associated_token_account::get_associated_token_address;
use tracing::info;

use crate::constants::SPL_TOKEN_PROGRAM_ID;
use crate::convert::check_lengths;
use crate::data::{Asset, CollectionItem, MintResult};
use crate::decode::ToPubkey;
use crate::explorer::{explorer_url, Cluster, ExplorerTarget};
use crate::transaction::send_and_confirm_tx_with_retries;
use crate::verify::{verify_collection, VerifyCollectionArgs};

pub enum MintNftArgs<'a, P: ToPubkey> {
    V1 {
        payer: Option<&'a Keypair>,
        authority: &'a Keypair,
        receiver: P,
        name: String,
        symbol: String,
        uri: String,
        seller_fee_basis_points: u16,
        is_mutable: bool,
        /// Parent collection; the new asset points at it unverified.
        collection: Option<Pubkey>,
    },
}

pub enum CreateCollectionArgs<'a> {
    V1 {
        authority: &'a Keypair,
        name: String,
        symbol: String,
        uri: String,
        seller_fee_basis_points: u16,
    },
}

impl<'a> From<CreateCollectionArgs<'a>> for MintNftArgs<'a, Pubkey> {
    fn from(args: CreateCollectionArgs<'a>) -> Self {
        let CreateCollectionArgs::V1 {
            authority,
            name,
            symbol,
            uri,
            seller_fee_basis_points,
        } = args;

        MintNftArgs::V1 {
            payer: None,
            authority,
            receiver: authority.pubkey(),
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            is_mutable: true,
            collection: None,
        }
    }
}

pub async fn mint_nft<'a, P: ToPubkey>(
    client: &RpcClient,
    args: MintNftArgs<'a, P>,
) -> Result<MintResult> {
    match args {
        MintNftArgs::V1 { .. } => mint_nft_v1(client, args, &Keypair::new(), None).await,
    }
}

/// A sized collection parent, minted to its authority.
pub async fn create_collection(
    client: &RpcClient,
    args: CreateCollectionArgs<'_>,
) -> Result<MintResult> {
    match args {
        CreateCollectionArgs::V1 { .. } => {
            let details = CollectionDetails::V1 { size: 0 };
            mint_nft_v1(client, args.into(), &Keypair::new(), Some(details)).await
        }
    }
}

async fn mint_nft_v1<'a, P: ToPubkey>(
    client: &RpcClient,
    args: MintNftArgs<'a, P>,
    mint_signer: &Keypair,
    collection_details: Option<CollectionDetails>,
) -> Result<MintResult> {
    let MintNftArgs::V1 {
        payer,
        authority,
        receiver,
        name,
        symbol,
        uri,
        seller_fee_basis_points,
        is_mutable,
        collection,
    } = args;

    check_lengths(&name, &symbol, &uri)?;

    let mut asset = Asset::new(mint_signer.pubkey());
    asset.add_edition();

    let receiver = receiver.to_pubkey()?;
    let payer = payer.unwrap_or(authority);

    let mut create_builder = CreateV1Builder::new();
    create_builder
        .metadata(asset.metadata)
        .master_edition(asset.edition)
        .mint(asset.mint, true)
        .authority(authority.pubkey())
        .payer(payer.pubkey())
        .update_authority(authority.pubkey(), true)
        .spl_token_program(Some(SPL_TOKEN_PROGRAM_ID))
        .name(name)
        .symbol(symbol)
        .uri(uri)
        .seller_fee_basis_points(seller_fee_basis_points)
        .primary_sale_happened(false)
        .is_mutable(is_mutable)
        .token_standard(TokenStandard::NonFungible)
        .print_supply(PrintSupply::Zero);

    if let Some(collection) = collection {
        create_builder.collection(Collection {
            verified: false,
            key: collection,
        });
    }

    if let Some(details) = collection_details {
        create_builder.collection_details(details);
    }

    let create_ix = create_builder.instruction();

    let token_ata = get_associated_token_address(&receiver, &asset.mint);

    let mint_ix = MintV1Builder::new()
        .token(token_ata)
        .token_owner(Some(receiver))
        .metadata(asset.metadata)
        .master_edition(asset.edition)
        .mint(asset.mint)
        .authority(authority.pubkey())
        .payer(payer.pubkey())
        .amount(1)
        .instruction();

    let mut signers = vec![payer];
    if payer.pubkey() != authority.pubkey() {
        signers.push(authority);
    }
    signers.push(mint_signer);

    let signature =
        send_and_confirm_tx_with_retries(client, &signers, &[create_ix, mint_ix]).await?;

    Ok(MintResult {
        signature,
        mint: asset.mint,
    })
}

/// The chain side of [`MintAndVerify`].
#[async_trait]
pub trait CollectionMinter: Send + Sync {
    async fn mint_exists(&self, mint: &Pubkey) -> Result<bool>;

    async fn mint_item(
        &self,
        mint: &Keypair,
        item: &CollectionItem,
        collection_mint: &Pubkey,
    ) -> Result<MintResult>;

    async fn verify_item(&self, mint: &Pubkey, collection_mint: &Pubkey) -> Result<Signature>;
}

/// Mints and verifies through the token-metadata program, paid for by `authority`.
pub struct ChainMinter<'a> {
    client: &'a RpcClient,
    authority: &'a Keypair,
}

impl<'a> ChainMinter<'a> {
    pub fn new(client: &'a RpcClient, authority: &'a Keypair) -> Self {
        Self { client, authority }
    }
}

#[async_trait]
impl CollectionMinter for ChainMinter<'_> {
    async fn mint_exists(&self, mint: &Pubkey) -> Result<bool> {
        let account = self
            .client
            .get_account_with_commitment(mint, self.client.commitment())
            .await?;
        Ok(account.value.is_some())
    }

    async fn mint_item(
        &self,
        mint: &Keypair,
        item: &CollectionItem,
        collection_mint: &Pubkey,
    ) -> Result<MintResult> {
        let args = MintNftArgs::V1 {
            payer: None,
            authority: self.authority,
            receiver: self.authority.pubkey(),
            name: item.name.clone(),
            symbol: item.symbol.clone(),
            uri: item.uri.clone(),
            seller_fee_basis_points: item.seller_fee_basis_points,
            is_mutable: item.is_mutable,
            collection: Some(*collection_mint),
        };

        mint_nft_v1(self.client, args, mint, None).await
    }

    async fn verify_item(&self, mint: &Pubkey, collection_mint: &Pubkey) -> Result<Signature> {
        verify_collection(
            self.client,
            VerifyCollectionArgs::V1 {
                authority: self.authority,
                mint: *mint,
                collection_mint: *collection_mint,
                is_delegate: false,
            },
        )
        .await
    }
}

/// Mint an NFT into `collection_mint`, then verify its membership.
///
/// Handed to the retry submitter as the per-item operation. The mint keypair is
/// fixed for the life of the operation, so every attempt targets the same
/// address. Once a create has been sent, later attempts look the mint up first
/// and only re-run the verify step if it already landed.
pub struct MintAndVerify<M> {
    minter: M,
    item: CollectionItem,
    collection_mint: Pubkey,
    cluster: Cluster,
    mint: Keypair,
    create_sent: AtomicBool,
    created: AtomicBool,
}

impl<M: CollectionMinter> MintAndVerify<M> {
    pub fn new(minter: M, item: CollectionItem, collection_mint: Pubkey, cluster: Cluster) -> Self {
        Self {
            minter,
            item,
            collection_mint,
            cluster,
            mint: Keypair::new(),
            create_sent: AtomicBool::new(false),
            created: AtomicBool::new(false),
        }
    }

    pub fn mint(&self) -> Pubkey {
        self.mint.pubkey()
    }

    /// The mint, once its create is known to have landed.
    pub fn minted(&self) -> Option<Pubkey> {
        self.created
            .load(Ordering::Acquire)
            .then(|| self.mint.pubkey())
    }

    pub fn minter(&self) -> &M {
        &self.minter
    }

    pub async fn run(&self) -> Result<Pubkey> {
        let mint = self.mint.pubkey();

        if !self.created.load(Ordering::Acquire) {
            if self.create_sent.load(Ordering::Acquire) && self.minter.mint_exists(&mint).await? {
                info!("NFT {} landed after its attempt ended, skipping create", mint);
            } else {
                self.create_sent.store(true, Ordering::Release);
                let result = self
                    .minter
                    .mint_item(&self.mint, &self.item, &self.collection_mint)
                    .await?;

                info!("NFT created: {}", result.mint);
                info!(
                    "{}",
                    explorer_url(&ExplorerTarget::Transaction(result.signature), &self.cluster)
                );
            }
            self.created.store(true, Ordering::Release);
        }

        self.minter.verify_item(&mint, &self.collection_mint).await?;

        Ok(mint)
    }
}
