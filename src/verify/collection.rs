use mpl_token_metadata::{
    accounts::MetadataDelegateRecord, hooked::MetadataDelegateRoleSeed, types::MetadataDelegateRole,
};
use solana_program::{instruction::Instruction, pubkey::Pubkey};

use super::*;

pub enum VerifyCollectionArgs<'a, P1: ToPubkey, P2: ToPubkey> {
    V1 {
        authority: &'a Keypair,
        mint: P1,
        collection_mint: P2,
        is_delegate: bool,
    },
}

pub async fn verify_collection<P1, P2>(
    client: &RpcClient,
    args: VerifyCollectionArgs<'_, P1, P2>,
) -> Result<Signature>
where
    P1: ToPubkey,
    P2: ToPubkey,
{
    match args {
        VerifyCollectionArgs::V1 { .. } => verify_collection_v1(client, args).await,
    }
}

pub async fn verify_collection_ix<P1, P2>(
    client: &RpcClient,
    args: VerifyCollectionArgs<'_, P1, P2>,
) -> Result<Instruction>
where
    P1: ToPubkey,
    P2: ToPubkey,
{
    match args {
        VerifyCollectionArgs::V1 { .. } => verify_collection_v1_ix(client, args).await,
    }
}

async fn verify_collection_v1<P1, P2>(
    client: &RpcClient,
    args: VerifyCollectionArgs<'_, P1, P2>,
) -> Result<Signature>
where
    P1: ToPubkey,
    P2: ToPubkey,
{
    let VerifyCollectionArgs::V1 { authority, .. } = args;

    let verify_ix = verify_collection_v1_ix(client, args).await?;

    send_and_confirm_tx_with_retries(client, &[authority], &[verify_ix]).await
}

async fn verify_collection_v1_ix<P1, P2>(
    client: &RpcClient,
    args: VerifyCollectionArgs<'_, P1, P2>,
) -> Result<Instruction>
where
    P1: ToPubkey,
    P2: ToPubkey,
{
    let VerifyCollectionArgs::V1 {
        authority,
        mint,
        collection_mint,
        is_delegate,
    } = args;

    let mint = mint.to_pubkey()?;
    let collection_mint = collection_mint.to_pubkey()?;

    // The delegate record is keyed by the item's update authority, so only a
    // delegated verify needs the on-chain metadata.
    let delegate_record = if is_delegate {
        let md = Asset::new(mint).get_metadata(client).await?;
        Some(collection_delegate_record(
            &collection_mint,
            &md.update_authority,
            &authority.pubkey(),
        ))
    } else {
        None
    };

    Ok(build_verify_collection_ix(
        &authority.pubkey(),
        &mint,
        &collection_mint,
        delegate_record,
    ))
}

pub fn collection_delegate_record(
    collection_mint: &Pubkey,
    update_authority: &Pubkey,
    delegate: &Pubkey,
) -> Pubkey {
    MetadataDelegateRecord::find_pda(
        collection_mint,
        MetadataDelegateRoleSeed::from(MetadataDelegateRole::Collection),
        update_authority,
        delegate,
    )
    .0
}

fn build_verify_collection_ix(
    authority: &Pubkey,
    mint: &Pubkey,
    collection_mint: &Pubkey,
    delegate_record: Option<Pubkey>,
) -> Instruction {
    let asset = Asset::new(*mint);
    let mut collection_asset = Asset::new(*collection_mint);
    collection_asset.add_edition();

    let mut verify_builder = VerifyCollectionV1Builder::new();
    verify_builder
        .authority(*authority)
        .metadata(asset.metadata)
        .collection_mint(*collection_mint)
        .collection_metadata(Some(collection_asset.metadata))
        .collection_master_edition(collection_asset.edition)
        .delegate_record(delegate_record);

    verify_builder.instruction()
}
