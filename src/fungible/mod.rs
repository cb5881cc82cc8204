use anyhow::Result;
use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signer::keypair::Keypair, signer::Signer, system_instruction::create_account};
use spl_token::{instruction::initialize_mint2, ID as TOKEN_PROGRAM_ID};
use tracing::{debug, error};

use crate::constants::MINT_LAYOUT_SIZE;
use crate::convert::convert_token_config;
use crate::data::{MintResult, TokenConfig};
use crate::derive::derive_metadata_pda;
use crate::transaction::send_and_confirm_tx;

pub enum CreateFungibleArgs<'a> {
    V1 {
        payer: &'a Keypair,
        mint: &'a Keypair,
        config: &'a TokenConfig,
    },
}

/// Create the mint account, initialize it and attach token metadata in a single
/// transaction. The payer is mint, freeze and update authority.
pub async fn create_fungible_token(
    client: &RpcClient,
    args: CreateFungibleArgs<'_>,
) -> Result<MintResult> {
    match args {
        CreateFungibleArgs::V1 { .. } => create_fungible_token_v1(client, args).await,
    }
}

async fn create_fungible_token_v1(
    client: &RpcClient,
    args: CreateFungibleArgs<'_>,
) -> Result<MintResult> {
    let CreateFungibleArgs::V1 {
        payer,
        mint,
        config,
    } = args;

    let data = convert_token_config(config)?;

    // Allocate memory for the account
    let min_rent = client
        .get_minimum_balance_for_rent_exemption(MINT_LAYOUT_SIZE as usize)
        .await?;

    let create_mint_account_ix = create_account(
        &payer.pubkey(),
        &mint.pubkey(),
        min_rent,
        MINT_LAYOUT_SIZE,
        &TOKEN_PROGRAM_ID,
    );

    let init_mint_ix = initialize_mint2(
        &TOKEN_PROGRAM_ID,
        &mint.pubkey(),
        &payer.pubkey(),
        Some(&payer.pubkey()),
        config.decimals,
    )?;

    let metadata_account = derive_metadata_pda(&mint.pubkey());
    debug!("Metadata address: {}", metadata_account);

    let create_metadata_ix = CreateMetadataAccountV3Builder::new()
        .metadata(metadata_account)
        .mint(mint.pubkey())
        .mint_authority(payer.pubkey())
        .payer(payer.pubkey())
        .update_authority(payer.pubkey(), true)
        .data(data)
        .is_mutable(true)
        .instruction();

    let signature = send_and_confirm_tx(
        client,
        &[payer, mint],
        &[create_mint_account_ix, init_mint_ix, create_metadata_ix],
    )
    .await
    .map_err(|err| {
        error!("Failed to send transaction for {}", config.symbol);
        err
    })?;

    Ok(MintResult {
        signature,
        mint: mint.pubkey(),
    })
}
