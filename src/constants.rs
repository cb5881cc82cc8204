use solana_program::{pubkey, pubkey::Pubkey};

pub const METAPLEX_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

// Size of an spl-token `Mint` account.
pub const MINT_LAYOUT_SIZE: u64 = 82;

pub const METADATA_PREFIX: &str = "metadata";
pub const EDITION_PREFIX: &str = "edition";

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// Key store entry written after each fungible mint is created.
pub const TOKEN_MINT_KEY: &str = "tokenMint";

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5_000;
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 60_000;

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_SYMBOL_LENGTH: usize = 10;
