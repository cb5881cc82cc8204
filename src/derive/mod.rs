use mpl_token_metadata::ID as TOKEN_METADATA_PROGRAM_ID;
use solana_sdk::pubkey::Pubkey;
use std::convert::AsRef;

use crate::constants::{EDITION_PREFIX, METADATA_PREFIX};

pub fn derive_generic_pda(seeds: Vec<&[u8]>, program_id: Pubkey) -> Pubkey {
    let (pda, _) = Pubkey::find_program_address(&seeds, &program_id);
    pda
}

pub fn derive_metadata_pda(mint: &Pubkey) -> Pubkey {
    let seeds = vec![
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
    ];
    derive_generic_pda(seeds, TOKEN_METADATA_PROGRAM_ID)
}

pub fn derive_edition_pda(mint: &Pubkey) -> Pubkey {
    let seeds = vec![
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
        EDITION_PREFIX.as_bytes(),
    ];
    derive_generic_pda(seeds, TOKEN_METADATA_PROGRAM_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpl_token_metadata::accounts::{MasterEdition, Metadata};
    use std::str::FromStr;

    use crate::constants::METAPLEX_PROGRAM_ID;

    fn sample_mint() -> Pubkey {
        Pubkey::from_str("H9UJFx7HknQ9GUz7RBqqV9SRnht6XaVDh2cZS3Huogpf").unwrap()
    }

    #[test]
    fn generic_pda_matches_metadata_seeds() {
        let mint = sample_mint();
        let seeds = vec![
            "metadata".as_bytes(),
            METAPLEX_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ];

        let expected_pda =
            Pubkey::from_str("99pKPWsqi7bZaXKMvmwkxWV4nJjb5BS5SgKSNhW26ZNq").unwrap();

        assert_eq!(derive_generic_pda(seeds, METAPLEX_PROGRAM_ID), expected_pda);
    }

    #[test]
    fn metadata_pda_for_known_mint() {
        let expected_pda =
            Pubkey::from_str("99pKPWsqi7bZaXKMvmwkxWV4nJjb5BS5SgKSNhW26ZNq").unwrap();
        assert_eq!(derive_metadata_pda(&sample_mint()), expected_pda);
    }

    #[test]
    fn edition_pda_for_known_mint() {
        let expected_pda =
            Pubkey::from_str("2vNgLPdTtfZYMNBR14vL5WXp6jYAvumfHauEHNc1BQim").unwrap();
        assert_eq!(derive_edition_pda(&sample_mint()), expected_pda);
    }

    #[test]
    fn derivation_agrees_with_program_accounts() {
        let mint = Pubkey::new_unique();
        assert_eq!(derive_metadata_pda(&mint), Metadata::find_pda(&mint).0);
        assert_eq!(derive_edition_pda(&mint), MasterEdition::find_pda(&mint).0);
    }

    #[test]
    fn program_id_constant_matches_crate() {
        assert_eq!(METAPLEX_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID);
    }
}
