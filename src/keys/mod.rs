//! Named public keys persisted between runs as a flat JSON object.

use std::{collections::BTreeMap, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

pub mod errors;
pub use errors::KeyStoreError;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyStore {
    keys: BTreeMap<String, String>,
}

impl KeyStore {
    /// A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KeyStoreError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no key store at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| KeyStoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| KeyStoreError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn get(&self, name: &str) -> Result<Option<Pubkey>, KeyStoreError> {
        self.keys
            .get(name)
            .map(|value| {
                Pubkey::from_str(value).map_err(|_| KeyStoreError::InvalidPubkey {
                    name: name.to_string(),
                    value: value.clone(),
                })
            })
            .transpose()
    }

    pub fn insert(&mut self, name: &str, pubkey: &Pubkey) {
        self.keys.insert(name.to_string(), pubkey.to_string());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), KeyStoreError> {
        let path = path.as_ref();
        let io_err = |source| KeyStoreError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|source| KeyStoreError::Json {
            path: path.display().to_string(),
            source,
        })?;

        fs::write(path, contents).map_err(io_err)
    }

    /// Load, set `name`, and write the store back.
    pub fn save_key<P: AsRef<Path>>(
        path: P,
        name: &str,
        pubkey: &Pubkey,
    ) -> Result<(), KeyStoreError> {
        let path = path.as_ref();
        let mut store = Self::load(path)?;
        store.insert(name, pubkey);
        store.save(path)
    }
}
