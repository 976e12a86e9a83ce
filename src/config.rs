//! Known Graphene networks and the process-wide "current" selection.
//!
//! The current selection only feeds `Display`/`FromStr` of keys and
//! addresses. Everything that hashes or signs takes a `&ChainConfig`
//! explicitly; `current()` is the convenience path for callers that selected
//! a network once after connecting.
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const BITSHARES_CHAIN_ID: &str =
    "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8";
pub const TESTNET_CHAIN_ID: &str =
    "39f5e2ede1f8bc1a3a54a7914414e3779e33193f1f5693510e73cb7a87617447";

/// Prefix used for key and address strings while no network is selected.
pub const DEFAULT_PREFIX: &str = "BTS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub core_asset: String,
    pub prefix: String,
    pub id: String,
}

impl ChainConfig {
    pub fn new(name: &str, core_asset: &str, prefix: &str, id: &str) -> Self {
        ChainConfig {
            name: name.to_string(),
            core_asset: core_asset.to_string(),
            prefix: prefix.to_string(),
            id: id.to_lowercase(),
        }
    }

    /// The raw 32 chain id bytes that prefix every signing digest.
    pub fn chain_id_bytes(&self) -> Result<[u8; 32]> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&self.id, &mut bytes)
            .map_err(|e| Error::InvalidData(format!("chain id {}: {}", self.id, e)))?;
        Ok(bytes)
    }
}

fn known_networks() -> Vec<ChainConfig> {
    vec![
        ChainConfig::new("BitShares", "BTS", "BTS", BITSHARES_CHAIN_ID),
        ChainConfig::new("TestNet", "TEST", "TEST", TESTNET_CHAIN_ID),
    ]
}

lazy_static! {
    static ref NETWORKS: RwLock<Vec<ChainConfig>> = RwLock::new(known_networks());
    static ref CURRENT: RwLock<Option<ChainConfig>> = RwLock::new(None);
}

/// Adds a network to the table, replacing any entry with the same chain id.
pub fn register(config: ChainConfig) {
    let mut networks = NETWORKS.write().unwrap_or_else(|e| e.into_inner());
    networks.retain(|known| known.id != config.id);
    networks.push(config);
}

pub fn lookup(chain_id: &str) -> Option<ChainConfig> {
    let chain_id = chain_id.to_lowercase();
    let networks = NETWORKS.read().unwrap_or_else(|e| e.into_inner());
    networks.iter().find(|known| known.id == chain_id).cloned()
}

pub fn lookup_by_name(name: &str) -> Option<ChainConfig> {
    let networks = NETWORKS.read().unwrap_or_else(|e| e.into_inner());
    networks
        .iter()
        .find(|known| known.name.eq_ignore_ascii_case(name) || known.prefix == name)
        .cloned()
}

/// Every registered prefix, longest first so `TEST` wins over `TE`.
pub fn prefixes() -> Vec<String> {
    let networks = NETWORKS.read().unwrap_or_else(|e| e.into_inner());
    let mut prefixes: Vec<String> = networks.iter().map(|n| n.prefix.clone()).collect();
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    prefixes.dedup();
    prefixes
}

/// Selects the network with the given chain id as current.
pub fn set_current(chain_id: &str) -> Result<ChainConfig> {
    let config = lookup(chain_id).ok_or_else(|| Error::UnknownChainId(chain_id.to_string()))?;
    set_current_config(config.clone());
    Ok(config)
}

pub fn set_current_config(config: ChainConfig) {
    log::info!("selecting chain {} ({})", config.name, config.id);
    let mut current = CURRENT.write().unwrap_or_else(|e| e.into_inner());
    *current = Some(config);
}

pub fn clear_current() {
    let mut current = CURRENT.write().unwrap_or_else(|e| e.into_inner());
    *current = None;
}

pub fn current() -> Result<ChainConfig> {
    let current = CURRENT.read().unwrap_or_else(|e| e.into_inner());
    current.clone().ok_or(Error::ChainConfigNotSet)
}

pub fn current_prefix() -> String {
    let current = CURRENT.read().unwrap_or_else(|e| e.into_inner());
    current
        .as_ref()
        .map(|config| config.prefix.clone())
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn lookup_known_network_test() {
        let bts = lookup(BITSHARES_CHAIN_ID).unwrap();
        assert_eq!(bts.prefix, "BTS");
        assert_eq!(bts.core_asset, "BTS");
        assert_eq!(lookup_by_name("testnet").unwrap().id, TESTNET_CHAIN_ID);
        assert!(lookup("00").is_none());
    }

    #[test]
    fn chain_id_bytes_test() {
        let bts = lookup(BITSHARES_CHAIN_ID).unwrap();
        let bytes = bts.chain_id_bytes().unwrap();
        assert_eq!(bytes[0], 0x40);
        assert_eq!(bytes[31], 0xc8);

        let broken = ChainConfig::new("x", "X", "X", "abcd");
        assert!(broken.chain_id_bytes().is_err());
    }

    #[test]
    #[serial]
    fn current_selection_test() {
        clear_current();
        assert!(matches!(current(), Err(Error::ChainConfigNotSet)));
        assert_eq!(current_prefix(), DEFAULT_PREFIX);

        assert!(matches!(set_current("ff"), Err(Error::UnknownChainId(_))));

        let selected = set_current(&BITSHARES_CHAIN_ID.to_uppercase()).unwrap();
        assert_eq!(selected.name, "BitShares");
        assert_eq!(current().unwrap(), selected);
        clear_current();
    }

    #[test]
    #[serial]
    fn register_network_test() {
        let id = "1111111111111111111111111111111111111111111111111111111111111111";
        register(ChainConfig::new("Private", "CORE", "GPHX", id));
        assert_eq!(lookup(id).unwrap().core_asset, "CORE");
        assert_eq!(prefixes()[0], "GPHX");

        register(ChainConfig::new("Private", "CORE2", "GPHX", id));
        assert_eq!(lookup(id).unwrap().core_asset, "CORE2");
    }
}
