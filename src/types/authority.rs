use std::collections::{BTreeMap, BTreeSet};

use macros::Marshal;
use serde::{Deserialize, Serialize};
use serde_with::rust::map_as_tuple_list;

use crate::types::{AccountId, Address, AssetId, PublicKey};

/// A weighted multi-signature threshold.
///
/// The three maps are ordered so the encoded form is canonical: accounts by
/// instance, keys by compressed bytes, addresses by string form. In JSON
/// each map is an array of `[key, weight]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    #[serde(with = "map_as_tuple_list")]
    pub account_auths: BTreeMap<AccountId, u16>,
    #[serde(with = "map_as_tuple_list")]
    pub key_auths: BTreeMap<PublicKey, u16>,
    #[serde(with = "map_as_tuple_list", default)]
    pub address_auths: BTreeMap<Address, u16>,
}

impl Authority {
    /// A threshold-1 authority satisfied by a single key.
    pub fn from_key(key: PublicKey) -> Self {
        let mut authority = Authority {
            weight_threshold: 1,
            ..Default::default()
        };
        authority.key_auths.insert(key, 1);
        authority
    }

    /// A threshold-1 authority satisfied by a single account.
    pub fn from_account(account: AccountId) -> Self {
        let mut authority = Authority {
            weight_threshold: 1,
            ..Default::default()
        };
        authority.account_auths.insert(account, 1);
        authority
    }

    pub fn add_key(&mut self, key: PublicKey, weight: u16) {
        self.key_auths.insert(key, weight);
    }

    pub fn add_account(&mut self, account: AccountId, weight: u16) {
        self.account_auths.insert(account, weight);
    }

    pub fn add_address(&mut self, address: Address, weight: u16) {
        self.address_auths.insert(address, weight);
    }

    /// Total weight reachable from all entries.
    pub fn total_weight(&self) -> u64 {
        self.account_auths
            .values()
            .chain(self.key_auths.values())
            .chain(self.address_auths.values())
            .map(|weight| *weight as u64)
            .sum()
    }

    /// True when the threshold can never be met.
    pub fn is_impossible(&self) -> bool {
        self.total_weight() < self.weight_threshold as u64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct NoSpecialAuthority {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct TopHoldersSpecialAuthority {
    pub asset: AssetId,
    pub num_top_holders: u8,
}

static_variant! {
    pub enum SpecialAuthority {
        0 => NoSpecial(NoSpecialAuthority),
        1 => TopHolders(TopHoldersSpecialAuthority),
    }
}

impl Default for SpecialAuthority {
    fn default() -> Self {
        SpecialAuthority::NoSpecial(NoSpecialAuthority {})
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct BuybackOptions {
    pub asset_to_buy: AssetId,
    pub asset_to_buy_issuer: AccountId,
    pub markets: BTreeSet<AssetId>,
}
