use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AccountCreateExtensions, AccountId, AccountOptions, AccountUpdateExtensions, AssetAmount,
    Authority, Extensions,
};

#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub registrar: AccountId,
    pub referrer: AccountId,
    pub referrer_percent: u16,
    pub name: String,
    pub owner: Authority,
    pub active: Authority,
    pub options: AccountOptions,
    #[serde(default)]
    pub extensions: AccountCreateExtensions,
}

/// Replaces any subset of an account's authorities and options.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_options: Option<AccountOptions>,
    #[serde(default)]
    pub extensions: AccountUpdateExtensions,
}

pub const NO_LISTING: u8 = 0;
pub const WHITE_LISTED: u8 = 1;
pub const BLACK_LISTED: u8 = 2;
pub const WHITE_AND_BLACK_LISTED: u8 = WHITE_LISTED | BLACK_LISTED;

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountWhitelistOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub authorizing_account: AccountId,
    pub account_to_list: AccountId,
    pub new_listing: u8,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountUpgradeOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub account_to_upgrade: AccountId,
    pub upgrade_to_lifetime_member: bool,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountTransferOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub account_id: AccountId,
    pub new_owner: AccountId,
    #[serde(default)]
    pub extensions: Extensions,
}
