use std::io::{Read, Write};
use std::mem::discriminant;

use macros::Marshal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::operations::OperationType;
use crate::types::{number_or_string, Extensions};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct EmptyFee {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct FlatFee {
    #[serde(deserialize_with = "number_or_string")]
    pub fee: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct PerKbyteFee {
    #[serde(deserialize_with = "number_or_string")]
    pub fee: u64,
    pub price_per_kbyte: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct PerOutputFee {
    #[serde(deserialize_with = "number_or_string")]
    pub fee: u64,
    pub price_per_output: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct AccountCreateFee {
    #[serde(deserialize_with = "number_or_string")]
    pub basic_fee: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub premium_fee: u64,
    pub price_per_kbyte: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct AccountUpgradeFee {
    #[serde(deserialize_with = "number_or_string")]
    pub membership_annual_fee: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub membership_lifetime_fee: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct AssetCreateFee {
    #[serde(deserialize_with = "number_or_string")]
    pub symbol3: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub symbol4: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub long_symbol: u64,
    pub price_per_kbyte: u32,
}

/// The fee parameters of one operation. Which shape applies is fixed by the
/// operation type; the shape itself carries no tag on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeeParameters {
    Empty(EmptyFee),
    Flat(FlatFee),
    PerKbyte(PerKbyteFee),
    PerOutput(PerOutputFee),
    AccountCreate(AccountCreateFee),
    AccountUpgrade(AccountUpgradeFee),
    AssetCreate(AssetCreateFee),
}

impl FeeParameters {
    /// Zeroed parameters of the shape `op` uses.
    pub fn default_for(op: OperationType) -> FeeParameters {
        use OperationType::*;
        match op {
            FillOrder | BalanceClaim | AssetSettleCancel | FbaDistribute | ExecuteBid => {
                FeeParameters::Empty(EmptyFee {})
            }
            Transfer | AccountUpdate | AssetUpdate | AssetIssue | ProposalCreate
            | ProposalUpdate | WithdrawPermissionClaim | Custom | OverrideTransfer => {
                FeeParameters::PerKbyte(PerKbyteFee::default())
            }
            TransferToBlind | BlindTransfer => FeeParameters::PerOutput(PerOutputFee::default()),
            AccountCreate => FeeParameters::AccountCreate(AccountCreateFee::default()),
            AccountUpgrade => FeeParameters::AccountUpgrade(AccountUpgradeFee::default()),
            AssetCreate => FeeParameters::AssetCreate(AssetCreateFee::default()),
            _ => FeeParameters::Flat(FlatFee::default()),
        }
    }

    pub fn fits(&self, op: OperationType) -> bool {
        discriminant(self) == discriminant(&FeeParameters::default_for(op))
    }

    fn unmarshal_for<R: Read>(op: OperationType, dec: &mut Decoder<R>) -> Result<FeeParameters> {
        Ok(match FeeParameters::default_for(op) {
            FeeParameters::Empty(_) => FeeParameters::Empty(EmptyFee::unmarshal(dec)?),
            FeeParameters::Flat(_) => FeeParameters::Flat(FlatFee::unmarshal(dec)?),
            FeeParameters::PerKbyte(_) => FeeParameters::PerKbyte(PerKbyteFee::unmarshal(dec)?),
            FeeParameters::PerOutput(_) => {
                FeeParameters::PerOutput(PerOutputFee::unmarshal(dec)?)
            }
            FeeParameters::AccountCreate(_) => {
                FeeParameters::AccountCreate(AccountCreateFee::unmarshal(dec)?)
            }
            FeeParameters::AccountUpgrade(_) => {
                FeeParameters::AccountUpgrade(AccountUpgradeFee::unmarshal(dec)?)
            }
            FeeParameters::AssetCreate(_) => {
                FeeParameters::AssetCreate(AssetCreateFee::unmarshal(dec)?)
            }
        })
    }

    fn from_json_for(
        op: OperationType,
        value: serde_json::Value,
    ) -> serde_json::Result<FeeParameters> {
        Ok(match FeeParameters::default_for(op) {
            FeeParameters::Empty(_) => FeeParameters::Empty(serde_json::from_value(value)?),
            FeeParameters::Flat(_) => FeeParameters::Flat(serde_json::from_value(value)?),
            FeeParameters::PerKbyte(_) => FeeParameters::PerKbyte(serde_json::from_value(value)?),
            FeeParameters::PerOutput(_) => {
                FeeParameters::PerOutput(serde_json::from_value(value)?)
            }
            FeeParameters::AccountCreate(_) => {
                FeeParameters::AccountCreate(serde_json::from_value(value)?)
            }
            FeeParameters::AccountUpgrade(_) => {
                FeeParameters::AccountUpgrade(serde_json::from_value(value)?)
            }
            FeeParameters::AssetCreate(_) => {
                FeeParameters::AssetCreate(serde_json::from_value(value)?)
            }
        })
    }
}

impl Marshal for FeeParameters {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        match self {
            FeeParameters::Empty(p) => p.marshal(enc),
            FeeParameters::Flat(p) => p.marshal(enc),
            FeeParameters::PerKbyte(p) => p.marshal(enc),
            FeeParameters::PerOutput(p) => p.marshal(enc),
            FeeParameters::AccountCreate(p) => p.marshal(enc),
            FeeParameters::AccountUpgrade(p) => p.marshal(enc),
            FeeParameters::AssetCreate(p) => p.marshal(enc),
        }
    }
}

/// Fee parameters for one operation type; `[op tag, {parameters}]` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeEntry {
    pub operation: OperationType,
    pub parameters: FeeParameters,
}

impl FeeEntry {
    pub fn new(operation: OperationType, parameters: FeeParameters) -> Result<FeeEntry> {
        if !parameters.fits(operation) {
            return Err(Error::InvalidData(format!(
                "fee parameters {:?} do not fit {:?}",
                parameters, operation
            )));
        }
        Ok(FeeEntry {
            operation,
            parameters,
        })
    }
}

impl Marshal for FeeEntry {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        if !self.parameters.fits(self.operation) {
            return Err(Error::InvalidData(format!(
                "fee parameters {:?} do not fit {:?}",
                self.parameters, self.operation
            )));
        }
        enc.encode_uvarint(self.operation as u64)?;
        self.parameters.marshal(enc)
    }
}

impl Unmarshal for FeeEntry {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let operation = OperationType::from_tag(dec.decode_uvarint()?)?;
        let parameters = FeeParameters::unmarshal_for(operation, dec)
            .map_err(|e| e.context(format!("decode fee parameters of {:?}", operation)))?;
        Ok(FeeEntry {
            operation,
            parameters,
        })
    }
}

impl Serialize for FeeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.operation as u64, &self.parameters).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeeEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (tag, value): (u64, serde_json::Value) = Deserialize::deserialize(deserializer)?;
        let operation = OperationType::from_tag(tag).map_err(de::Error::custom)?;
        let parameters =
            FeeParameters::from_json_for(operation, value).map_err(de::Error::custom)?;
        Ok(FeeEntry {
            operation,
            parameters,
        })
    }
}

/// Per-operation fees plus a global scale in hundredths of a percent.
///
/// Entries are written in operation tag order regardless of the order they
/// are held in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub parameters: Vec<FeeEntry>,
    pub scale: u32,
}

impl FeeSchedule {
    pub fn get_parameters(&self, op: OperationType) -> Option<&FeeParameters> {
        self.parameters
            .iter()
            .find(|entry| entry.operation == op)
            .map(|entry| &entry.parameters)
    }

    /// Inserts or replaces the entry for `entry.operation`.
    pub fn set_parameters(&mut self, entry: FeeEntry) {
        match self
            .parameters
            .iter_mut()
            .find(|existing| existing.operation == entry.operation)
        {
            Some(existing) => *existing = entry,
            None => self.parameters.push(entry),
        }
    }
}

impl Marshal for FeeSchedule {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        let mut sorted: Vec<&FeeEntry> = self.parameters.iter().collect();
        sorted.sort_by_key(|entry| entry.operation);
        if sorted
            .windows(2)
            .any(|pair| pair[0].operation == pair[1].operation)
        {
            return Err(Error::InvalidData(String::from(
                "fee schedule lists an operation twice",
            )));
        }
        enc.encode_uvarint(sorted.len() as u64)?;
        for entry in sorted {
            entry.marshal(enc)?;
        }
        enc.encode_number(self.scale)
    }
}

impl Unmarshal for FeeSchedule {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let parameters: Vec<FeeEntry> =
            Unmarshal::unmarshal(dec).map_err(|e| e.context("decode FeeSchedule.parameters"))?;
        let scale = dec
            .decode_number::<u32>()
            .map_err(|e| e.context("decode FeeSchedule.scale"))?;
        Ok(FeeSchedule { parameters, scale })
    }
}

/// Global chain parameters, as proposed by the committee.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct ChainParameters {
    pub current_fees: FeeSchedule,
    pub block_interval: u8,
    pub maintenance_interval: u32,
    pub maintenance_skip_slots: u8,
    pub committee_proposal_review_period: u32,
    pub maximum_transaction_size: u32,
    pub maximum_block_size: u32,
    pub maximum_time_until_expiration: u32,
    pub maximum_proposal_lifetime: u32,
    pub maximum_asset_whitelist_authorities: u8,
    pub maximum_asset_feed_publishers: u8,
    pub maximum_witness_count: u16,
    pub maximum_committee_count: u16,
    pub maximum_authority_membership: u16,
    pub reserve_percent_of_fee: u16,
    pub network_percent_of_fee: u16,
    pub lifetime_referrer_percent_of_fee: u16,
    pub cashback_vesting_period_seconds: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub cashback_vesting_threshold: i64,
    pub count_non_member_votes: bool,
    pub allow_non_member_whitelists: bool,
    #[serde(deserialize_with = "number_or_string")]
    pub witness_pay_per_block: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub worker_budget_per_day: i64,
    pub max_predicate_opcode: u16,
    #[serde(deserialize_with = "number_or_string")]
    pub fee_liquidation_threshold: i64,
    pub accounts_per_fee_scale: u16,
    pub account_fee_scale_bitshifts: u8,
    pub max_authority_depth: u8,
    #[serde(default)]
    pub extensions: Extensions,
}
