use std::convert::TryFrom;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use macros::TryFromByte;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::{Error, Result};

/// Largest instance number an object id can carry.
pub const MAX_INSTANCE: u64 = (1 << 48) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromByte)]
pub enum SpaceType {
    Relative = 0,
    Protocol = 1,
    Implementation = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromByte)]
pub enum ProtocolObjectType {
    Null = 0,
    Base = 1,
    Account = 2,
    Asset = 3,
    ForceSettlement = 4,
    CommitteeMember = 5,
    Witness = 6,
    LimitOrder = 7,
    CallOrder = 8,
    Custom = 9,
    Proposal = 10,
    OperationHistory = 11,
    WithdrawPermission = 12,
    VestingBalance = 13,
    Worker = 14,
    Balance = 15,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromByte)]
pub enum ImplementationObjectType {
    GlobalProperty = 0,
    DynamicGlobalProperty = 1,
    Reserved = 2,
    AssetDynamicData = 3,
    AssetBitassetData = 4,
    AccountBalance = 5,
    AccountStatistics = 6,
    Transaction = 7,
    BlockSummary = 8,
    AccountTransactionHistory = 9,
    BlindedBalance = 10,
    ChainProperty = 11,
    WitnessSchedule = 12,
    BudgetRecord = 13,
    SpecialAuthority = 14,
    Buyback = 15,
    FbaAccumulator = 16,
    CollateralBid = 17,
}

fn check_instance(instance: u64) -> Result<u64> {
    if instance > MAX_INSTANCE {
        return Err(Error::InvalidData(format!(
            "object instance {} exceeds 48 bits",
            instance
        )));
    }
    Ok(instance)
}

fn parse_triple(s: &str) -> Result<(u8, u8, u64)> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::InvalidData(format!("malformed object id {:?}", s)));
    }
    let invalid = |_| Error::InvalidData(format!("malformed object id {:?}", s));
    let space = parts[0].parse::<u8>().map_err(invalid)?;
    let type_id = parts[1].parse::<u8>().map_err(invalid)?;
    let instance = parts[2].parse::<u64>().map_err(invalid)?;
    Ok((space, type_id, check_instance(instance)?))
}

/// An object id of any type, packed as `space << 56 | type << 48 | instance`.
///
/// Used where the protocol stores an id without fixing its type, such as
/// the order id of a `fill_order` virtual operation. On the wire it is the
/// packed 64-bit value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GrapheneId(u64);

impl GrapheneId {
    pub fn new(space: u8, type_id: u8, instance: u64) -> Result<Self> {
        let instance = check_instance(instance)?;
        Ok(GrapheneId(
            (space as u64) << 56 | (type_id as u64) << 48 | instance,
        ))
    }

    pub fn from_packed(packed: u64) -> Self {
        GrapheneId(packed)
    }

    pub fn packed(&self) -> u64 {
        self.0
    }

    pub fn space(&self) -> u8 {
        (self.0 >> 56) as u8
    }

    pub fn type_id(&self) -> u8 {
        (self.0 >> 48) as u8
    }

    pub fn instance(&self) -> u64 {
        self.0 & MAX_INSTANCE
    }

    pub fn space_type(&self) -> Result<SpaceType> {
        SpaceType::try_from(self.space())
    }

    pub fn protocol_type(&self) -> Result<ProtocolObjectType> {
        match self.space_type()? {
            SpaceType::Protocol => ProtocolObjectType::try_from(self.type_id()),
            other => Err(Error::InvalidData(format!(
                "{} is in the {:?} space",
                self, other
            ))),
        }
    }

    pub fn implementation_type(&self) -> Result<ImplementationObjectType> {
        match self.space_type()? {
            SpaceType::Implementation => ImplementationObjectType::try_from(self.type_id()),
            other => Err(Error::InvalidData(format!(
                "{} is in the {:?} space",
                self, other
            ))),
        }
    }
}

impl fmt::Display for GrapheneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space(), self.type_id(), self.instance())
    }
}

impl FromStr for GrapheneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (space, type_id, instance) = parse_triple(s)?;
        GrapheneId::new(space, type_id, instance)
    }
}

impl Marshal for GrapheneId {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_number(self.0)
    }
}

impl Unmarshal for GrapheneId {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(GrapheneId(dec.decode_number::<u64>()?))
    }
}

impl Serialize for GrapheneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GrapheneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// An object id whose space and type are fixed by the type itself.
///
/// Only the instance is stored, and only the instance goes on the wire
/// (as a uvarint). The textual form is always `space.type.instance`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId<const SPACE: u8, const TYPE: u8> {
    instance: u64,
}

impl<const SPACE: u8, const TYPE: u8> ObjectId<SPACE, TYPE> {
    /// Panics when `instance` does not fit in 48 bits; use `from_instance`
    /// for untrusted input.
    pub fn new(instance: u64) -> Self {
        assert!(
            instance <= MAX_INSTANCE,
            "object instance {} exceeds 48 bits",
            instance
        );
        ObjectId { instance }
    }

    pub fn from_instance(instance: u64) -> Result<Self> {
        Ok(ObjectId {
            instance: check_instance(instance)?,
        })
    }

    pub fn get_instance(&self) -> u64 {
        self.instance
    }

    pub fn to_graphene_id(&self) -> GrapheneId {
        GrapheneId((SPACE as u64) << 56 | (TYPE as u64) << 48 | self.instance)
    }
}

impl<const SPACE: u8, const TYPE: u8> TryFrom<GrapheneId> for ObjectId<SPACE, TYPE> {
    type Error = Error;

    fn try_from(id: GrapheneId) -> Result<Self> {
        if id.space() != SPACE || id.type_id() != TYPE {
            return Err(Error::InvalidData(format!(
                "expected a {}.{}.x id, got {}",
                SPACE, TYPE, id
            )));
        }
        Ok(ObjectId {
            instance: id.instance(),
        })
    }
}

impl<const SPACE: u8, const TYPE: u8> From<ObjectId<SPACE, TYPE>> for GrapheneId {
    fn from(id: ObjectId<SPACE, TYPE>) -> Self {
        id.to_graphene_id()
    }
}

impl<const SPACE: u8, const TYPE: u8> fmt::Display for ObjectId<SPACE, TYPE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", SPACE, TYPE, self.instance)
    }
}

impl<const SPACE: u8, const TYPE: u8> fmt::Debug for ObjectId<SPACE, TYPE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

impl<const SPACE: u8, const TYPE: u8> FromStr for ObjectId<SPACE, TYPE> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (space, type_id, instance) = parse_triple(s)?;
        if space != SPACE || type_id != TYPE {
            return Err(Error::InvalidData(format!(
                "expected a {}.{}.x id, got {:?}",
                SPACE, TYPE, s
            )));
        }
        Ok(ObjectId { instance })
    }
}

impl<const SPACE: u8, const TYPE: u8> Marshal for ObjectId<SPACE, TYPE> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_uvarint(self.instance)
    }
}

impl<const SPACE: u8, const TYPE: u8> Unmarshal for ObjectId<SPACE, TYPE> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        ObjectId::from_instance(dec.decode_uvarint()?)
    }
}

impl<const SPACE: u8, const TYPE: u8> Serialize for ObjectId<SPACE, TYPE> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const SPACE: u8, const TYPE: u8> Deserialize<'de> for ObjectId<SPACE, TYPE> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

pub type AccountId = ObjectId<1, 2>;
pub type AssetId = ObjectId<1, 3>;
pub type ForceSettlementId = ObjectId<1, 4>;
pub type CommitteeMemberId = ObjectId<1, 5>;
pub type WitnessId = ObjectId<1, 6>;
pub type LimitOrderId = ObjectId<1, 7>;
pub type CallOrderId = ObjectId<1, 8>;
pub type ProposalId = ObjectId<1, 10>;
pub type OperationHistoryId = ObjectId<1, 11>;
pub type WithdrawPermissionId = ObjectId<1, 12>;
pub type VestingBalanceId = ObjectId<1, 13>;
pub type WorkerId = ObjectId<1, 14>;
pub type BalanceId = ObjectId<1, 15>;
pub type FbaAccumulatorId = ObjectId<2, 16>;
