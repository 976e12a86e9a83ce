use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use macros::{Marshal, TryFromByte};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Unmarshal};
use crate::types::{AccountId, Extensions, PublicKey};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromByte)]
pub enum VoteType {
    Committee = 0,
    Witness = 1,
    Worker = 2,
}

/// A vote target, `type:instance` in text and `instance << 8 | type` packed
/// into a little-endian u32 on the wire. Sets of votes sort by the packed
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoteId {
    vote_type: VoteType,
    instance: u32,
}

impl VoteId {
    pub const MAX_INSTANCE: u32 = (1 << 24) - 1;

    pub fn new(vote_type: VoteType, instance: u32) -> Result<Self> {
        if instance > Self::MAX_INSTANCE {
            return Err(Error::InvalidData(format!(
                "vote instance {} exceeds 24 bits",
                instance
            )));
        }
        Ok(VoteId {
            vote_type,
            instance,
        })
    }

    pub fn get_vote_type(&self) -> VoteType {
        self.vote_type
    }

    pub fn get_instance(&self) -> u32 {
        self.instance
    }

    pub fn packed(&self) -> u32 {
        self.instance << 8 | self.vote_type as u32
    }

    pub fn from_packed(packed: u32) -> Result<Self> {
        let vote_type = VoteType::try_from((packed & 0xff) as u8)?;
        VoteId::new(vote_type, packed >> 8)
    }
}

impl Ord for VoteId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.packed().cmp(&other.packed())
    }
}

impl PartialOrd for VoteId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vote_type as u8, self.instance)
    }
}

impl FromStr for VoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("malformed vote id {:?}", s));
        let (vote_type, instance) = s.split_once(':').ok_or_else(invalid)?;
        let vote_type = vote_type.parse::<u8>().map_err(|_| invalid())?;
        let instance = instance.parse::<u32>().map_err(|_| invalid())?;
        VoteId::new(VoteType::try_from(vote_type)?, instance)
    }
}

impl crate::codec::Marshal for VoteId {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_number(self.packed())
    }
}

impl Unmarshal for VoteId {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        VoteId::from_packed(dec.decode_number::<u32>()?)
    }
}

impl Serialize for VoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AccountOptions {
    pub memo_key: PublicKey,
    pub voting_account: AccountId,
    pub num_witness: u16,
    pub num_committee: u16,
    pub votes: BTreeSet<VoteId>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl AccountOptions {
    /// Options with no votes, proxying to `1.2.5` (the proxy-to-self account).
    pub fn new(memo_key: PublicKey) -> Self {
        AccountOptions {
            memo_key,
            voting_account: AccountId::new(5),
            num_witness: 0,
            num_committee: 0,
            votes: BTreeSet::new(),
            extensions: Extensions::new(),
        }
    }
}
