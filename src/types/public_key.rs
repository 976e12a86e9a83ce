use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::str::FromStr;

use base58::{FromBase58, ToBase58};
use secp256k1::SECP256K1;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::config;
use crate::crypto::{ripemd160, sha512};
use crate::{Error, Result};

fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = ripemd160(payload);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Strips the first registered prefix from `s` and base58-decodes the rest,
/// verifying the trailing 4-byte RIPEMD-160 checksum.
fn decode_prefixed(s: &str, payload_len: usize) -> Result<Vec<u8>> {
    let body = config::prefixes()
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix.as_str()))
        .ok_or_else(|| Error::InvalidKey(format!("{:?} has no known prefix", s)))?;
    let bytes = body
        .from_base58()
        .map_err(|e| Error::InvalidKey(format!("{:?}: base58 {:?}", s, e)))?;
    if bytes.len() != payload_len + 4 {
        return Err(Error::InvalidKey(format!(
            "{:?}: expected {} bytes, got {}",
            s,
            payload_len + 4,
            bytes.len()
        )));
    }
    let (payload, check) = bytes.split_at(payload_len);
    if checksum(payload) != check {
        return Err(Error::InvalidKey(format!("{:?}: checksum mismatch", s)));
    }
    Ok(payload.to_vec())
}

fn encode_prefixed(prefix: &str, payload: &[u8]) -> String {
    let mut bytes = payload.to_vec();
    bytes.extend_from_slice(&checksum(payload));
    format!("{}{}", prefix, bytes.to_base58())
}

/// A secp256k1 public key, 33 bytes compressed on the wire.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(PublicKey(secp256k1::PublicKey::from_slice(bytes)?))
    }

    pub fn from_secret_key(secret_key: &secp256k1::SecretKey) -> Self {
        PublicKey(secp256k1::PublicKey::from_secret_key(SECP256K1, secret_key))
    }

    pub fn serialize(&self) -> [u8; 33] {
        self.0.serialize()
    }

    pub fn get_inner(&self) -> &secp256k1::PublicKey {
        &self.0
    }

    pub fn to_string_with_prefix(&self, prefix: &str) -> String {
        encode_prefixed(prefix, &self.serialize())
    }

    pub fn to_address(&self) -> Address {
        Address::from_public_key(self)
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(key: secp256k1::PublicKey) -> Self {
        PublicKey(key)
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialize().cmp(&other.serialize())
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialize().hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_prefix(&config::current_prefix()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let payload = decode_prefixed(s, 33)?;
        PublicKey::from_slice(&payload)
    }
}

impl Marshal for PublicKey {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bytes(&self.serialize())
    }
}

impl Unmarshal for PublicKey {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        PublicKey::from_slice(&dec.decode_array::<33>()?)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// RIPEMD-160 of the SHA-512 of a compressed public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_public_key(key: &PublicKey) -> Self {
        Address(ripemd160(&sha512(&key.serialize())))
    }

    pub fn get_data(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_string_with_prefix(&self, prefix: &str) -> String {
        encode_prefixed(prefix, &self.0)
    }
}

impl From<[u8; 20]> for Address {
    fn from(data: [u8; 20]) -> Self {
        Address(data)
    }
}

// Authorities order addresses by their string form; the prefix is shared by
// every entry so only the base58 body decides.
impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string_with_prefix("")
            .cmp(&other.to_string_with_prefix(""))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_prefix(&config::current_prefix()))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let payload = decode_prefixed(s, 20)?;
        let mut data = [0u8; 20];
        data.copy_from_slice(&payload);
        Ok(Address(data))
    }
}

impl Marshal for Address {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bytes(&self.0)
    }
}

impl Unmarshal for Address {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(Address(dec.decode_array::<20>()?))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
