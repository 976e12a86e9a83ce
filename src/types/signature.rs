use std::convert::TryInto;
use std::fmt;
use std::io::{Read, Write};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::crypto::{is_canonical, recover_compact, GrapheneHash};
use crate::types::PublicKey;
use crate::{Error, Result};

/// Compact recoverable signature: recovery byte, R, S.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let array: [u8; 65] = bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidSignature(format!("expected 65 bytes, got {}", bytes.len()))
        })?;
        Ok(Signature(array))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0[..])
    }

    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.0)
    }

    pub fn recover(&self, digest: &GrapheneHash) -> Result<PublicKey> {
        Ok(PublicKey::from(recover_compact(digest, &self.0)?))
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature([0u8; 65])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl Marshal for Signature {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bytes(&self.0)
    }
}

impl Unmarshal for Signature {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(Signature(dec.decode_array::<65>()?))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_hex_test() {
        let mut bytes = [0x22u8; 65];
        bytes[0] = 0x1f;
        let signature = Signature(bytes);
        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json.len(), 132);
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), signature);
        assert!(signature.is_canonical());
        assert!(Signature::from_hex("1f22").is_err());
    }
}
