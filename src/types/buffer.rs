use std::convert::TryInto;
use std::fmt;
use std::io::{Read, Write};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::{Error, Result};

/// Variable-length bytes: uvarint length then the bytes, hex in JSON.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buffer(pub Vec<u8>);

impl Buffer {
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Buffer(hex::decode(s)?))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer(bytes)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Buffer(bytes.to_vec())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer({})", self.to_hex())
    }
}

impl Marshal for Buffer {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_uvarint(self.0.len() as u64)?;
        enc.encode_bytes(&self.0)
    }
}

impl Unmarshal for Buffer {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let len = dec.decode_uvarint()?;
        Ok(Buffer(dec.decode_bytes(len)?))
    }
}

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Buffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Buffer::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Fixed-length bytes written raw, hex in JSON. Used for commitments,
/// blinding factors and block ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let array: [u8; N] = bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidData(format!("expected {} bytes, got {}", N, bytes.len()))
        })?;
        Ok(FixedBytes(array))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        FixedBytes([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBytes({})", self.to_hex())
    }
}

impl<const N: usize> Marshal for FixedBytes<N> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bytes(&self.0)
    }
}

impl<const N: usize> Unmarshal for FixedBytes<N> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(FixedBytes(dec.decode_array::<N>()?))
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FixedBytes::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use proptest::prelude::*;

    #[test]
    fn buffer_test() {
        let buffer = Buffer(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(to_bytes(&buffer).unwrap(), vec![4, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(serde_json::to_string(&buffer).unwrap(), "\"deadbeef\"");
        assert_eq!(
            serde_json::from_str::<Buffer>("\"deadbeef\"").unwrap(),
            buffer
        );
        assert!(from_bytes::<Buffer>(&[5, 1, 2]).is_err());
        assert_eq!(to_bytes(&Buffer::default()).unwrap(), vec![0]);
    }

    #[test]
    fn fixed_bytes_test() {
        let block_id = FixedBytes::<4>([1, 2, 3, 4]);
        assert_eq!(to_bytes(&block_id).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(FixedBytes::<4>::from_hex("01020304").unwrap(), block_id);
        assert!(FixedBytes::<4>::from_hex("010203").is_err());
        assert!(serde_json::from_str::<FixedBytes<4>>("\"0102\"").is_err());
        assert_eq!(FixedBytes::<33>::default().0, [0u8; 33]);
    }

    proptest! {
        #[test]
        fn buffer_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = to_bytes(&Buffer(bytes.clone())).unwrap();
            prop_assert_eq!(from_bytes::<Buffer>(&encoded).unwrap(), Buffer(bytes));
        }

        #[test]
        fn fixed_bytes_round_trip(bytes in any::<[u8; 32]>()) {
            let encoded = to_bytes(&FixedBytes(bytes)).unwrap();
            prop_assert_eq!(encoded.len(), 32);
            prop_assert_eq!(from_bytes::<FixedBytes<32>>(&encoded).unwrap(), FixedBytes(bytes));
        }
    }
}
