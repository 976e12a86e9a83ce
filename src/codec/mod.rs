/*!
# Canonical Binary Codec

Graphene nodes hash and verify the exact bytes produced by their C++
serializer, so every type in this crate is encoded through the two traits
defined here rather than through a general-purpose format.

```bytes
integers    fixed-width little-endian
bool        one byte, 1 or 0
string      uvarint length, raw UTF-8
Vec / set   uvarint count, elements back to back
map         uvarint count, (key, value) pairs in key order
Option      bool presence byte, value only when present
[u8; N]     raw bytes, no prefix
```

Structs derive `Marshal` from the `macros` crate; the derive writes fields
in declaration order, so a deriving struct's declaration order is its wire
order.
*/

pub mod decoder;
pub mod encoder;

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

pub use decoder::Decoder;
pub use encoder::Encoder;

use crate::{Error, Result};

/// Canonical binary encoding of a value.
pub trait Marshal {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()>;
}

/// Canonical binary decoding of a value.
pub trait Unmarshal: Sized {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self>;
}

/// Fixed-width numbers written in little-endian order.
pub trait Number: Copy {
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;
    fn to_le(self) -> Self::Bytes;
    fn from_le(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_number {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl Number for $ty {
                type Bytes = [u8; $len];
                fn to_le(self) -> Self::Bytes {
                    self.to_le_bytes()
                }
                fn from_le(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }

            impl Marshal for $ty {
                fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
                    enc.encode_number(*self)
                }
            }

            impl Unmarshal for $ty {
                fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
                    dec.decode_number::<$ty>()
                }
            }
        )*
    };
}

impl_number!(
    u8 => 1, u16 => 2, u32 => 4, u64 => 8,
    i8 => 1, i16 => 2, i32 => 4, i64 => 8,
    f32 => 4, f64 => 8,
);

/// Serializes a value into a fresh byte vector.
pub fn to_bytes<T: Marshal + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut enc = Encoder::new(Vec::new());
    value.marshal(&mut enc)?;
    Ok(enc.into_inner())
}

/// Decodes a value and requires every input byte to be consumed.
pub fn from_bytes<T: Unmarshal>(bytes: &[u8]) -> Result<T> {
    let mut dec = Decoder::new(bytes);
    let value = T::unmarshal(&mut dec)?;
    if !dec.is_exhausted()? {
        return Err(Error::InvalidData(String::from(
            "trailing bytes after decoded value",
        )));
    }
    Ok(value)
}

impl Marshal for bool {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bool(*self)
    }
}

impl Unmarshal for bool {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        dec.decode_bool()
    }
}

impl Marshal for str {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_string(self)
    }
}

impl Marshal for String {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_string(self)
    }
}

impl Unmarshal for String {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        dec.decode_string()
    }
}

impl<const N: usize> Marshal for [u8; N] {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_bytes(self)
    }
}

impl<const N: usize> Unmarshal for [u8; N] {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        dec.decode_array::<N>()
    }
}

impl<T: Marshal> Marshal for Option<T> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        match self {
            Some(value) => {
                enc.encode_bool(true)?;
                value.marshal(enc)
            }
            None => enc.encode_bool(false),
        }
    }
}

impl<T: Unmarshal> Unmarshal for Option<T> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        if dec.decode_bool()? {
            Ok(Some(T::unmarshal(dec)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_uvarint(self.len() as u64)?;
        for (i, item) in self.iter().enumerate() {
            item.marshal(enc)
                .map_err(|e| e.context(format!("encode element {}", i)))?;
        }
        Ok(())
    }
}

impl<T: Unmarshal> Unmarshal for Vec<T> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let count = dec.decode_uvarint()?;
        let mut items = Vec::new();
        for i in 0..count {
            items.push(
                T::unmarshal(dec).map_err(|e| e.context(format!("decode element {}", i)))?,
            );
        }
        Ok(items)
    }
}

impl<T: Marshal> Marshal for BTreeSet<T> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_uvarint(self.len() as u64)?;
        for item in self {
            item.marshal(enc)?;
        }
        Ok(())
    }
}

impl<T: Unmarshal + Ord> Unmarshal for BTreeSet<T> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let count = dec.decode_uvarint()?;
        let mut items = BTreeSet::new();
        for i in 0..count {
            let item = T::unmarshal(dec)?;
            if items.iter().next_back().map_or(false, |last| &item <= last) {
                return Err(Error::InvalidData(format!(
                    "set element {} is not in ascending order",
                    i
                )));
            }
            items.insert(item);
        }
        Ok(items)
    }
}

impl<K: Marshal, V: Marshal> Marshal for BTreeMap<K, V> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_uvarint(self.len() as u64)?;
        for (key, value) in self {
            key.marshal(enc)?;
            value.marshal(enc)?;
        }
        Ok(())
    }
}

impl<K: Unmarshal + Ord, V: Unmarshal> Unmarshal for BTreeMap<K, V> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let count = dec.decode_uvarint()?;
        let mut items = BTreeMap::new();
        for i in 0..count {
            let key = K::unmarshal(dec)?;
            let value = V::unmarshal(dec)?;
            if items.keys().next_back().map_or(false, |last| &key <= last) {
                return Err(Error::InvalidData(format!(
                    "map key {} is not in ascending order",
                    i
                )));
            }
            items.insert(key, value);
        }
        Ok(items)
    }
}

impl<A: Marshal, B: Marshal> Marshal for (A, B) {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        self.0.marshal(enc)?;
        self.1.marshal(enc)
    }
}

impl<A: Unmarshal, B: Unmarshal> Unmarshal for (A, B) {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok((A::unmarshal(dec)?, B::unmarshal(dec)?))
    }
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        (**self).marshal(enc)
    }
}

impl<T: Marshal + ?Sized> Marshal for Box<T> {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        (**self).marshal(enc)
    }
}

impl<T: Unmarshal> Unmarshal for Box<T> {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(Box::new(T::unmarshal(dec)?))
    }
}
