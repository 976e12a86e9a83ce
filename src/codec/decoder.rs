use std::io::Read;

use super::{Number, Unmarshal};
use crate::{Error, Result};

/// Reads the canonical Graphene binary encoding from any `Read` source.
pub struct Decoder<R: Read> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn decode_uvarint(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.decode_u8()?;
            if shift == 63 && byte > 1 {
                return Err(Error::InvalidData(String::from("uvarint overflows u64")));
            }
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(Error::InvalidData(String::from("uvarint overflows u64")));
            }
        }
    }

    pub fn decode_varint(&mut self) -> Result<i64> {
        let raw = self.decode_uvarint()?;
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    pub fn decode_number<N: Number>(&mut self) -> Result<N> {
        let mut bytes = N::Bytes::default();
        self.reader.read_exact(bytes.as_mut())?;
        Ok(N::from_le(bytes))
    }

    pub fn decode_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.reader.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    pub fn decode_bool(&mut self) -> Result<bool> {
        match self.decode_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidData(format!("invalid bool byte {}", other))),
        }
    }

    pub fn decode_string(&mut self) -> Result<String> {
        let len = self.decode_uvarint()?;
        let bytes = self.decode_bytes(len)?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
    }

    /// Reads exactly `len` raw bytes without trusting `len` for allocation.
    pub fn decode_bytes(&mut self, len: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.reader).take(len).read_to_end(&mut buf)?;
        if (buf.len() as u64) != len {
            return Err(Error::InvalidData(format!(
                "expected {} bytes, input ended after {}",
                len,
                buf.len()
            )));
        }
        Ok(buf)
    }

    pub fn decode_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn decode<T: Unmarshal>(&mut self) -> Result<T> {
        T::unmarshal(self)
    }

    /// True once the source has nothing left to read.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        let mut probe = [0u8; 1];
        Ok(self.reader.read(&mut probe)? == 0)
    }
}
