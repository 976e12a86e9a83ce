use std::io::Write;

use super::{Marshal, Number};
use crate::Result;

/// Writes the canonical Graphene binary encoding to any `Write` sink.
///
/// A failed write aborts the encode in progress; nothing is retried or
/// resumed, the caller rebuilds from scratch.
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// LEB128: 7 data bits per byte, high bit set on every byte but the last.
    pub fn encode_uvarint(&mut self, mut value: u64) -> Result<()> {
        let mut buf = [0u8; 10];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.encode_bytes(&buf[..len])
    }

    /// Zig-zag maps the sign into the low bit, then LEB128.
    pub fn encode_varint(&mut self, value: i64) -> Result<()> {
        self.encode_uvarint(((value << 1) ^ (value >> 63)) as u64)
    }

    /// Fixed-width little-endian.
    pub fn encode_number<N: Number>(&mut self, value: N) -> Result<()> {
        let bytes = value.to_le();
        self.encode_bytes(bytes.as_ref())
    }

    pub fn encode_bool(&mut self, value: bool) -> Result<()> {
        self.encode_bytes(&[value as u8])
    }

    /// Length prefix followed by the raw UTF-8 bytes, no terminator.
    pub fn encode_string(&mut self, value: &str) -> Result<()> {
        self.encode_uvarint(value.len() as u64)?;
        self.encode_bytes(value.as_bytes())
    }

    /// Raw passthrough.
    pub fn encode_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    pub fn encode<T: Marshal + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.marshal(self)
    }
}
