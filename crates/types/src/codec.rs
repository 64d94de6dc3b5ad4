// Path: crates/types/src/codec.rs

//! The canonical byte buffer codec used by every wire format in abikit.
//!
//! All fixed-width integers and floats are little-endian. Variable-length
//! integers use the base-128 continuation-bit scheme (LEB128); signed ones are
//! zig-zag mapped first. Every length prefix (arrays, strings, byte blobs) is a
//! `varuint32`.
//!
//! `Encoder` is an append-only buffer created fresh per pack call. `Decoder` is
//! a positioned cursor over a borrowed slice; a read that would run past the
//! end fails with [`CodecError::UnexpectedEof`] and leaves the cursor where it
//! was.

use crate::error::CodecError;
use crate::MAX_DECODE_LENGTH;

/// An append-only write buffer.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

macro_rules! pack_le {
    ($($(#[$doc:meta])* $name:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, v: $ty) {
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
        )*
    };
}

impl Encoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty encoder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pack_le! {
        /// Writes a `u8`.
        pack_u8: u8,
        /// Writes a little-endian `u16`.
        pack_u16: u16,
        /// Writes a little-endian `u32`.
        pack_u32: u32,
        /// Writes a little-endian `u64`.
        pack_u64: u64,
        /// Writes an `i8`.
        pack_i8: i8,
        /// Writes a little-endian `i16`.
        pack_i16: i16,
        /// Writes a little-endian `i32`.
        pack_i32: i32,
        /// Writes a little-endian `i64`.
        pack_i64: i64,
        /// Writes a little-endian IEEE-754 single.
        pack_f32: f32,
        /// Writes a little-endian IEEE-754 double.
        pack_f64: f64,
    }

    /// Writes a boolean as a single `0` or `1` byte.
    pub fn pack_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    /// Writes an unsigned LEB128 integer.
    pub fn pack_varuint32(&mut self, mut v: u32) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }

    /// Writes a zig-zag mapped signed LEB128 integer.
    pub fn pack_varint32(&mut self, v: i32) {
        self.pack_varuint32(((v << 1) ^ (v >> 31)) as u32);
    }

    /// Writes a length prefix.
    pub fn pack_length(&mut self, n: usize) -> Result<(), CodecError> {
        let n = u32::try_from(n).map_err(|_| CodecError::LengthOverflow(n))?;
        self.pack_varuint32(n);
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn pack_string(&mut self, s: &str) -> Result<(), CodecError> {
        self.pack_bytes(s.as_bytes())
    }

    /// Writes a length-prefixed byte blob.
    pub fn pack_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.pack_length(bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Clears the buffer so the encoder can be reused by the same owner.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Consumes the encoder, transferring the bytes to the caller.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! unpack_le {
    ($($(#[$doc:meta])* $name:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self) -> Result<$ty, CodecError> {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                self.read(&mut raw)?;
                Ok(<$ty>::from_le_bytes(raw))
            }
        )*
    };
}

impl<'a> Decoder<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether every byte has been consumed.
    pub fn is_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let eof = CodecError::UnexpectedEof {
            needed: n,
            remaining: self.remaining(),
        };
        let end = self.pos.checked_add(n).ok_or_else(|| eof.clone())?;
        let bytes = self.data.get(self.pos..end).ok_or(eof)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Fills `buf` completely from the cursor.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        let bytes = self.read_bytes(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        self.read(&mut out)?;
        Ok(out)
    }

    unpack_le! {
        /// Reads a `u8`.
        unpack_u8: u8,
        /// Reads a little-endian `u16`.
        unpack_u16: u16,
        /// Reads a little-endian `u32`.
        unpack_u32: u32,
        /// Reads a little-endian `u64`.
        unpack_u64: u64,
        /// Reads an `i8`.
        unpack_i8: i8,
        /// Reads a little-endian `i16`.
        unpack_i16: i16,
        /// Reads a little-endian `i32`.
        unpack_i32: i32,
        /// Reads a little-endian `i64`.
        unpack_i64: i64,
        /// Reads a little-endian IEEE-754 single.
        unpack_f32: f32,
        /// Reads a little-endian IEEE-754 double.
        unpack_f64: f64,
    }

    /// Reads a boolean byte, which must be 0 or 1.
    pub fn unpack_bool(&mut self) -> Result<bool, CodecError> {
        let start = self.pos;
        match self.unpack_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => {
                self.pos = start;
                Err(CodecError::InvalidBool(other))
            }
        }
    }

    /// Reads an unsigned LEB128 integer of at most 32 bits.
    pub fn unpack_varuint32(&mut self) -> Result<u32, CodecError> {
        let start = self.pos;
        let mut result: u32 = 0;
        let mut shift = 0u32;
        loop {
            let byte = match self.unpack_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.pos = start;
                    return Err(e);
                }
            };
            if shift == 28 && byte & 0x70 != 0 {
                self.pos = start;
                return Err(CodecError::VarintOverflow);
            }
            result |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
            if shift > 28 {
                self.pos = start;
                return Err(CodecError::VarintOverflow);
            }
        }
    }

    /// Reads a zig-zag mapped signed LEB128 integer.
    pub fn unpack_varint32(&mut self) -> Result<i32, CodecError> {
        let v = self.unpack_varuint32()?;
        Ok(((v >> 1) as i32) ^ -((v & 1) as i32))
    }

    /// Reads a length prefix, rejecting lengths that cannot fit in the remaining input.
    pub fn unpack_length(&mut self) -> Result<usize, CodecError> {
        let start = self.pos;
        let n = self.unpack_varuint32()? as usize;
        if n > MAX_DECODE_LENGTH {
            self.pos = start;
            return Err(CodecError::LengthOverflow(n));
        }
        Ok(n)
    }

    /// Reads a length-prefixed byte blob.
    pub fn unpack_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let start = self.pos;
        let read = self
            .unpack_length()
            .and_then(|n| self.read_bytes(n))
            .map(<[u8]>::to_vec);
        self.rewind_on_err(start, read)
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn unpack_string(&mut self) -> Result<String, CodecError> {
        let start = self.pos;
        let read = self.unpack_bytes().and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8(e.to_string()))
        });
        self.rewind_on_err(start, read)
    }

    /// A failed composite read leaves the cursor where it started.
    fn rewind_on_err<T>(&mut self, start: usize, read: Result<T, CodecError>) -> Result<T, CodecError> {
        if read.is_err() {
            self.pos = start;
        }
        read
    }
}

/// Serde adapter rendering byte blobs as lowercase hex strings.
pub mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes `bytes` as a hex string.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    /// Reads a hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
