// src/cursor.rs
use crate::error::{NdefError, Result};

/// Forward-only byte source the decoder pulls a record from.
///
/// Implement this over whatever hands you tag bytes (a card read buffer, a
/// socket frame); the decoder never seeks.
pub trait ByteCursor {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Read an unsigned integer of `len` bytes (at most 8), least
    /// significant byte first. Nothing is consumed when `len` is too wide.
    fn read_uint(&mut self, len: usize) -> Result<u64> {
        if len > 8 {
            return Err(NdefError::IntegerWidth(len));
        }
        let bytes = self.read_bytes(len)?;
        Ok(bytes
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, b)| acc | (u64::from(*b) << (8 * i))))
    }
}

/// Cursor over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceCursor { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(NdefError::UnexpectedEof {
                needed: len,
                available: self.remaining(),
            });
        }
        let data = self.data;
        let slice = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

impl ByteCursor for SliceCursor<'_> {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }
}
