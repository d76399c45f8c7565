//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};
use crate::order::ByteOrder;
use crate::transform::Transform;
use crate::writer::{MAX_BITS, STRING_TERMINATOR};

/// A reader for buffers produced by [`PacketBuilder`](crate::PacketBuilder).
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Reads a single bit as a boolean.
    pub fn read_bit(&mut self) -> BitResult<bool> {
        self.ensure_bits(1)?;
        let byte_idx = self.bit_pos / 8;
        let bit_idx = self.bit_pos % 8;
        let bit = (self.data[byte_idx] >> (7 - bit_idx)) & 1;
        self.bit_pos += 1;
        Ok(bit == 1)
    }

    /// Reads up to 32 bits as an unsigned integer.
    pub fn read_bits(&mut self, bits: u8) -> BitResult<u32> {
        if bits == 0 || bits > MAX_BITS {
            return Err(BitError::InvalidBitCount {
                bits,
                max_bits: MAX_BITS,
            });
        }
        self.ensure_bits(bits as usize)?;

        let mut value = 0u32;
        for _ in 0..bits {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Aligns to the next byte boundary.
    pub fn align_to_byte(&mut self) -> BitResult<()> {
        let rem = self.bit_pos % 8;
        if rem == 0 {
            return Ok(());
        }
        let skip = 8 - rem;
        self.ensure_bits(skip)?;
        self.bit_pos += skip;
        Ok(())
    }

    /// Reads a byte-aligned `u8`, reversing `transform`.
    pub fn read_u8(&mut self, transform: Transform) -> BitResult<u8> {
        let value = self.read_field(1, ByteOrder::Big, transform)?;
        Ok(value as u8)
    }

    /// Reads a byte-aligned `u16`.
    pub fn read_u16(&mut self, order: ByteOrder, transform: Transform) -> BitResult<u16> {
        let value = self.read_field(2, order, transform)?;
        Ok(value as u16)
    }

    /// Reads a byte-aligned `u32`.
    pub fn read_u32(&mut self, order: ByteOrder, transform: Transform) -> BitResult<u32> {
        self.read_field(4, order, transform)
    }

    /// Reads a terminated Latin-1 string, consuming the terminator.
    ///
    /// Each byte maps to the `char` of the same value, mirroring
    /// [`PacketBuilder::write_str`](crate::PacketBuilder::write_str), so arbitrary
    /// input cannot fail decoding and the `char` count equals the wire length.
    pub fn read_str(&mut self) -> BitResult<String> {
        self.ensure_aligned()?;
        let start = self.bit_pos / 8;
        let rest = &self.data[start..];
        let len = rest
            .iter()
            .position(|&b| b == STRING_TERMINATOR)
            .ok_or(BitError::UnterminatedString)?;
        let text = rest[..len].iter().copied().map(char::from).collect();
        self.bit_pos += (len + 1) * 8;
        Ok(text)
    }

    /// Returns the unread, byte-aligned tail of the buffer.
    pub fn remaining_bytes(&self) -> BitResult<&'a [u8]> {
        self.ensure_aligned()?;
        Ok(&self.data[self.bit_pos / 8..])
    }

    fn read_field(&mut self, width: usize, order: ByteOrder, transform: Transform) -> BitResult<u32> {
        if order.is_middle() && !transform.is_none() {
            return Err(BitError::TransformedMiddleOrder { order });
        }
        let shifts = order
            .shifts(width)
            .ok_or(BitError::UnsupportedOrder { order, width })?;
        self.ensure_aligned()?;
        self.ensure_bits(width * 8)?;

        let mut idx = self.bit_pos / 8;
        let mut value = 0u32;
        for &shift in shifts {
            let byte = self.data[idx];
            let byte = if shift == 0 { transform.reverse(byte) } else { byte };
            value |= u32::from(byte) << shift;
            idx += 1;
        }
        self.bit_pos += width * 8;
        Ok(value)
    }

    fn ensure_aligned(&self) -> BitResult<()> {
        if self.bit_pos % 8 != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bit_pos,
            });
        }
        Ok(())
    }

    fn ensure_bits(&self, bits: usize) -> BitResult<()> {
        let available = self.bits_remaining();
        if bits > available {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available,
            });
        }
        Ok(())
    }
}
