//! Mixed bit/byte access packet builder.

use std::fmt;

use crate::error::{BitError, BitResult};
use crate::order::ByteOrder;
use crate::transform::Transform;

/// Byte terminating every string written with [`PacketBuilder::write_str`].
pub const STRING_TERMINATOR: u8 = 10;

/// Maximum width of a single bit-access field.
pub const MAX_BITS: u8 = 32;

/// Addressing mode of a [`PacketBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessMode {
    /// Whole-byte writes.
    #[default]
    Byte,
    /// Bit-packed writes, most-significant bit first.
    Bit,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => write!(f, "byte"),
            Self::Bit => write!(f, "bit"),
        }
    }
}

/// A growable buffer written either bit-by-bit or byte-by-byte.
///
/// Builders start in byte access. Bit access packs fields most-significant
/// bit first; switching back to byte access pads the partial byte with
/// zeros. Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Clone, Default)]
pub struct PacketBuilder {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being written (not yet pushed to bytes).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
    mode: AccessMode,
}

impl PacketBuilder {
    /// Creates a new empty builder in byte access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Returns the current access mode.
    #[must_use]
    pub const fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Returns the number of bytes the finished buffer would hold.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() + usize::from(self.bit_count > 0)
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.bit_count == 0
    }

    /// Completed bytes. In bit access a partial trailing byte is not included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Discards all content and returns to byte access, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.current_byte = 0;
        self.bit_count = 0;
        self.mode = AccessMode::Byte;
    }

    /// Switches to bit access. No-op if already in bit access.
    pub fn switch_to_bit_access(&mut self) {
        self.mode = AccessMode::Bit;
    }

    /// Switches to byte access, padding any partial byte with zero bits.
    pub fn switch_to_byte_access(&mut self) {
        self.flush_partial_byte();
        self.mode = AccessMode::Byte;
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, value: bool) -> BitResult<()> {
        self.ensure_mode(AccessMode::Bit)?;
        self.push_bit(value);
        Ok(())
    }

    /// Writes the low `bits` bits of `value`, most-significant first.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::WrongAccessMode`] outside bit access.
    /// Returns [`BitError::InvalidBitCount`] unless `1 <= bits <= 32`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    pub fn write_bits(&mut self, value: u32, bits: u8) -> BitResult<()> {
        self.ensure_mode(AccessMode::Bit)?;
        if bits == 0 || bits > MAX_BITS {
            return Err(BitError::InvalidBitCount {
                bits,
                max_bits: MAX_BITS,
            });
        }
        if bits < MAX_BITS && value >= (1u32 << bits) {
            return Err(BitError::ValueOutOfRange { value, bits });
        }

        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Writes one byte.
    pub fn write_u8(&mut self, value: u8, transform: Transform) -> BitResult<()> {
        self.write_field(u32::from(value), 1, ByteOrder::Big, transform)
    }

    /// Writes a 16-bit field.
    pub fn write_u16(&mut self, value: u16, order: ByteOrder, transform: Transform) -> BitResult<()> {
        self.write_field(u32::from(value), 2, order, transform)
    }

    /// Writes a 32-bit field.
    pub fn write_u32(&mut self, value: u32, order: ByteOrder, transform: Transform) -> BitResult<()> {
        self.write_field(value, 4, order, transform)
    }

    /// Writes `text` as Latin-1, one byte per `char`, followed by [`STRING_TERMINATOR`].
    ///
    /// Nothing is written when the text is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::EmbeddedTerminator`] if `text` contains the terminator, or
    /// [`BitError::UnencodableChar`] for a `char` above `U+00FF`.
    pub fn write_str(&mut self, text: &str) -> BitResult<()> {
        self.ensure_mode(AccessMode::Byte)?;
        for (offset, ch) in text.chars().enumerate() {
            match u8::try_from(ch) {
                Ok(STRING_TERMINATOR) => return Err(BitError::EmbeddedTerminator { offset }),
                Ok(_) => {}
                Err(_) => return Err(BitError::UnencodableChar { ch, offset }),
            }
        }
        self.bytes.reserve(text.len() + 1);
        for ch in text.chars() {
            self.bytes.push(ch as u8);
        }
        self.bytes.push(STRING_TERMINATOR);
        Ok(())
    }

    /// Splices raw bytes at the current position.
    pub fn write_raw(&mut self, bytes: &[u8]) -> BitResult<()> {
        self.ensure_mode(AccessMode::Byte)?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Splices the contents of another builder, which must be in byte access.
    pub fn append_builder(&mut self, other: &Self) -> BitResult<()> {
        if other.mode != AccessMode::Byte {
            return Err(BitError::WrongAccessMode {
                expected: AccessMode::Byte,
                actual: other.mode,
            });
        }
        self.write_raw(&other.bytes)
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, it is padded with zeros on the right.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.flush_partial_byte();
        self.bytes
    }

    fn write_field(
        &mut self,
        value: u32,
        width: usize,
        order: ByteOrder,
        transform: Transform,
    ) -> BitResult<()> {
        self.ensure_mode(AccessMode::Byte)?;
        if order.is_middle() && !transform.is_none() {
            return Err(BitError::TransformedMiddleOrder { order });
        }
        let shifts = order
            .shifts(width)
            .ok_or(BitError::UnsupportedOrder { order, width })?;
        for &shift in shifts {
            let byte = (value >> shift) as u8;
            // The transform only ever touches the least-significant byte.
            let byte = if shift == 0 { transform.apply(byte) } else { byte };
            self.bytes.push(byte);
        }
        Ok(())
    }

    fn push_bit(&mut self, value: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    fn flush_partial_byte(&mut self) {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    fn ensure_mode(&self, expected: AccessMode) -> BitResult<()> {
        if self.mode != expected {
            return Err(BitError::WrongAccessMode {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }
}
