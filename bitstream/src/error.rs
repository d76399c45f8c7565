//! Error types for bitstream operations.

use std::fmt;

use crate::order::ByteOrder;
use crate::writer::AccessMode;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur during bit-level or byte-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits available.
        available: usize,
    },

    /// Invalid bit count for the operation.
    InvalidBitCount {
        /// The invalid bit count provided.
        bits: u8,
        /// Maximum allowed bits for this operation.
        max_bits: u8,
    },

    /// Value exceeds the range representable by the specified number of bits.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u32,
        /// Number of bits available.
        bits: u8,
    },

    /// A write was issued in the wrong access mode.
    WrongAccessMode {
        /// Mode the operation requires.
        expected: AccessMode,
        /// Mode the builder is currently in.
        actual: AccessMode,
    },

    /// A byte-aligned read was attempted off a byte boundary.
    MisalignedAccess {
        /// Current bit position.
        bit_position: usize,
    },

    /// Byte order cannot be used for a field of this width.
    UnsupportedOrder {
        /// The rejected order.
        order: ByteOrder,
        /// Field width in bytes.
        width: usize,
    },

    /// Middle-endian orders cannot carry a transform.
    TransformedMiddleOrder {
        /// The rejected order.
        order: ByteOrder,
    },

    /// Text contains the string terminator byte.
    EmbeddedTerminator {
        /// Offset of the terminator within the encoded text.
        offset: usize,
    },

    /// Text contains a `char` with no single-byte Latin-1 encoding.
    UnencodableChar {
        /// The rejected character.
        ch: char,
        /// Offset of the character within the encoded text.
        offset: usize,
    },

    /// String was not terminated before the end of the buffer.
    UnterminatedString,
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bits but only {available} bits available"
                )
            }
            Self::InvalidBitCount { bits, max_bits } => {
                write!(f, "invalid bit count {bits}, must be 1..={max_bits}")
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} cannot be represented in {bits} bits")
            }
            Self::WrongAccessMode { expected, actual } => {
                write!(f, "operation requires {expected} access but builder is in {actual} access")
            }
            Self::MisalignedAccess { bit_position } => {
                write!(f, "byte access at unaligned bit position {bit_position}")
            }
            Self::UnsupportedOrder { order, width } => {
                write!(f, "{order:?} byte order is not valid for {width}-byte fields")
            }
            Self::TransformedMiddleOrder { order } => {
                write!(f, "{order:?} byte order cannot be transformed")
            }
            Self::EmbeddedTerminator { offset } => {
                write!(f, "string contains terminator byte at offset {offset}")
            }
            Self::UnencodableChar { ch, offset } => {
                write!(f, "character {ch:?} at offset {offset} is not encodable as Latin-1")
            }
            Self::UnterminatedString => write!(f, "string is missing its terminator"),
        }
    }
}

impl std::error::Error for BitError {}
