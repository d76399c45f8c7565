//! Error types for wire framing operations.

use std::fmt;

use crate::packet::PacketType;

/// Result type for wire framing operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Frame is too small to contain the opcode and length prefix.
    FrameTooSmall { actual: usize, required: usize },

    /// Declared payload length disagrees with the bytes present.
    PayloadLengthMismatch { declared: usize, actual: usize },

    /// Frame exceeds the configured limit.
    FrameTooLarge { limit: usize, actual: usize },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload does not fit the packet type's length prefix.
    PayloadTooLarge {
        packet_type: PacketType,
        length: usize,
        max: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameTooSmall { actual, required } => {
                write!(f, "frame too small: {actual} bytes, need at least {required}")
            }
            Self::PayloadLengthMismatch { declared, actual } => {
                write!(
                    f,
                    "payload length mismatch: declared {declared} bytes but {actual} available"
                )
            }
            Self::FrameTooLarge { limit, actual } => {
                write!(f, "frame bytes limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge {
                packet_type,
                length,
                max,
            } => {
                write!(
                    f,
                    "payload of {length} bytes too large for {packet_type:?} (max {max})"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}
