//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding NPC synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Bitstream error, including field values wider than their bit width.
    Bitstream(bitstream::BitError),

    /// Wire framing error.
    Wire(wire::EncodeError),

    /// Index collides with the end-of-additions sentinel or exceeds 14 bits.
    ReservedIndex { index: u16 },

    /// Added NPC is too far from the observer for a 5-bit signed delta.
    DeltaOutOfRange { dx: i32, dy: i32 },

    /// Limits exceeded while decoding.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A segment flagged an update but its mask byte was zero.
    EmptyBlockMask { segment: usize },

    /// Updates were flagged but the bit region ended without the sentinel.
    MissingSentinel,

    /// The sentinel was present but no segment flagged an update.
    UnexpectedSentinel,

    /// Bytes left over after the last block set.
    TrailingBlockData { remaining: usize },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    AddedNpcs,
    ForceChatBytes,
    PayloadBytes,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::ReservedIndex { index } => {
                write!(f, "npc index {index} is reserved or wider than 14 bits")
            }
            Self::DeltaOutOfRange { dx, dy } => {
                write!(f, "add delta ({dx}, {dy}) outside 5-bit signed range")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::EmptyBlockMask { segment } => {
                write!(f, "segment {segment} flagged an update with an empty mask")
            }
            Self::MissingSentinel => write!(f, "updates flagged but sentinel missing"),
            Self::UnexpectedSentinel => write!(f, "sentinel present but no updates flagged"),
            Self::TrailingBlockData { remaining } => {
                write!(f, "trailing block data: {remaining} bytes")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddedNpcs => "added npcs",
            Self::ForceChatBytes => "force chat bytes",
            Self::PayloadBytes => "payload bytes",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitstream(e) => Some(e),
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Wire(err)
    }
}
