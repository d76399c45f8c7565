//! Game packet framing.

use crate::error::{DecodeError, EncodeError, WireResult};
use crate::limits::Limits;

/// How a packet's payload length is conveyed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// Length is implied by the opcode; no prefix.
    Fixed,
    /// One-byte length prefix.
    VariableByte,
    /// Two-byte big-endian length prefix.
    VariableShort,
}

impl PacketType {
    /// Number of bytes used by the length prefix.
    #[must_use]
    pub const fn prefix_len(self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::VariableByte => 1,
            Self::VariableShort => 2,
        }
    }

    /// Largest payload the length prefix can describe.
    #[must_use]
    pub const fn max_payload_len(self) -> usize {
        match self {
            Self::Fixed => usize::MAX,
            Self::VariableByte => u8::MAX as usize,
            Self::VariableShort => u16::MAX as usize,
        }
    }
}

/// An outbound packet: opcode, framing mode and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePacket {
    pub opcode: u8,
    pub packet_type: PacketType,
    pub payload: Vec<u8>,
}

impl GamePacket {
    #[must_use]
    pub fn new(opcode: u8, packet_type: PacketType, payload: Vec<u8>) -> Self {
        Self {
            opcode,
            packet_type,
            payload,
        }
    }
}

/// A decoded frame borrowing its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireFrame<'a> {
    pub opcode: u8,
    pub payload: &'a [u8],
}

/// Encodes a packet as `[opcode][length prefix][payload]`.
pub fn encode_frame(packet: &GamePacket) -> Result<Vec<u8>, EncodeError> {
    let len = packet.payload.len();
    let max = packet.packet_type.max_payload_len();
    if len > max {
        return Err(EncodeError::PayloadTooLarge {
            packet_type: packet.packet_type,
            length: len,
            max,
        });
    }

    let mut out = Vec::with_capacity(1 + packet.packet_type.prefix_len() + len);
    out.push(packet.opcode);
    match packet.packet_type {
        PacketType::Fixed => {}
        PacketType::VariableByte => out.push(len as u8),
        PacketType::VariableShort => out.extend_from_slice(&(len as u16).to_be_bytes()),
    }
    out.extend_from_slice(&packet.payload);
    Ok(out)
}

/// Decodes a single frame that occupies all of `buf`.
pub fn decode_frame<'a>(
    buf: &'a [u8],
    packet_type: PacketType,
    limits: &Limits,
) -> WireResult<WireFrame<'a>> {
    let header_len = 1 + packet_type.prefix_len();
    if buf.len() < header_len {
        return Err(DecodeError::FrameTooSmall {
            actual: buf.len(),
            required: header_len,
        });
    }
    if buf.len() > limits.max_frame_bytes {
        return Err(DecodeError::FrameTooLarge {
            limit: limits.max_frame_bytes,
            actual: buf.len(),
        });
    }

    let opcode = buf[0];
    let payload = &buf[header_len..];
    let declared = match packet_type {
        PacketType::Fixed => payload.len(),
        PacketType::VariableByte => usize::from(buf[1]),
        PacketType::VariableShort => usize::from(u16::from_be_bytes([buf[1], buf[2]])),
    };
    if declared != payload.len() {
        return Err(DecodeError::PayloadLengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(WireFrame { opcode, payload })
}
