//! Outer frame packaging for npcsync payloads.
//!
//! This crate wraps an encoded payload in its transport frame: a one-byte
//! opcode followed by a length prefix whose width depends on the
//! [`PacketType`]. It does not know about NPCs or synchronization, only the
//! structure of frames.
//!
//! # Design Principles
//!
//! - **Bounded decoding** - Declared lengths are validated against the buffer and [`Limits`].
//! - **No domain knowledge** - This crate handles framing, not game logic.
//!
//! See `WIRE_FORMAT.md` for the complete layout.

mod error;
mod limits;
mod packet;

pub use error::{DecodeError, EncodeError, WireResult};
pub use limits::Limits;
pub use packet::{decode_frame, encode_frame, GamePacket, PacketType, WireFrame};
