//! NPC synchronization encoding for tick-based game servers.
//!
//! Each tick the server tells every client how the NPCs around its player
//! changed: which tracked NPCs moved or left, which new ones appeared, and
//! what visual or combat updates each of them carries. This crate turns that
//! description into the bit-exact payload of the NPC synchronization packet
//! and back.
//!
//! The payload layout is documented in `WIRE_FORMAT.md` at the repository root.
//!
//! # Example
//!
//! ```
//! use codec::{
//!     decode_npc_synchronization, encode_npc_synchronization, Block, BlockSet, CodecLimits,
//!     Direction, NpcSynchronizationEvent, Position, Segment, Step,
//! };
//!
//! let event = NpcSynchronizationEvent::new(
//!     Position::new(3222, 3218),
//!     1,
//!     vec![Segment::Movement {
//!         step: Step::Walk(Direction::North),
//!         blocks: BlockSet::new().with(Block::Transform { npc_id: 2 }),
//!     }],
//! );
//!
//! let payload = encode_npc_synchronization(&event).unwrap();
//! let decoded = decode_npc_synchronization(&payload, &CodecLimits::default()).unwrap();
//! assert_eq!(decoded.resolve(event.reference_position), event);
//! ```
//!
//! # Design Principles
//!
//! - **Bit-exact** - Every field width, byte order and transform is fixed in one place.
//! - **Typed** - Invalid direction counts and duplicate block kinds cannot be expressed.
//! - **Never panics** - Out-of-range values surface as [`CodecError`].

mod block;
mod decode;
mod error;
mod limits;
mod scratch;
mod segment;
mod sync;
mod types;
mod update;

pub use block::{Animation, Block, BlockKind, BlockSet, Graphic, HitUpdate};
pub use decode::{decode_npc_synchronization, DecodedSegment, DecodedSync};
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use scratch::SyncScratch;
pub use segment::{MovementKind, NpcSynchronizationEvent, Segment, Step};
pub use sync::{
    encode_npc_synchronization, encode_npc_synchronization_packet,
    encode_npc_synchronization_with_scratch, NPC_SYNCHRONIZATION_OPCODE,
    NPC_SYNCHRONIZATION_PACKET_TYPE,
};
pub use types::{Direction, NpcIndex, Position};
pub use wire::{GamePacket, Limits as WireLimits, PacketType};
