//! NPC synchronization encoding.
//!
//! Payload layout: an 8-bit local count, one bit-packed entry per segment,
//! the 14-bit sentinel when any block data exists, zero padding to the next
//! byte, then the block region verbatim. See `WIRE_FORMAT.md`.

use bitstream::PacketBuilder;
use wire::{GamePacket, PacketType};

use crate::block::BlockSet;
use crate::error::{CodecError, CodecResult};
use crate::scratch::SyncScratch;
use crate::segment::{NpcSynchronizationEvent, Segment, Step};
use crate::types::{NpcIndex, Position};
use crate::update::write_block_set;

/// Opcode of the NPC synchronization packet.
pub const NPC_SYNCHRONIZATION_OPCODE: u8 = 65;

/// Framing mode of the NPC synchronization packet.
pub const NPC_SYNCHRONIZATION_PACKET_TYPE: PacketType = PacketType::VariableShort;

pub(crate) const COUNT_BITS: u8 = 8;
pub(crate) const UPDATE_FLAG_BITS: u8 = 1;
pub(crate) const MOVEMENT_TYPE_BITS: u8 = 2;
pub(crate) const DIRECTION_BITS: u8 = 3;
pub(crate) const DELTA_BITS: u8 = 5;
pub(crate) const NPC_ID_BITS: u8 = 12;

/// Width of a complete add entry.
pub(crate) const ADD_ENTRY_BITS: usize = NpcIndex::BITS as usize
    + 2 * DELTA_BITS as usize
    + 1
    + NPC_ID_BITS as usize
    + UPDATE_FLAG_BITS as usize;

pub(crate) const MOVEMENT_NONE: u32 = 0;
pub(crate) const MOVEMENT_WALK: u32 = 1;
pub(crate) const MOVEMENT_RUN: u32 = 2;
pub(crate) const MOVEMENT_REMOVE: u32 = 3;

const DELTA_MIN: i32 = -(1 << (DELTA_BITS - 1));
const DELTA_MAX: i32 = (1 << (DELTA_BITS - 1)) - 1;

/// Encodes one tick's NPC synchronization payload.
pub fn encode_npc_synchronization(event: &NpcSynchronizationEvent) -> CodecResult<Vec<u8>> {
    let mut scratch = SyncScratch::new();
    encode_npc_synchronization_with_scratch(event, &mut scratch)
}

/// Encodes a payload, reusing `scratch` for the block region.
pub fn encode_npc_synchronization_with_scratch(
    event: &NpcSynchronizationEvent,
    scratch: &mut SyncScratch,
) -> CodecResult<Vec<u8>> {
    let mut builder = PacketBuilder::new();
    let blocks = scratch.block_builder();

    builder.switch_to_bit_access();
    builder.write_bits(u32::from(event.local_count), COUNT_BITS)?;

    for segment in &event.segments {
        match segment {
            Segment::Remove => put_remove(&mut builder)?,
            Segment::Add {
                index,
                npc_id,
                position,
                blocks: set,
            } => {
                put_add(
                    *index,
                    *npc_id,
                    *position,
                    event.reference_position,
                    set,
                    &mut builder,
                )?;
                write_block_set(set, blocks)?;
            }
            Segment::Movement { step, blocks: set } => {
                put_movement(*step, set, &mut builder)?;
                write_block_set(set, blocks)?;
            }
        }
    }

    let bit_region = builder.bits_written();
    if !blocks.is_empty() {
        builder.write_bits(u32::from(NpcIndex::SENTINEL), NpcIndex::BITS)?;
    }
    builder.switch_to_byte_access();
    builder.append_builder(blocks)?;

    tracing::debug!(
        segments = event.segments.len(),
        local_count = event.local_count,
        bit_region,
        block_region = blocks.len(),
        "encoded npc synchronization"
    );
    Ok(builder.finish())
}

/// Encodes a payload and wraps it as an outbound packet.
pub fn encode_npc_synchronization_packet(
    event: &NpcSynchronizationEvent,
) -> CodecResult<GamePacket> {
    let payload = encode_npc_synchronization(event)?;
    let max = NPC_SYNCHRONIZATION_PACKET_TYPE.max_payload_len();
    if payload.len() > max {
        return Err(CodecError::Wire(wire::EncodeError::PayloadTooLarge {
            packet_type: NPC_SYNCHRONIZATION_PACKET_TYPE,
            length: payload.len(),
            max,
        }));
    }
    Ok(GamePacket::new(
        NPC_SYNCHRONIZATION_OPCODE,
        NPC_SYNCHRONIZATION_PACKET_TYPE,
        payload,
    ))
}

fn put_remove(builder: &mut PacketBuilder) -> CodecResult<()> {
    builder.write_bit(true)?;
    builder.write_bits(MOVEMENT_REMOVE, MOVEMENT_TYPE_BITS)?;
    Ok(())
}

fn put_movement(step: Step, blocks: &BlockSet, builder: &mut PacketBuilder) -> CodecResult<()> {
    let update_required = !blocks.is_empty();
    match step {
        Step::Run([first, second]) => {
            builder.write_bit(true)?;
            builder.write_bits(MOVEMENT_RUN, MOVEMENT_TYPE_BITS)?;
            builder.write_bits(u32::from(first.code()), DIRECTION_BITS)?;
            builder.write_bits(u32::from(second.code()), DIRECTION_BITS)?;
            builder.write_bit(update_required)?;
        }
        Step::Walk(direction) => {
            builder.write_bit(true)?;
            builder.write_bits(MOVEMENT_WALK, MOVEMENT_TYPE_BITS)?;
            builder.write_bits(u32::from(direction.code()), DIRECTION_BITS)?;
            builder.write_bit(update_required)?;
        }
        Step::None if update_required => {
            builder.write_bit(true)?;
            builder.write_bits(MOVEMENT_NONE, MOVEMENT_TYPE_BITS)?;
        }
        Step::None => builder.write_bit(false)?,
    }
    Ok(())
}

fn put_add(
    index: NpcIndex,
    npc_id: u16,
    position: Position,
    reference: Position,
    blocks: &BlockSet,
    builder: &mut PacketBuilder,
) -> CodecResult<()> {
    let (dx, dy) = reference.delta_to(position);
    if !(DELTA_MIN..=DELTA_MAX).contains(&dx) || !(DELTA_MIN..=DELTA_MAX).contains(&dy) {
        return Err(CodecError::DeltaOutOfRange { dx, dy });
    }

    builder.write_bits(u32::from(index.raw()), NpcIndex::BITS)?;
    builder.write_bits(signed_field(dy), DELTA_BITS)?;
    builder.write_bits(signed_field(dx), DELTA_BITS)?;
    // Discard-movement-queue flag, always clear for NPCs.
    builder.write_bit(false)?;
    builder.write_bits(u32::from(npc_id), NPC_ID_BITS)?;
    builder.write_bit(!blocks.is_empty())?;
    Ok(())
}

/// Two's complement truncated to the delta width.
fn signed_field(delta: i32) -> u32 {
    (delta as u32) & ((1 << DELTA_BITS) - 1)
}

/// Sign-extends a delta read back from the wire.
pub(crate) fn signed_delta(raw: u32) -> i32 {
    let raw = raw as i32;
    if raw > DELTA_MAX {
        raw - (1 << DELTA_BITS)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Animation, Block, HitUpdate};
    use crate::types::Direction;

    fn origin() -> Position {
        Position::new(3200, 3200)
    }

    fn event(local_count: u8, segments: Vec<Segment>) -> NpcSynchronizationEvent {
        NpcSynchronizationEvent::new(origin(), local_count, segments)
    }

    fn anim() -> BlockSet {
        BlockSet::new().with(Block::Animation(Animation { id: 0x0102, delay: 0 }))
    }

    #[test]
    fn empty_event_is_one_byte() {
        let payload = encode_npc_synchronization(&event(0, vec![])).unwrap();
        assert_eq!(payload, vec![0]);

        let payload = encode_npc_synchronization(&event(200, vec![])).unwrap();
        assert_eq!(payload, vec![200]);
    }

    #[test]
    fn remove_is_three_bits() {
        let payload = encode_npc_synchronization(&event(1, vec![Segment::Remove])).unwrap();
        // count, then 1 11 + padding
        assert_eq!(payload, vec![1, 0b1110_0000]);
    }

    #[test]
    fn idle_is_one_zero_bit() {
        let payload = encode_npc_synchronization(&event(1, vec![Segment::idle()])).unwrap();
        assert_eq!(payload, vec![1, 0b0000_0000]);
    }

    #[test]
    fn idle_with_blocks_writes_update_and_sentinel() {
        let segment = Segment::Movement {
            step: Step::None,
            blocks: anim(),
        };
        let payload = encode_npc_synchronization(&event(1, vec![segment])).unwrap();
        // 1 00 | 14 ones | pad: 1001_1111 1111_1111 1000_0000
        assert_eq!(
            payload,
            vec![1, 0b1001_1111, 0xFF, 0b1000_0000, 0x10, 0x02, 0x01, 0x00]
        );
    }

    #[test]
    fn walk_without_blocks() {
        let segment = Segment::Movement {
            step: Step::Walk(Direction::East),
            blocks: BlockSet::new(),
        };
        let payload = encode_npc_synchronization(&event(1, vec![segment])).unwrap();
        // 1 01 100 0 + pad
        assert_eq!(payload, vec![1, 0b1011_0000]);
    }

    #[test]
    fn walk_with_blocks_is_seven_bits_then_sentinel() {
        let segment = Segment::Movement {
            step: Step::Walk(Direction::SouthEast),
            blocks: anim(),
        };
        let payload = encode_npc_synchronization(&event(1, vec![segment])).unwrap();
        // 1 01 111 1 | 14 ones | pad -> 1011_1111 1111_1111 1111_1000
        assert_eq!(&payload[..4], &[1, 0b1011_1111, 0xFF, 0b1111_1000]);
        // mask + 3-byte animation payload
        assert_eq!(&payload[4..], &[0x10, 0x02, 0x01, 0x00]);
    }

    #[test]
    fn run_without_blocks() {
        let segment = Segment::Movement {
            step: Step::Run([Direction::North, Direction::West]),
            blocks: BlockSet::new(),
        };
        let payload = encode_npc_synchronization(&event(1, vec![segment])).unwrap();
        // 1 10 001 011 0 + pad -> 1100_0101 1000_0000
        assert_eq!(payload, vec![1, 0b1100_0101, 0b1000_0000]);
    }

    #[test]
    fn add_entry_layout() {
        let segment = Segment::Add {
            index: NpcIndex::new(5).unwrap(),
            npc_id: 3,
            position: Position::new(3201, 3198),
            blocks: BlockSet::new(),
        };
        let payload = encode_npc_synchronization(&event(0, vec![segment])).unwrap();
        // index 00000000000101, dy -2 = 11110, dx 1 = 00001, 0, id 000000000011, 0
        // 00000000 00010111 11000001 00000000 000110 + 2 pad bits
        assert_eq!(
            payload,
            vec![0, 0x00, 0b0001_0111, 0b1100_0001, 0b0000_0000, 0b0001_1000]
        );
    }

    #[test]
    fn add_with_max_index_encodes() {
        let segment = Segment::Add {
            index: NpcIndex::new(NpcIndex::MAX).unwrap(),
            npc_id: 4095,
            position: origin(),
            blocks: BlockSet::new(),
        };
        assert!(encode_npc_synchronization(&event(0, vec![segment])).is_ok());
    }

    #[test]
    fn add_delta_bounds() {
        let add_at = |x: u16, y: u16| Segment::Add {
            index: NpcIndex::new(1).unwrap(),
            npc_id: 1,
            position: Position::new(x, y),
            blocks: BlockSet::new(),
        };
        assert!(encode_npc_synchronization(&event(0, vec![add_at(3215, 3184)])).is_ok());
        assert_eq!(
            encode_npc_synchronization(&event(0, vec![add_at(3216, 3200)])),
            Err(CodecError::DeltaOutOfRange { dx: 16, dy: 0 })
        );
        assert_eq!(
            encode_npc_synchronization(&event(0, vec![add_at(3200, 3183)])),
            Err(CodecError::DeltaOutOfRange { dx: 0, dy: -17 })
        );
    }

    #[test]
    fn npc_id_wider_than_twelve_bits_rejected() {
        let segment = Segment::Add {
            index: NpcIndex::new(1).unwrap(),
            npc_id: 4096,
            position: origin(),
            blocks: BlockSet::new(),
        };
        let err = encode_npc_synchronization(&event(0, vec![segment])).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Bitstream(bitstream::BitError::ValueOutOfRange { value: 4096, bits: 12 })
        ));
    }

    #[test]
    fn sentinel_only_when_blocks_exist() {
        let without = encode_npc_synchronization(&event(
            2,
            vec![
                Segment::Remove,
                Segment::Movement {
                    step: Step::Walk(Direction::North),
                    blocks: BlockSet::new(),
                },
            ],
        ))
        .unwrap();
        // 8 + 3 + 7 bits, no sentinel
        assert_eq!(without.len(), 3);

        let hit = HitUpdate {
            damage: 1,
            hit_type: 1,
            current_health: 1,
            max_health: 1,
        };
        let with = encode_npc_synchronization(&event(
            2,
            vec![
                Segment::Remove,
                Segment::Movement {
                    step: Step::Walk(Direction::North),
                    blocks: BlockSet::new().with(Block::HitUpdate(hit)),
                },
            ],
        ))
        .unwrap();
        // 8 + 3 + 7 + 14 bits = 4 bytes, then mask + 4
        assert_eq!(with.len(), 4 + 5);
    }

    #[test]
    fn scratch_reuse_matches_fresh_encode() {
        let mut scratch = SyncScratch::new();
        let first = event(
            1,
            vec![Segment::Movement {
                step: Step::None,
                blocks: anim(),
            }],
        );
        let second = event(1, vec![Segment::idle()]);

        let a = encode_npc_synchronization_with_scratch(&first, &mut scratch).unwrap();
        let b = encode_npc_synchronization_with_scratch(&second, &mut scratch).unwrap();
        assert_eq!(a, encode_npc_synchronization(&first).unwrap());
        assert_eq!(b, encode_npc_synchronization(&second).unwrap());
    }

    #[test]
    fn packet_uses_opcode_and_variable_short() {
        let packet = encode_npc_synchronization_packet(&event(3, vec![])).unwrap();
        assert_eq!(packet.opcode, 65);
        assert_eq!(packet.packet_type, PacketType::VariableShort);
        assert_eq!(packet.payload, vec![3]);
    }

    #[test]
    fn signed_delta_roundtrip() {
        for delta in DELTA_MIN..=DELTA_MAX {
            assert_eq!(signed_delta(signed_field(delta)), delta);
        }
        assert_eq!(signed_field(-1), 0b11111);
        assert_eq!(ADD_ENTRY_BITS, 38);
    }
}
