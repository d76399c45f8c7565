//! Update block encoding: mask byte followed by per-kind payloads.
//!
//! Every field's byte order and transform is fixed here; the decoder reads
//! through the same table so the two can never disagree.

use bitstream::{BitReader, ByteOrder, PacketBuilder, Transform};

use crate::block::{Animation, Block, BlockKind, BlockSet, Graphic, HitUpdate};
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::types::Position;

const HIT_TRANSFORMS: [Transform; 4] = [
    Transform::Add,
    Transform::Negate,
    Transform::Add,
    Transform::None,
];

const SECONDARY_HIT_TRANSFORMS: [Transform; 4] = [
    Transform::Negate,
    Transform::Subtract,
    Transform::Subtract,
    Transform::Negate,
];

impl Block {
    /// Number of payload bytes this block adds after the mask byte.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Animation(_) => 3,
            Self::HitUpdate(_) | Self::SecondaryHitUpdate(_) | Self::TurnToPosition { .. } => 4,
            Self::Graphic(_) => 6,
            Self::InteractingMob { .. } | Self::Transform { .. } => 2,
            Self::ForceChat { message } => message.chars().count() + 1,
        }
    }
}

impl BlockSet {
    /// Bytes this set adds to the block region: mask plus payloads, or zero when empty.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        1 + self.iter().map(Block::encoded_len).sum::<usize>()
    }
}

/// Writes the mask byte and every present block's payload in encoding order.
///
/// Empty sets write nothing.
pub(crate) fn write_block_set(blocks: &BlockSet, builder: &mut PacketBuilder) -> CodecResult<()> {
    if blocks.is_empty() {
        return Ok(());
    }
    let mask = blocks.mask();
    tracing::trace!(mask, kinds = blocks.len(), "writing block set");
    builder.write_u8(mask, Transform::None)?;
    for block in blocks.iter() {
        write_block(block, builder)?;
    }
    Ok(())
}

fn write_block(block: &Block, builder: &mut PacketBuilder) -> CodecResult<()> {
    match block {
        Block::Animation(animation) => {
            builder.write_u16(animation.id, ByteOrder::Little, Transform::None)?;
            builder.write_u8(animation.delay, Transform::None)?;
        }
        Block::HitUpdate(hit) => write_hit(hit, HIT_TRANSFORMS, builder)?,
        Block::Graphic(graphic) => {
            builder.write_u16(graphic.id, ByteOrder::Big, Transform::None)?;
            builder.write_u32(graphic.delay, ByteOrder::Big, Transform::None)?;
        }
        Block::InteractingMob { target_index } => {
            builder.write_u16(*target_index, ByteOrder::Big, Transform::None)?;
        }
        Block::ForceChat { message } => builder.write_str(message)?,
        Block::SecondaryHitUpdate(hit) => write_hit(hit, SECONDARY_HIT_TRANSFORMS, builder)?,
        Block::Transform { npc_id } => {
            builder.write_u16(*npc_id, ByteOrder::Little, Transform::Add)?;
        }
        Block::TurnToPosition { position } => {
            builder.write_u16(tile_center(position.x), ByteOrder::Little, Transform::None)?;
            builder.write_u16(tile_center(position.y), ByteOrder::Little, Transform::None)?;
        }
    }
    Ok(())
}

fn write_hit(hit: &HitUpdate, transforms: [Transform; 4], builder: &mut PacketBuilder) -> CodecResult<()> {
    let fields = [hit.damage, hit.hit_type, hit.current_health, hit.max_health];
    for (value, transform) in fields.into_iter().zip(transforms) {
        builder.write_u8(value, transform)?;
    }
    Ok(())
}

/// Doubled coordinate plus one addresses the tile's center rather than its corner.
const fn tile_center(coordinate: u16) -> u16 {
    coordinate.wrapping_mul(2).wrapping_add(1)
}

/// Reads a mask byte and the payloads it announces.
pub(crate) fn read_block_set(
    reader: &mut BitReader<'_>,
    segment: usize,
    limits: &CodecLimits,
) -> CodecResult<BlockSet> {
    let mask = reader.read_u8(Transform::None)?;
    if mask == 0 {
        return Err(CodecError::EmptyBlockMask { segment });
    }

    let mut blocks = BlockSet::new();
    for kind in BlockKind::ENCODING_ORDER {
        if mask & kind.mask_bit() != 0 {
            blocks.insert(read_block(kind, reader, limits)?);
        }
    }
    Ok(blocks)
}

fn read_block(kind: BlockKind, reader: &mut BitReader<'_>, limits: &CodecLimits) -> CodecResult<Block> {
    let block = match kind {
        BlockKind::Animation => Block::Animation(Animation {
            id: reader.read_u16(ByteOrder::Little, Transform::None)?,
            delay: reader.read_u8(Transform::None)?,
        }),
        BlockKind::HitUpdate => Block::HitUpdate(read_hit(HIT_TRANSFORMS, reader)?),
        BlockKind::Graphic => Block::Graphic(Graphic {
            id: reader.read_u16(ByteOrder::Big, Transform::None)?,
            delay: reader.read_u32(ByteOrder::Big, Transform::None)?,
        }),
        BlockKind::InteractingMob => Block::InteractingMob {
            target_index: reader.read_u16(ByteOrder::Big, Transform::None)?,
        },
        BlockKind::ForceChat => {
            let message = reader.read_str()?;
            // One char per wire byte.
            let wire_len = message.chars().count();
            if wire_len > limits.max_force_chat_bytes {
                return Err(CodecError::LimitsExceeded {
                    kind: LimitKind::ForceChatBytes,
                    limit: limits.max_force_chat_bytes,
                    actual: wire_len,
                });
            }
            Block::ForceChat { message }
        }
        BlockKind::SecondaryHitUpdate => {
            Block::SecondaryHitUpdate(read_hit(SECONDARY_HIT_TRANSFORMS, reader)?)
        }
        BlockKind::Transform => Block::Transform {
            npc_id: reader.read_u16(ByteOrder::Little, Transform::Add)?,
        },
        BlockKind::TurnToPosition => {
            let x = reader.read_u16(ByteOrder::Little, Transform::None)?;
            let y = reader.read_u16(ByteOrder::Little, Transform::None)?;
            Block::TurnToPosition {
                position: Position::new(x >> 1, y >> 1),
            }
        }
    };
    Ok(block)
}

fn read_hit(transforms: [Transform; 4], reader: &mut BitReader<'_>) -> CodecResult<HitUpdate> {
    let mut fields = [0u8; 4];
    for (field, transform) in fields.iter_mut().zip(transforms) {
        *field = reader.read_u8(transform)?;
    }
    let [damage, hit_type, current_health, max_health] = fields;
    Ok(HitUpdate {
        damage,
        hit_type,
        current_health,
        max_health,
    })
}
