//! NPC synchronization decoding.
//!
//! The mirror of [`crate::sync`]. Clients and tooling use it to inspect
//! payloads; the server never decodes its own output.

use bitstream::BitReader;

use crate::block::BlockSet;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::segment::{NpcSynchronizationEvent, Segment, Step};
use crate::sync::{
    signed_delta, ADD_ENTRY_BITS, COUNT_BITS, DELTA_BITS, DIRECTION_BITS, MOVEMENT_NONE,
    MOVEMENT_RUN, MOVEMENT_TYPE_BITS, MOVEMENT_WALK, NPC_ID_BITS,
};
use crate::types::{Direction, NpcIndex, Position};
use crate::update::read_block_set;

/// A segment as read from the wire.
///
/// Adds keep their raw deltas since the observer's position is not on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DecodedSegment {
    Remove,
    Add {
        index: NpcIndex,
        npc_id: u16,
        dx: i32,
        dy: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        blocks: BlockSet,
    },
    Movement {
        #[cfg_attr(feature = "serde", serde(default))]
        step: Step,
        #[cfg_attr(feature = "serde", serde(default))]
        blocks: BlockSet,
    },
}

impl DecodedSegment {
    #[must_use]
    pub fn blocks(&self) -> Option<&BlockSet> {
        match self {
            Self::Remove => None,
            Self::Add { blocks, .. } | Self::Movement { blocks, .. } => Some(blocks),
        }
    }

    fn blocks_mut(&mut self) -> Option<&mut BlockSet> {
        match self {
            Self::Remove => None,
            Self::Add { blocks, .. } | Self::Movement { blocks, .. } => Some(blocks),
        }
    }
}

/// A decoded synchronization payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedSync {
    pub local_count: u8,
    pub segments: Vec<DecodedSegment>,
}

impl DecodedSync {
    /// Number of add entries.
    #[must_use]
    pub fn added(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, DecodedSegment::Add { .. }))
            .count()
    }

    /// Rebuilds the event, placing adds relative to `reference`.
    ///
    /// Added positions inherit the reference height.
    #[must_use]
    pub fn resolve(&self, reference: Position) -> NpcSynchronizationEvent {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                DecodedSegment::Remove => Segment::Remove,
                DecodedSegment::Add {
                    index,
                    npc_id,
                    dx,
                    dy,
                    blocks,
                } => Segment::Add {
                    index: *index,
                    npc_id: *npc_id,
                    position: Position::with_height(
                        offset(reference.x, *dx),
                        offset(reference.y, *dy),
                        reference.height,
                    ),
                    blocks: blocks.clone(),
                },
                DecodedSegment::Movement { step, blocks } => Segment::Movement {
                    step: *step,
                    blocks: blocks.clone(),
                },
            })
            .collect();
        NpcSynchronizationEvent::new(reference, self.local_count, segments)
    }
}

fn offset(coordinate: u16, delta: i32) -> u16 {
    coordinate.wrapping_add_signed(delta as i16)
}

/// Decodes a synchronization payload.
///
/// # Errors
///
/// Returns [`CodecError::MissingSentinel`] or [`CodecError::UnexpectedSentinel`]
/// when the sentinel disagrees with the update flags, and
/// [`CodecError::TrailingBlockData`] when bytes remain after the last block set.
pub fn decode_npc_synchronization(
    payload: &[u8],
    limits: &CodecLimits,
) -> CodecResult<DecodedSync> {
    if payload.len() > limits.max_payload_bytes {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::PayloadBytes,
            limit: limits.max_payload_bytes,
            actual: payload.len(),
        });
    }

    let mut reader = BitReader::new(payload);
    let local_count = reader.read_bits(COUNT_BITS)? as u8;
    let mut segments = Vec::with_capacity(usize::from(local_count));
    let mut flagged = Vec::new();

    for _ in 0..local_count {
        let (segment, update_required) = read_local(&mut reader)?;
        if update_required {
            flagged.push(segments.len());
        }
        segments.push(segment);
    }

    let mut added = 0usize;
    let mut sentinel = false;
    while reader.bits_remaining() >= usize::from(NpcIndex::BITS) {
        let may_hold_add = reader.bits_remaining() >= ADD_ENTRY_BITS;
        let raw = reader.read_bits(NpcIndex::BITS)? as u16;
        if raw == NpcIndex::SENTINEL {
            sentinel = true;
            break;
        }
        if !may_hold_add {
            let remaining = payload.len() - reader.bit_position().div_ceil(8);
            return Err(CodecError::TrailingBlockData { remaining });
        }

        added += 1;
        if added > limits.max_added_npcs {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::AddedNpcs,
                limit: limits.max_added_npcs,
                actual: added,
            });
        }

        let (segment, update_required) = read_add(raw, &mut reader)?;
        if update_required {
            flagged.push(segments.len());
        }
        segments.push(segment);
    }

    match (flagged.is_empty(), sentinel) {
        (false, false) => return Err(CodecError::MissingSentinel),
        (true, true) => return Err(CodecError::UnexpectedSentinel),
        _ => {}
    }

    reader.align_to_byte()?;
    for idx in flagged {
        let blocks = read_block_set(&mut reader, idx, limits)?;
        if let Some(slot) = segments[idx].blocks_mut() {
            *slot = blocks;
        }
    }

    let remaining = reader.remaining_bytes()?.len();
    if remaining != 0 {
        return Err(CodecError::TrailingBlockData { remaining });
    }

    tracing::debug!(
        local_count,
        added,
        segments = segments.len(),
        "decoded npc synchronization"
    );
    Ok(DecodedSync {
        local_count,
        segments,
    })
}

fn read_local(reader: &mut BitReader<'_>) -> CodecResult<(DecodedSegment, bool)> {
    if !reader.read_bit()? {
        let idle = DecodedSegment::Movement {
            step: Step::None,
            blocks: BlockSet::new(),
        };
        return Ok((idle, false));
    }

    let (step, update_required) = match reader.read_bits(MOVEMENT_TYPE_BITS)? {
        MOVEMENT_NONE => (Step::None, true),
        MOVEMENT_WALK => {
            let direction = read_direction(reader)?;
            (Step::Walk(direction), reader.read_bit()?)
        }
        MOVEMENT_RUN => {
            let first = read_direction(reader)?;
            let second = read_direction(reader)?;
            (Step::Run([first, second]), reader.read_bit()?)
        }
        _ => return Ok((DecodedSegment::Remove, false)),
    };
    let segment = DecodedSegment::Movement {
        step,
        blocks: BlockSet::new(),
    };
    Ok((segment, update_required))
}

fn read_add(raw_index: u16, reader: &mut BitReader<'_>) -> CodecResult<(DecodedSegment, bool)> {
    let index = NpcIndex::new(raw_index)?;
    let dy = signed_delta(reader.read_bits(DELTA_BITS)?);
    let dx = signed_delta(reader.read_bits(DELTA_BITS)?);
    let _discard_queue = reader.read_bit()?;
    let npc_id = reader.read_bits(NPC_ID_BITS)? as u16;
    let update_required = reader.read_bit()?;
    let segment = DecodedSegment::Add {
        index,
        npc_id,
        dx,
        dy,
        blocks: BlockSet::new(),
    };
    Ok((segment, update_required))
}

fn read_direction(reader: &mut BitReader<'_>) -> CodecResult<Direction> {
    Ok(Direction::from_code(reader.read_bits(DIRECTION_BITS)? as u8))
}
