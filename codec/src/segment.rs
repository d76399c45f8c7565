//! Synchronization segments and the per-tick event.

use crate::block::BlockSet;
use crate::types::{Direction, NpcIndex, Position};

/// Movement of an already-tracked NPC during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Step {
    #[default]
    None,
    Walk(Direction),
    Run([Direction; 2]),
}

/// Discriminant of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    None,
    Walk,
    Run,
}

impl Step {
    #[must_use]
    pub const fn kind(self) -> MovementKind {
        match self {
            Self::None => MovementKind::None,
            Self::Walk(_) => MovementKind::Walk,
            Self::Run(_) => MovementKind::Run,
        }
    }

    /// Directions taken this tick: empty, one or two.
    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        match self {
            Self::None => &[],
            Self::Walk(first) => std::slice::from_ref(first),
            Self::Run(both) => both,
        }
    }
}

/// One NPC's update descriptor for a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Segment {
    /// A tracked NPC leaving visibility.
    Remove,
    /// A newly visible NPC.
    Add {
        index: NpcIndex,
        npc_id: u16,
        position: Position,
        #[cfg_attr(feature = "serde", serde(default))]
        blocks: BlockSet,
    },
    /// A tracked NPC that stayed visible.
    Movement {
        #[cfg_attr(feature = "serde", serde(default))]
        step: Step,
        #[cfg_attr(feature = "serde", serde(default))]
        blocks: BlockSet,
    },
}

impl Segment {
    /// A stationary NPC with nothing to report.
    #[must_use]
    pub fn idle() -> Self {
        Self::Movement {
            step: Step::None,
            blocks: BlockSet::new(),
        }
    }

    /// Returns the segment's blocks; removals never carry any.
    #[must_use]
    pub fn blocks(&self) -> Option<&BlockSet> {
        match self {
            Self::Remove => None,
            Self::Add { blocks, .. } | Self::Movement { blocks, .. } => Some(blocks),
        }
    }

    /// Returns `true` if a block payload will follow for this segment.
    #[must_use]
    pub fn requires_update(&self) -> bool {
        self.blocks().is_some_and(|blocks| !blocks.is_empty())
    }
}

/// The tick's NPC delta for one observing client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSynchronizationEvent {
    /// Position of the observing player; origin for add deltas.
    pub reference_position: Position,
    /// NPCs tracked before this tick, one `Remove`/`Movement` segment each.
    pub local_count: u8,
    /// Segments in wire order: tracked NPCs first, then additions.
    pub segments: Vec<Segment>,
}

impl NpcSynchronizationEvent {
    #[must_use]
    pub fn new(reference_position: Position, local_count: u8, segments: Vec<Segment>) -> Self {
        Self {
            reference_position,
            local_count,
            segments,
        }
    }
}
