//! Update blocks: per-NPC visual and combat state changes.

use crate::types::Position;

/// An animation to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub id: u16,
    pub delay: u8,
}

/// A graphic (spot animation) to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graphic {
    pub id: u16,
    pub delay: u32,
}

/// A hit splat with the NPC's resulting health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitUpdate {
    pub damage: u8,
    pub hit_type: u8,
    pub current_health: u8,
    pub max_health: u8,
}

/// A single update block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Block {
    Animation(Animation),
    Graphic(Graphic),
    HitUpdate(HitUpdate),
    SecondaryHitUpdate(HitUpdate),
    InteractingMob { target_index: u16 },
    ForceChat { message: String },
    Transform { npc_id: u16 },
    TurnToPosition { position: Position },
}

impl Block {
    /// Returns the kind this block is keyed by in a [`BlockSet`].
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Animation(_) => BlockKind::Animation,
            Self::Graphic(_) => BlockKind::Graphic,
            Self::HitUpdate(_) => BlockKind::HitUpdate,
            Self::SecondaryHitUpdate(_) => BlockKind::SecondaryHitUpdate,
            Self::InteractingMob { .. } => BlockKind::InteractingMob,
            Self::ForceChat { .. } => BlockKind::ForceChat,
            Self::Transform { .. } => BlockKind::Transform,
            Self::TurnToPosition { .. } => BlockKind::TurnToPosition,
        }
    }
}

/// Block kinds, declared in payload encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    Animation,
    HitUpdate,
    Graphic,
    InteractingMob,
    ForceChat,
    SecondaryHitUpdate,
    Transform,
    TurnToPosition,
}

impl BlockKind {
    /// All kinds in the order their payloads follow the mask byte.
    ///
    /// This is not mask-bit order; decoders depend on it exactly.
    pub const ENCODING_ORDER: [Self; 8] = [
        Self::Animation,
        Self::HitUpdate,
        Self::Graphic,
        Self::InteractingMob,
        Self::ForceChat,
        Self::SecondaryHitUpdate,
        Self::Transform,
        Self::TurnToPosition,
    ];

    /// Bit set in the mask byte when this kind is present.
    #[must_use]
    pub const fn mask_bit(self) -> u8 {
        match self {
            Self::ForceChat => 0x01,
            Self::Transform => 0x02,
            Self::TurnToPosition => 0x04,
            Self::HitUpdate => 0x08,
            Self::Animation => 0x10,
            Self::InteractingMob => 0x20,
            Self::SecondaryHitUpdate => 0x40,
            Self::Graphic => 0x80,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// At most one block per kind, iterated in encoding order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BlockSet {
    slots: [Option<Block>; 8],
}

impl BlockSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block, returning the one it replaced if that kind was present.
    pub fn insert(&mut self, block: Block) -> Option<Block> {
        let slot = block.kind().slot();
        self.slots[slot].replace(block)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, block: Block) -> Self {
        self.insert(block);
        self
    }

    #[must_use]
    pub fn get(&self, kind: BlockKind) -> Option<&Block> {
        self.slots[kind.slot()].as_ref()
    }

    #[must_use]
    pub fn contains(&self, kind: BlockKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    pub fn remove(&mut self, kind: BlockKind) -> Option<Block> {
        self.slots[kind.slot()].take()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Present blocks in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.slots.iter().flatten()
    }

    /// OR of the mask bits of every present kind.
    #[must_use]
    pub fn mask(&self) -> u8 {
        self.iter().fold(0, |mask, block| mask | block.kind().mask_bit())
    }
}

impl FromIterator<Block> for BlockSet {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        let mut set = Self::new();
        for block in iter {
            set.insert(block);
        }
        set
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BlockSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BlockSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let blocks = Vec::<Block>::deserialize(deserializer)?;
        Ok(blocks.into_iter().collect())
    }
}
