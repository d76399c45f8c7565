//! Core types for the codec.

use crate::error::{CodecError, CodecResult};

/// A tile coordinate in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: u16,
    pub y: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: u8,
}

impl Position {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y, height: 0 }
    }

    #[must_use]
    pub const fn with_height(x: u16, y: u16, height: u8) -> Self {
        Self { x, y, height }
    }

    /// Returns `(other.x - self.x, other.y - self.y)`.
    #[must_use]
    pub fn delta_to(self, other: Self) -> (i32, i32) {
        (
            i32::from(other.x) - i32::from(self.x),
            i32::from(other.y) - i32::from(self.y),
        )
    }
}

/// One of the eight compass directions an NPC can step in.
///
/// Discriminants are the 3-bit wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    West = 3,
    East = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Returns the 3-bit wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a wire code; only the low three bits are significant.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0b111) as usize]
    }
}

/// An NPC tracking slot as sent in add entries.
///
/// Slots are 14 bits wide, and the all-ones value is reserved as the
/// end-of-additions sentinel, so valid slots are `0..=16382`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct NpcIndex(u16);

impl NpcIndex {
    /// Wire width of an index.
    pub const BITS: u8 = 14;

    /// Reserved all-ones value marking the end of add entries.
    pub const SENTINEL: u16 = (1 << Self::BITS) - 1;

    /// Largest usable index.
    pub const MAX: u16 = Self::SENTINEL - 1;

    /// Creates an index, rejecting the sentinel and anything wider than 14 bits.
    pub fn new(index: u16) -> CodecResult<Self> {
        if index > Self::MAX {
            return Err(CodecError::ReservedIndex { index });
        }
        Ok(Self(index))
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for NpcIndex {
    type Error = CodecError;

    fn try_from(index: u16) -> CodecResult<Self> {
        Self::new(index)
    }
}

impl From<NpcIndex> for u16 {
    fn from(index: NpcIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_delta() {
        let origin = Position::new(3200, 3200);
        assert_eq!(origin.delta_to(Position::new(3205, 3190)), (5, -10));
        assert_eq!(origin.delta_to(origin), (0, 0));
    }

    #[test]
    fn position_default_height() {
        assert_eq!(Position::new(1, 2).height, 0);
        assert_eq!(Position::with_height(1, 2, 3).height, 3);
    }

    #[test]
    fn direction_codes() {
        for (code, direction) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(direction.code()), code);
            assert_eq!(Direction::from_code(code as u8), direction);
        }
        assert_eq!(Direction::North.code(), 1);
        assert_eq!(Direction::SouthEast.code(), 7);
    }

    #[test]
    fn npc_index_bounds() {
        assert_eq!(NpcIndex::SENTINEL, 16383);
        assert_eq!(NpcIndex::new(16382).unwrap().raw(), 16382);
        assert_eq!(NpcIndex::new(0).unwrap().raw(), 0);
        assert_eq!(
            NpcIndex::new(16383),
            Err(CodecError::ReservedIndex { index: 16383 })
        );
        assert!(NpcIndex::new(u16::MAX).is_err());
    }

    #[test]
    fn npc_index_conversions() {
        let index: NpcIndex = 42u16.try_into().unwrap();
        assert_eq!(u16::from(index), 42);
    }
}
