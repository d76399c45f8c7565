//! Obfuscating byte transforms.

/// A reversible perturbation applied to the least-significant byte of a field.
///
/// The arithmetic lives only in [`apply`](Self::apply) and
/// [`reverse`](Self::reverse) so writers and readers cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transform {
    /// Byte is written unchanged.
    #[default]
    None,
    /// `byte + 128`.
    Add,
    /// `-byte`.
    Negate,
    /// `128 - byte`.
    Subtract,
}

impl Transform {
    /// Transforms a byte for transmission.
    #[must_use]
    pub const fn apply(self, byte: u8) -> u8 {
        match self {
            Self::None => byte,
            Self::Add => byte.wrapping_add(128),
            Self::Negate => byte.wrapping_neg(),
            Self::Subtract => 128u8.wrapping_sub(byte),
        }
    }

    /// Recovers the original byte from a transmitted one.
    #[must_use]
    pub const fn reverse(self, byte: u8) -> u8 {
        match self {
            Self::None => byte,
            Self::Add => byte.wrapping_sub(128),
            // Both are involutions.
            Self::Negate => byte.wrapping_neg(),
            Self::Subtract => 128u8.wrapping_sub(byte),
        }
    }

    /// Returns `true` for the identity transform.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Transform; 4] = [
        Transform::None,
        Transform::Add,
        Transform::Negate,
        Transform::Subtract,
    ];

    #[test]
    fn known_values() {
        assert_eq!(Transform::None.apply(7), 7);
        assert_eq!(Transform::Add.apply(7), 135);
        assert_eq!(Transform::Add.apply(200), 72);
        assert_eq!(Transform::Negate.apply(1), 0xFF);
        assert_eq!(Transform::Negate.apply(0), 0);
        assert_eq!(Transform::Subtract.apply(0), 128);
        assert_eq!(Transform::Subtract.apply(130), 0xFE);
    }

    #[test]
    fn reverse_undoes_apply_for_every_byte() {
        for transform in ALL {
            for byte in 0..=u8::MAX {
                assert_eq!(transform.reverse(transform.apply(byte)), byte, "{transform:?}");
            }
        }
    }

    #[test]
    fn default_is_identity() {
        assert!(Transform::default().is_none());
        assert!(!Transform::Add.is_none());
    }
}
