//! Byte orders for multi-byte fields.

/// Order in which the bytes of a multi-byte field are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most-significant byte first.
    #[default]
    Big,
    /// Least-significant byte first.
    Little,
    /// 32-bit only: bytes 1, 0, 3, 2 (by significance).
    Middle,
    /// 32-bit only: bytes 2, 3, 0, 1 (by significance).
    InverseMiddle,
}

impl ByteOrder {
    /// Returns the bit shifts to emit, in write order, for a field of `width` bytes.
    ///
    /// Returns `None` when the order does not apply to that width.
    #[must_use]
    pub const fn shifts(self, width: usize) -> Option<&'static [u32]> {
        match (self, width) {
            (Self::Big, 1) | (Self::Little, 1) => Some(&[0]),
            (Self::Big, 2) => Some(&[8, 0]),
            (Self::Big, 4) => Some(&[24, 16, 8, 0]),
            (Self::Little, 2) => Some(&[0, 8]),
            (Self::Little, 4) => Some(&[0, 8, 16, 24]),
            (Self::Middle, 4) => Some(&[8, 0, 24, 16]),
            (Self::InverseMiddle, 4) => Some(&[16, 24, 0, 8]),
            _ => None,
        }
    }

    /// Returns `true` for the two middle-endian orders.
    #[must_use]
    pub const fn is_middle(self) -> bool {
        matches!(self, Self::Middle | Self::InverseMiddle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_and_little_shifts() {
        assert_eq!(ByteOrder::Big.shifts(2), Some(&[8, 0][..]));
        assert_eq!(ByteOrder::Little.shifts(2), Some(&[0, 8][..]));
        assert_eq!(ByteOrder::Big.shifts(4), Some(&[24, 16, 8, 0][..]));
        assert_eq!(ByteOrder::Little.shifts(1), Some(&[0][..]));
        assert_eq!(ByteOrder::Big.shifts(3), None);
    }

    #[test]
    fn middle_orders_only_for_ints() {
        assert_eq!(ByteOrder::Middle.shifts(4), Some(&[8, 0, 24, 16][..]));
        assert_eq!(ByteOrder::InverseMiddle.shifts(4), Some(&[16, 24, 0, 8][..]));
        assert_eq!(ByteOrder::Middle.shifts(2), None);
        assert_eq!(ByteOrder::InverseMiddle.shifts(1), None);
    }

    #[test]
    fn default_is_big() {
        assert_eq!(ByteOrder::default(), ByteOrder::Big);
        assert!(!ByteOrder::Big.is_middle());
        assert!(ByteOrder::Middle.is_middle());
    }
}
