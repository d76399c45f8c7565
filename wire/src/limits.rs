//! Configurable limits for bounded frame decoding.

/// Wire-level limits for frame decoding.
///
/// These limits are enforced during decoding to prevent resource exhaustion
/// and ensure bounded memory usage. Payload parsing limits belong to the
/// codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum frame size in bytes, including opcode and length prefix.
    pub max_frame_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Opcode + two-byte length + the largest variable-short payload
            max_frame_bytes: 1 + 2 + u16::MAX as usize,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_fit_variable_short() {
        let limits = Limits::default();
        assert_eq!(limits.max_frame_bytes, 65_538);
    }

    #[test]
    fn testing_limits_smaller() {
        assert!(Limits::for_testing().max_frame_bytes < Limits::default().max_frame_bytes);
    }

    #[test]
    fn unlimited_limits() {
        assert_eq!(Limits::unlimited().max_frame_bytes, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_frame_bytes, 4096);
    }
}
