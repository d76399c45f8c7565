//! Limits for codec-level decoding.

/// Codec-specific limits enforced while decoding a synchronization payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of add entries in one payload.
    pub max_added_npcs: usize,
    /// Maximum length of a single force-chat message in bytes.
    pub max_force_chat_bytes: usize,
    /// Maximum payload size in bytes.
    pub max_payload_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_added_npcs: 255,
            max_force_chat_bytes: 256,
            // Largest payload a variable-short frame can carry
            max_payload_bytes: u16::MAX as usize,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_added_npcs: 32,
            max_force_chat_bytes: 64,
            max_payload_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_added_npcs: usize::MAX,
            max_force_chat_bytes: usize::MAX,
            max_payload_bytes: usize::MAX,
        }
    }
}
