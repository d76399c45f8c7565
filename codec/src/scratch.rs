//! Reusable scratch buffers for codec operations.

use bitstream::PacketBuilder;

/// Scratch buffers for synchronization encoding.
///
/// Holding one per client keeps the block region's allocation alive
/// across ticks.
#[derive(Debug, Default)]
pub struct SyncScratch {
    blocks: PacketBuilder,
}

impl SyncScratch {
    /// Creates a new scratch buffer with no pre-allocated capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scratch buffer whose block region starts with `bytes` capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            blocks: PacketBuilder::with_capacity(bytes),
        }
    }
}

impl SyncScratch {
    pub(crate) fn block_builder(&mut self) -> &mut PacketBuilder {
        self.blocks.clear();
        &mut self.blocks
    }
}
