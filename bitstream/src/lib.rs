//! Bit and byte packing primitives for the npcsync codec.
//!
//! This crate provides [`PacketBuilder`] and [`BitReader`]: a growable buffer
//! that switches between bit-packed and byte-aligned access, and the matching
//! bounded reader.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about NPCs or game state.
//! - **Explicit errors** - All failures return structured errors, never panic.
//! - **One place for transforms** - [`Transform::apply`] and [`Transform::reverse`]
//!   are shared by the writer and the reader.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, ByteOrder, PacketBuilder, Transform};
//!
//! let mut builder = PacketBuilder::new();
//! builder.switch_to_bit_access();
//! builder.write_bit(true).unwrap();
//! builder.write_bits(42, 7).unwrap();
//! builder.switch_to_byte_access();
//! builder.write_u16(0x1234, ByteOrder::Little, Transform::Add).unwrap();
//!
//! let bytes = builder.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bit().unwrap(), true);
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! assert_eq!(reader.read_u16(ByteOrder::Little, Transform::Add).unwrap(), 0x1234);
//! ```

mod error;
mod order;
mod reader;
mod transform;
mod writer;

pub use error::{BitError, BitResult};
pub use order::ByteOrder;
pub use reader::BitReader;
pub use transform::Transform;
pub use writer::{AccessMode, PacketBuilder, MAX_BITS, STRING_TERMINATOR};
