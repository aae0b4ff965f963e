/// Bitcoin codec primitives - hashing, byte cursors, and chain hashes.
///
/// This crate provides the foundational building blocks for the workspace:
/// - Hash functions (SHA-256 and double SHA-256)
/// - Chain hash type for transaction identification
/// - Compact-size varint encoding and little-endian byte cursors

pub mod chainhash;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
