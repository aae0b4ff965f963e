//! Bitcoin script representation.
//!
//! Provides the `Script` newtype, opcode constants, and script chunk
//! parsing. The chunk codec exists so a serialized script can be
//! tokenized, filtered, and re-assembled byte-for-byte, which is the
//! operation the legacy signature hash uses to strip `OP_CODESEPARATOR`.

pub mod chunk;
pub mod opcodes;
pub mod script;

mod error;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
