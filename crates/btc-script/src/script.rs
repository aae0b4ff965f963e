/// Bitcoin Script type - a sequence of opcodes and data pushes.
///
/// Scripts appear in transaction inputs (scriptSig) and outputs
/// (scriptPubKey). The Script wraps a `Vec<u8>` and provides construction,
/// serialization, and the chunk-level filtering the signature hash needs.

use std::fmt;

use crate::chunk::{decode_script, encode_chunks, ScriptChunk};
use crate::opcodes::OP_CODESEPARATOR;
use crate::ScriptError;

/// A Bitcoin script, represented as a byte vector newtype.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is
    /// invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the script into its opcode/push chunks.
    ///
    /// # Returns
    /// The chunk sequence, or an error if a push runs past the end of
    /// the script.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// Return a copy of this script with every OP_CODESEPARATOR removed.
    ///
    /// The script is tokenized, separator opcodes are dropped, and the
    /// remaining chunks are re-assembled with their original push prefixes,
    /// leaving every other byte untouched. An 0xAB byte inside a push-data
    /// payload is data, not an opcode, and survives.
    ///
    /// # Returns
    /// The filtered script, or an error if the script cannot be tokenized.
    pub fn without_code_separators(&self) -> Result<Script, ScriptError> {
        let chunks = self.chunks()?;
        let filtered: Vec<ScriptChunk> = chunks
            .into_iter()
            .filter(|chunk| chunk.op != OP_CODESEPARATOR)
            .collect();
        Ok(Script(encode_chunks(&filtered)))
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}
