//! Script chunk parsing and encoding.
//!
//! A script chunk is either an opcode or a data push with its associated
//! bytes. Decoding splits raw script bytes into chunks; encoding re-emits
//! each chunk with its original push prefix, so that a decode/encode round
//! trip reproduces the input byte-for-byte even when a push is non-minimal.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a Bitcoin script.
///
/// Each chunk is either a standalone opcode (like OP_DUP) or a data push
/// that carries the push opcode byte and the pushed data bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Return the serialized byte length of this chunk.
    pub fn size(&self) -> usize {
        let data_len = self.data.as_ref().map_or(0, |d| d.len());
        match self.op {
            OP_PUSHDATA1 => 2 + data_len,
            OP_PUSHDATA2 => 3 + data_len,
            OP_PUSHDATA4 => 5 + data_len,
            _ => 1 + data_len,
        }
    }

    /// Append this chunk's serialized form to a byte vector.
    ///
    /// The original push prefix is preserved: a direct push re-emits its
    /// length byte, an OP_PUSHDATAn push re-emits that opcode with the
    /// payload length in the matching width.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.op);
        let data = match &self.data {
            Some(data) => data,
            None => return,
        };
        match self.op {
            OP_PUSHDATA1 => out.push(data.len() as u8),
            OP_PUSHDATA2 => out.extend_from_slice(&(data.len() as u16).to_le_bytes()),
            OP_PUSHDATA4 => out.extend_from_slice(&(data.len() as u32).to_le_bytes()),
            _ => {}
        }
        out.extend_from_slice(data);
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles the direct push range (opcode 0x01..=0x4b pushes that many
/// bytes) and OP_PUSHDATA1/2/4 extended pushes. Every other byte is a
/// standalone opcode chunk.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or a `ScriptError` if a push runs past the
/// end of the script.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];

        match op {
            OP_PUSHDATA1 => {
                if bytes.len() < pos + 2 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = bytes[pos + 1] as usize;
                pos += 2;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            OP_PUSHDATA2 => {
                if bytes.len() < pos + 3 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = u16::from_le_bytes([bytes[pos + 1], bytes[pos + 2]]) as usize;
                pos += 3;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            OP_PUSHDATA4 => {
                if bytes.len() < pos + 5 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = u32::from_le_bytes([
                    bytes[pos + 1],
                    bytes[pos + 2],
                    bytes[pos + 3],
                    bytes[pos + 4],
                ]) as usize;
                pos += 5;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            0x01..=0x4b => {
                // Direct push: the op byte is the number of bytes to push.
                let length = op as usize;
                if bytes.len() < pos + 1 + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos + 1..pos + 1 + length].to_vec()),
                });
                pos += 1 + length;
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
            }
        }
    }

    Ok(chunks)
}

/// Re-assemble chunks into raw script bytes.
///
/// Each chunk keeps its original push prefix, so
/// `encode_chunks(&decode_script(s)?) == s` for every decodable `s`.
///
/// # Arguments
/// * `chunks` - The chunks to serialize.
///
/// # Returns
/// The concatenated script bytes.
pub fn encode_chunks(chunks: &[ScriptChunk]) -> Vec<u8> {
    let mut out = Vec::with_capacity(chunks.iter().map(ScriptChunk::size).sum());
    for chunk in chunks {
        chunk.write_to(&mut out);
    }
    out
}
