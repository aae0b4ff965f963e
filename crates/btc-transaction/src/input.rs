//! Transaction input referencing a previous output.
//!
//! Contains the previous transaction ID and output index, the scriptSig,
//! the sequence number, and the segregated-witness stack. The witness is
//! not part of the per-input wire encoding: it is serialized at the end of
//! the transaction body when the witness extension is present.

use btc_primitives::util::{BtcReader, BtcWriter, VarInt};
use btc_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input (no replacement
/// signaling, no relative lock-time).
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// A single transaction input.
///
/// Each input references an output from a previous transaction by its
/// transaction ID (`prev_txid`, internal byte order) and output index
/// (`prev_index`). The `script_sig` supplies the data required to satisfy
/// the referenced output's locking script; for segwit spends it is empty
/// and the `witness` stack carries the authorization instead.
///
/// # Wire format (base)
///
/// | Field       | Size           |
/// |-------------|----------------|
/// | prev_txid   | 32 bytes       |
/// | prev_index  | 4 bytes (LE)   |
/// | script len  | VarInt         |
/// | script_sig  | variable       |
/// | sequence    | 4 bytes (LE)   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The 32-byte transaction ID of the output being spent, in internal
    /// (little-endian) byte order.
    pub prev_txid: [u8; 32],

    /// Index of the output within the previous transaction.
    pub prev_index: u32,

    /// The unlocking script (scriptSig). Empty for unsigned and segwit inputs.
    pub script_sig: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Witness stack. Empty means "no witness on this input".
    pub witness: Vec<Vec<u8>>,
}

impl TransactionInput {
    /// Create a new input with a zeroed outpoint, empty scripts, and the
    /// default sequence.
    pub fn new() -> Self {
        TransactionInput {
            prev_txid: [0u8; 32],
            prev_index: 0,
            script_sig: Script::new(),
            sequence: DEFAULT_SEQUENCE,
            witness: Vec::new(),
        }
    }

    /// Deserialize the base (non-witness) input fields from a `BtcReader`.
    ///
    /// The witness stack is always left empty; the transaction decoder
    /// assigns it after the outputs when the witness extension is present.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut BtcReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading prev txid: {}", e))
        })?;
        let mut prev_txid = [0u8; 32];
        prev_txid.copy_from_slice(txid_bytes);

        let prev_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading prev index: {}", e))
        })?;

        let script_bytes = reader.read_varslice().map_err(|e| {
            TransactionError::SerializationError(format!("reading scriptSig: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence: {}", e))
        })?;

        Ok(TransactionInput {
            prev_txid,
            prev_index,
            script_sig: Script::from_bytes(script_bytes),
            sequence,
            witness: Vec::new(),
        })
    }

    /// Serialize the base (non-witness) input fields into a `BtcWriter`.
    pub fn write_to(&self, writer: &mut BtcWriter) {
        writer.write_bytes(&self.prev_txid);
        writer.write_u32_le(self.prev_index);
        writer.write_varslice(self.script_sig.as_bytes());
        writer.write_u32_le(self.sequence);
    }

    /// Whether this input carries a non-empty witness stack.
    pub fn has_witness(&self) -> bool {
        !self.witness.is_empty()
    }

    /// Return the base (non-witness) wire size of this input.
    ///
    /// 32 prev_txid + 4 prev_index + 4 sequence + varslice(script_sig).
    pub fn base_size(&self) -> usize {
        40 + VarInt::from(self.script_sig.len()).length() + self.script_sig.len()
    }

    /// Return the wire size of this input's witness stack.
    ///
    /// A varint item count followed by each item as a varslice. An empty
    /// stack still costs its one-byte zero count when the transaction is
    /// serialized with the witness extension.
    pub fn witness_size(&self) -> usize {
        let mut size = VarInt::from(self.witness.len()).length();
        for item in &self.witness {
            size += VarInt::from(item.len()).length() + item.len();
        }
        size
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new()
    }
}
