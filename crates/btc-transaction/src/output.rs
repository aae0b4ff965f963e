//! Transaction output with value and locking script.
//!
//! The value is a tagged variant: a satoshi amount in every ordinary
//! transaction, or a pre-encoded 8-byte buffer for the all-ones placeholder
//! that blanked outputs carry during SIGHASH_SINGLE preimage construction.
//! The decoder only ever produces the amount form.

use btc_primitives::util::{BtcReader, BtcWriter, VarInt};
use btc_script::Script;

use crate::TransactionError;

/// The value carried by a transaction output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputValue {
    /// An ordinary amount in satoshis, serialized as u64 LE.
    Satoshis(u64),
    /// A pre-encoded 8-byte value, serialized verbatim. Exists for the
    /// all-ones `0xFF × 8` placeholder of blanked outputs, which is not
    /// representable as a satoshi amount.
    Raw([u8; 8]),
}

impl OutputValue {
    /// Return the satoshi amount, or `None` for the raw-bytes form.
    pub fn satoshis(&self) -> Option<u64> {
        match self {
            OutputValue::Satoshis(v) => Some(*v),
            OutputValue::Raw(_) => None,
        }
    }

    /// Serialize the value as its 8 wire bytes.
    pub fn write_to(&self, writer: &mut BtcWriter) {
        match self {
            OutputValue::Satoshis(v) => writer.write_u64_le(*v),
            OutputValue::Raw(bytes) => writer.write_bytes(bytes),
        }
    }
}

/// A single transaction output.
///
/// Each output pairs a value with a `script_pubkey` (locking script) that
/// defines the conditions under which the funds may be spent.
///
/// # Wire format
///
/// | Field         | Size           |
/// |---------------|----------------|
/// | value         | 8 bytes        |
/// | script length | VarInt         |
/// | script_pubkey | variable       |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The output value.
    pub value: OutputValue,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub script_pubkey: Script,
}

impl TransactionOutput {
    /// Create a new output with zero satoshis and an empty script.
    pub fn new() -> Self {
        TransactionOutput {
            value: OutputValue::Satoshis(0),
            script_pubkey: Script::new(),
        }
    }

    /// Create the blanked output used by SIGHASH_SINGLE preimages: an empty
    /// script and the all-ones 8-byte value placeholder.
    pub fn blank() -> Self {
        TransactionOutput {
            value: OutputValue::Raw([0xff; 8]),
            script_pubkey: Script::new(),
        }
    }

    /// Deserialize a `TransactionOutput` from a `BtcReader`.
    ///
    /// Reads the 8-byte LE satoshi value and the varslice script. The
    /// raw-bytes value form is never produced here.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut BtcReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;

        let script_bytes = reader.read_varslice().map_err(|e| {
            TransactionError::SerializationError(format!("reading scriptPubKey: {}", e))
        })?;

        Ok(TransactionOutput {
            value: OutputValue::Satoshis(satoshis),
            script_pubkey: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this output into a `BtcWriter`.
    pub fn write_to(&self, writer: &mut BtcWriter) {
        self.value.write_to(writer);
        writer.write_varslice(self.script_pubkey.as_bytes());
    }

    /// Serialize this output to a byte vector.
    ///
    /// The same encoding feeds both the transaction body and the BIP-143
    /// outputs digest.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BtcWriter::with_capacity(self.size());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Return the wire size of this output.
    ///
    /// 8 value bytes + varslice(script_pubkey).
    pub fn size(&self) -> usize {
        8 + VarInt::from(self.script_pubkey.len()).length() + self.script_pubkey.len()
    }
}

impl Default for TransactionOutput {
    fn default() -> Self {
        Self::new()
    }
}
