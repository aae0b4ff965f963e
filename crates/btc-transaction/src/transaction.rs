//! Core Bitcoin transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! locktime. Supports binary and hex serialization in both the legacy and
//! the BIP-144 segregated-witness wire forms, exact size accounting
//! (base/total/weight/virtual size), transaction ID computation, and
//! coinbase detection.

use btc_primitives::chainhash::Hash;
use btc_primitives::hash::sha256d;
use btc_primitives::util::{BtcReader, BtcWriter, VarInt};
use btc_script::Script;

use crate::input::{TransactionInput, DEFAULT_SEQUENCE};
use crate::output::{OutputValue, TransactionOutput};
use crate::TransactionError;

/// A Bitcoin transaction.
///
/// # Wire format
///
/// | Field         | Size                           |
/// |---------------|--------------------------------|
/// | version       | 4 bytes (i32 LE)               |
/// | marker, flag  | 0x00 0x01 (witness form only)  |
/// | input count   | VarInt                         |
/// | inputs        | variable (per input)           |
/// | output count  | VarInt                         |
/// | outputs       | variable (per output)          |
/// | witnesses     | one vector per input (witness form only) |
/// | lock_time     | 4 bytes (u32 LE)               |
///
/// The marker/flag extension and the witness section are present iff the
/// transaction is serialized with witnesses allowed and at least one input
/// carries a non-empty witness stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Currently 1 or 2.
    pub version: i32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Witness serialization marker byte (must be zero).
    pub const ADVANCED_TRANSACTION_MARKER: u8 = 0x00;
    /// Witness serialization flag byte (must be nonzero).
    pub const ADVANCED_TRANSACTION_FLAG: u8 = 0x01;

    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex is
    /// invalid or the bytes do not form exactly one valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// This method requires the byte slice to contain exactly one complete
    /// transaction with no trailing data. Use `read_from` directly to parse
    /// a transaction embedded in a larger buffer.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = BtcReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize one transaction from a `BtcReader`, leaving any trailing
    /// bytes unread.
    ///
    /// After the version, the next two bytes are probed for the witness
    /// marker/flag pair `(0x00, 0x01)`: if present they are consumed and the
    /// witness section is expected after the outputs. A consequence of this
    /// probe is that a zero-input transaction whose second body byte is
    /// `0x01` (any one-output encoding, for instance) loses its counts to
    /// the probe and fails to decode; only the zero-input, zero-output form
    /// survives, because its `(0x00, 0x00)` does not match the marker. This
    /// matches deployed consensus-compatible decoders and is deliberate.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a serialized
    ///   transaction.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` on truncated
    /// or malformed data, including a witness extension whose every stack
    /// turned out empty ("superfluous witness data").
    pub fn read_from(reader: &mut BtcReader) -> Result<Self, TransactionError> {
        let version = reader.read_i32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        let has_witness = matches!(
            reader.peek_bytes(2),
            Ok(&[Self::ADVANCED_TRANSACTION_MARKER, Self::ADVANCED_TRANSACTION_FLAG])
        );
        if has_witness {
            reader.read_bytes(2).map_err(|e| {
                TransactionError::SerializationError(format!("reading marker/flag: {}", e))
            })?;
        }

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;

        let mut inputs = Vec::with_capacity(input_count.value() as usize);
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;

        let mut outputs = Vec::with_capacity(output_count.value() as usize);
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        if has_witness {
            for input in inputs.iter_mut() {
                input.witness = reader.read_vector().map_err(|e| {
                    TransactionError::SerializationError(format!("reading witness: {}", e))
                })?;
            }
            if !inputs.iter().any(TransactionInput::has_witness) {
                return Err(TransactionError::SerializationError(
                    "superfluous witness data".to_string(),
                ));
            }
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction into a `BtcWriter`.
    ///
    /// When `allow_witness` is true and at least one input carries a
    /// witness, the BIP-144 extended form is emitted: marker and flag after
    /// the version, and one witness vector per input between the outputs
    /// and the locktime. Otherwise the legacy form is emitted.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    /// * `allow_witness` - Whether the witness extension may be emitted.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn write_to(&self, writer: &mut BtcWriter, allow_witness: bool) -> usize {
        let start = writer.len();
        let has_witness = allow_witness && self.has_witnesses();

        writer.write_i32_le(self.version);

        if has_witness {
            writer.write_u8(Self::ADVANCED_TRANSACTION_MARKER);
            writer.write_u8(Self::ADVANCED_TRANSACTION_FLAG);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }

        if has_witness {
            for input in &self.inputs {
                writer.write_vector(&input.witness);
            }
        }

        writer.write_u32_le(self.lock_time);
        writer.len() - start
    }

    /// Serialize this transaction to its canonical wire bytes, witness
    /// extension included when any input has one.
    ///
    /// The output buffer is allocated once at its exact final size.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BtcWriter::with_capacity(self.byte_length(true));
        self.write_to(&mut writer, true);
        writer.into_bytes()
    }

    /// Serialize this transaction without the witness extension, regardless
    /// of whether any input has a witness. This is the form transaction IDs
    /// and legacy signature preimages are computed over.
    pub fn to_bytes_no_witness(&self) -> Vec<u8> {
        let mut writer = BtcWriter::with_capacity(self.byte_length(false));
        self.write_to(&mut writer, false);
        writer.into_bytes()
    }

    /// Serialize this transaction to a lowercase hex string (witness form).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Size accounting
    // -----------------------------------------------------------------

    /// Whether any input carries a non-empty witness stack.
    pub fn has_witnesses(&self) -> bool {
        self.inputs.iter().any(TransactionInput::has_witness)
    }

    /// Compute the exact serialized length without allocating.
    ///
    /// # Arguments
    /// * `allow_witness` - Whether the witness extension would be emitted.
    ///
    /// # Returns
    /// The byte length `write_to` would produce for the same flag.
    pub fn byte_length(&self, allow_witness: bool) -> usize {
        let has_witness = allow_witness && self.has_witnesses();

        // 4 version + 4 locktime, plus marker and flag in the witness form.
        let mut size = if has_witness { 10 } else { 8 };
        size += VarInt::from(self.inputs.len()).length();
        size += VarInt::from(self.outputs.len()).length();
        for input in &self.inputs {
            size += input.base_size();
        }
        for output in &self.outputs {
            size += output.size();
        }
        if has_witness {
            for input in &self.inputs {
                size += input.witness_size();
            }
        }
        size
    }

    /// Return the serialized size excluding witness data.
    pub fn base_size(&self) -> usize {
        self.byte_length(false)
    }

    /// Return the full serialized size including witness data.
    pub fn total_size(&self) -> usize {
        self.byte_length(true)
    }

    /// Return the BIP-141 transaction weight: `3 × base_size + total_size`.
    pub fn weight(&self) -> usize {
        self.base_size() * 3 + self.total_size()
    }

    /// Return the virtual size: `weight / 4`, rounded up.
    pub fn virtual_size(&self) -> usize {
        (self.weight() + 3) / 4
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the raw transaction hash: double SHA-256 of the serialized
    /// transaction without witness data, in internal byte order.
    pub fn hash(&self) -> [u8; 32] {
        sha256d(&self.to_bytes_no_witness())
    }

    /// Compute the witness transaction hash (wtxid): double SHA-256 of the
    /// full serialization. Equals `hash()` for transactions without
    /// witnesses.
    pub fn witness_hash(&self) -> [u8; 32] {
        sha256d(&self.to_bytes())
    }

    /// Compute the transaction ID.
    ///
    /// The witness data never contributes: two transactions differing only
    /// in witnesses share a txid.
    ///
    /// # Returns
    /// A `Hash` whose display form is the conventional byte-reversed hex.
    pub fn tx_id(&self) -> Hash {
        Hash::new(self.hash())
    }

    /// Compute the transaction ID as a human-readable hex string
    /// (byte-reversed, big-endian display order).
    pub fn tx_id_hex(&self) -> String {
        self.tx_id().to_string()
    }

    // -----------------------------------------------------------------
    // Coinbase detection
    // -----------------------------------------------------------------

    /// Determine whether this transaction is a coinbase transaction: exactly
    /// one input whose previous txid is all zero bytes.
    ///
    /// The previous output index is conventionally `0xFFFFFFFF` on a
    /// coinbase but deliberately does not participate in this predicate,
    /// matching deployed implementations.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prev_txid == [0u8; 32]
    }

    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// Append an input referencing the given previous output.
    ///
    /// # Arguments
    /// * `prev_txid` - The previous transaction's ID in internal byte order.
    /// * `prev_index` - The output index being spent.
    /// * `sequence` - Sequence number; `None` means `DEFAULT_SEQUENCE`.
    /// * `script_sig` - Unlocking script; `None` means empty.
    ///
    /// # Returns
    /// The zero-based index of the appended input.
    pub fn add_input(
        &mut self,
        prev_txid: [u8; 32],
        prev_index: u32,
        sequence: Option<u32>,
        script_sig: Option<Script>,
    ) -> usize {
        self.inputs.push(TransactionInput {
            prev_txid,
            prev_index,
            script_sig: script_sig.unwrap_or_default(),
            sequence: sequence.unwrap_or(DEFAULT_SEQUENCE),
            witness: Vec::new(),
        });
        self.inputs.len() - 1
    }

    /// Append an input referencing a previous output given as a
    /// display-order (byte-reversed) hex txid.
    ///
    /// # Arguments
    /// * `prev_txid_hex` - The 64-character txid as displayed.
    /// * `prev_index` - The output index being spent.
    ///
    /// # Returns
    /// The index of the appended input, or an error for an invalid txid.
    pub fn add_input_from_hex(
        &mut self,
        prev_txid_hex: &str,
        prev_index: u32,
    ) -> Result<usize, TransactionError> {
        let hash = Hash::from_hex(prev_txid_hex)?;
        Ok(self.add_input(*hash.as_bytes(), prev_index, None, None))
    }

    /// Append an output paying the given satoshi amount to the given script.
    ///
    /// # Arguments
    /// * `script_pubkey` - The locking script.
    /// * `satoshis` - The output value in satoshis.
    ///
    /// # Returns
    /// The zero-based index of the appended output.
    pub fn add_output(&mut self, script_pubkey: Script, satoshis: u64) -> usize {
        self.outputs.push(TransactionOutput {
            value: OutputValue::Satoshis(satoshis),
            script_pubkey,
        });
        self.outputs.len() - 1
    }

    /// Replace the scriptSig of the input at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range; the caller owns index validity.
    pub fn set_script(&mut self, index: usize, script_sig: Script) {
        self.inputs[index].script_sig = script_sig;
    }

    /// Replace the witness stack of the input at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range; the caller owns index validity.
    pub fn set_witness(&mut self, index: usize, witness: Vec<Vec<u8>>) {
        self.inputs[index].witness = witness;
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
