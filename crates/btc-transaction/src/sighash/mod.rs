//! Signature hash computation for transaction signing.
//!
//! Computes the 32-byte message an ECDSA signer commits to for a
//! particular input. Two constructions are provided: the original
//! pre-segwit algorithm (`legacy_signature_hash`), which serializes a
//! mutated copy of the whole transaction, and the BIP-143 witness-v0
//! algorithm (`witness_v0_signature_hash`), which commits to the spent
//! amount through three cached sub-digests.
//!
//! See <https://github.com/bitcoin/bips/blob/master/bip-0143.mediawiki>

use btc_primitives::hash::sha256d;
use btc_primitives::util::{BtcWriter, VarInt};
use btc_script::Script;

use crate::output::TransactionOutput;
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input, allowing other
/// inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

/// The 32-byte little-endian encoding of the number 1.
///
/// Historical quirk of the original client: when the input index is out of
/// range, or SIGHASH_SINGLE names an output that does not exist, the legacy
/// algorithm hashes the string "1" in place of a transaction digest. The
/// value is returned in-band, not as an error, because every verifier must
/// reproduce it to stay consensus-compatible.
pub const UINT256_ONE: [u8; 32] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

// -----------------------------------------------------------------------
// Legacy (pre-segwit) signature hash
// -----------------------------------------------------------------------

/// Compute the legacy signature hash for a given input.
///
/// A copy of the transaction is rewritten according to `sighash_type`
/// (outputs blanked or truncated, foreign scripts emptied, foreign
/// sequences zeroed), serialized without witness data, and double-SHA256
/// hashed together with the 4-byte LE `sighash_type` tail.
///
/// `prev_script` is the locking script of the output being spent; every
/// OP_CODESEPARATOR in it is stripped before it is substituted into the
/// signed input.
///
/// Returns `UINT256_ONE` in-band, not as an error, when `input_index` is
/// out of range, or when the base type is SIGHASH_SINGLE and no output exists at
/// `input_index`. Do not "fix" this; see [`UINT256_ONE`].
///
/// # Arguments
/// * `tx`           - The transaction being signed.
/// * `input_index`  - Index of the input being signed.
/// * `prev_script`  - The locking script of the output being spent.
/// * `sighash_type` - The combined sighash flags.
///
/// # Returns
/// A 32-byte double-SHA256 hash, or an error if `prev_script` cannot be
/// tokenized for separator stripping.
pub fn legacy_signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_script: &[u8],
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    if input_index >= tx.inputs.len() {
        return Ok(UINT256_ONE);
    }
    let base_type = sighash_type & SIGHASH_MASK;
    if base_type == SIGHASH_SINGLE && input_index >= tx.outputs.len() {
        return Ok(UINT256_ONE);
    }

    let our_script = Script::from_bytes(prev_script).without_code_separators()?;

    let mut tmp = tx.clone();

    match base_type {
        SIGHASH_NONE => {
            // No outputs are signed; other inputs' sequences are free.
            tmp.outputs.clear();
            for (i, input) in tmp.inputs.iter_mut().enumerate() {
                if i != input_index {
                    input.sequence = 0;
                }
            }
        }
        SIGHASH_SINGLE => {
            // Only the output paired with this input is signed. Outputs
            // before it are blanked, outputs after it are dropped.
            tmp.outputs.truncate(input_index + 1);
            for output in tmp.outputs.iter_mut().take(input_index) {
                *output = TransactionOutput::blank();
            }
            for (i, input) in tmp.inputs.iter_mut().enumerate() {
                if i != input_index {
                    input.sequence = 0;
                }
            }
        }
        _ => {}
    }

    if sighash_type & SIGHASH_ANYONECANPAY != 0 {
        // Only the signed input is committed to.
        let mut only = tmp.inputs.swap_remove(input_index);
        only.script_sig = our_script;
        tmp.inputs = vec![only];
    } else {
        for input in tmp.inputs.iter_mut() {
            input.script_sig = Script::new();
        }
        tmp.inputs[input_index].script_sig = our_script;
    }

    let mut writer = BtcWriter::with_capacity(tmp.byte_length(false) + 4);
    tmp.write_to(&mut writer, false);
    writer.write_u32_le(sighash_type);
    Ok(sha256d(writer.as_bytes()))
}

// -----------------------------------------------------------------------
// BIP-143 witness-v0 signature hash
// -----------------------------------------------------------------------

/// Compute the BIP-143 witness-v0 signature hash for a given input.
///
/// Unlike the legacy algorithm this one commits to the satoshi value being
/// spent, and an out-of-range `input_index` is an ordinary error; BIP-143
/// has no one-hash quirk.
///
/// # Arguments
/// * `tx`           - The transaction being signed.
/// * `input_index`  - Index of the input being signed.
/// * `prev_script`  - The scriptCode of the output being spent.
/// * `satoshis`     - The satoshi value of the output being spent.
/// * `sighash_type` - The combined sighash flags.
///
/// # Returns
/// A 32-byte double-SHA256 hash to be signed by ECDSA.
pub fn witness_v0_signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_script: &[u8],
    satoshis: u64,
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    let preimage = witness_v0_preimage(tx, input_index, prev_script, satoshis, sighash_type)?;
    Ok(sha256d(&preimage))
}

/// Compute the BIP-143 pre-image bytes before the final double hash.
///
/// The preimage consists of:
/// 1. nVersion (4 bytes LE)
/// 2. hashPrevouts (32 bytes) - sha256d of all outpoints, or zeros under
///    ANYONECANPAY
/// 3. hashSequence (32 bytes) - sha256d of all sequences, or zeros under
///    ANYONECANPAY / SINGLE / NONE
/// 4. outpoint (32+4 bytes) - txid + index of the input being signed
/// 5. scriptCode (varint + script)
/// 6. value (8 bytes LE) - satoshis of the output being spent
/// 7. nSequence (4 bytes LE) - sequence of the input being signed
/// 8. hashOutputs (32 bytes) - sha256d of all outputs, of the single paired
///    output, or zeros
/// 9. nLocktime (4 bytes LE)
/// 10. sighashType (4 bytes LE)
///
/// # Arguments
/// * `tx`           - The transaction being signed.
/// * `input_index`  - Index of the input being signed.
/// * `prev_script`  - The scriptCode of the output being spent.
/// * `satoshis`     - The satoshi value of the output being spent.
/// * `sighash_type` - The combined sighash flags.
///
/// # Returns
/// The raw preimage bytes (not yet hashed).
pub fn witness_v0_preimage(
    tx: &Transaction,
    input_index: usize,
    prev_script: &[u8],
    satoshis: u64,
    sighash_type: u32,
) -> Result<Vec<u8>, TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }

    let input = &tx.inputs[input_index];
    let base_type = sighash_type & SIGHASH_MASK;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;

    let hash_prevouts = if !anyone_can_pay {
        prevouts_hash(tx)
    } else {
        [0u8; 32]
    };

    let hash_sequence = if !anyone_can_pay
        && base_type != SIGHASH_SINGLE
        && base_type != SIGHASH_NONE
    {
        sequence_hash(tx)
    } else {
        [0u8; 32]
    };

    let hash_outputs = if base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
        outputs_hash(tx, None)
    } else if base_type == SIGHASH_SINGLE && input_index < tx.outputs.len() {
        outputs_hash(tx, Some(input_index))
    } else {
        [0u8; 32]
    };

    // Fixed fields total 156 bytes; only the scriptCode varslice varies.
    let mut writer = BtcWriter::with_capacity(
        156 + VarInt::from(prev_script.len()).length() + prev_script.len(),
    );

    writer.write_i32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    writer.write_bytes(&input.prev_txid);
    writer.write_u32_le(input.prev_index);
    writer.write_varslice(prev_script);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helper functions
// -----------------------------------------------------------------------

/// Double-SHA256 of all input outpoints concatenated (txid + index LE).
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = BtcWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.prev_txid);
        writer.write_u32_le(input.prev_index);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of all input sequence numbers concatenated (4 bytes LE each).
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = BtcWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of serialized outputs.
///
/// With `index` of `None`, all outputs are included; with `Some(n)`, only
/// the output at `n` (the SIGHASH_SINGLE case).
fn outputs_hash(tx: &Transaction, index: Option<usize>) -> [u8; 32] {
    let mut writer = BtcWriter::new();
    match index {
        None => {
            for output in &tx.outputs {
                output.write_to(&mut writer);
            }
        }
        Some(n) => tx.outputs[n].write_to(&mut writer),
    }
    sha256d(writer.as_bytes())
}
