//! Bitcoin script opcode constants.
//!
//! Only the opcodes the codec and its tests touch are named here; the
//! direct push range 0x01..=0x4b is handled numerically by the chunk codec.

/// Push an empty byte vector onto the stack.
pub const OP_0: u8 = 0x00;
/// Direct push of 1 byte (lower bound of the direct push range).
pub const OP_DATA_1: u8 = 0x01;
/// Direct push of 20 bytes (a hash160 payload).
pub const OP_DATA_20: u8 = 0x14;
/// Direct push of 32 bytes (a sha256 payload).
pub const OP_DATA_32: u8 = 0x20;
/// Direct push of 75 bytes (upper bound of the direct push range).
pub const OP_DATA_75: u8 = 0x4b;
/// Push data with a 1-byte length prefix.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push data with a 2-byte little-endian length prefix.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push data with a 4-byte little-endian length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number -1 onto the stack.
pub const OP_1NEGATE: u8 = 0x4f;
/// Push the number 1 onto the stack.
pub const OP_1: u8 = 0x51;
/// Push the number 16 onto the stack.
pub const OP_16: u8 = 0x60;

/// No operation.
pub const OP_NOP: u8 = 0x61;
/// Conditional execution start.
pub const OP_IF: u8 = 0x63;
/// Inverted conditional execution start.
pub const OP_NOTIF: u8 = 0x64;
/// Conditional alternative branch.
pub const OP_ELSE: u8 = 0x67;
/// Conditional execution end.
pub const OP_ENDIF: u8 = 0x68;
/// Fail unless the top stack value is truthy.
pub const OP_VERIFY: u8 = 0x69;
/// Mark the output as unspendable.
pub const OP_RETURN: u8 = 0x6a;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Push 1 if the top two items are equal, 0 otherwise.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL followed by OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;

/// SHA-256 the top stack item.
pub const OP_SHA256: u8 = 0xa8;
/// RIPEMD-160(SHA-256(x)) the top stack item.
pub const OP_HASH160: u8 = 0xa9;
/// Double SHA-256 the top stack item.
pub const OP_HASH256: u8 = 0xaa;
/// Signature-hash scope separator, stripped before legacy signing.
pub const OP_CODESEPARATOR: u8 = 0xab;
/// Verify an ECDSA signature against the transaction.
pub const OP_CHECKSIG: u8 = 0xac;
/// OP_CHECKSIG followed by OP_VERIFY.
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
/// Verify m-of-n ECDSA signatures.
pub const OP_CHECKMULTISIG: u8 = 0xae;
/// OP_CHECKMULTISIG followed by OP_VERIFY.
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;
