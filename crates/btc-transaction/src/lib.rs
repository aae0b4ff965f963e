/// Bitcoin transaction codec and signature-preimage engine.
///
/// Provides the Transaction type with inputs, outputs, and per-input
/// witness stacks, its canonical binary serialization in both legacy and
/// segregated-witness forms, base/total/weight/vsize accounting, and the
/// legacy and BIP-143 witness-v0 signature hash algorithms.

pub mod input;
pub mod output;
pub mod sighash;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use input::{TransactionInput, DEFAULT_SEQUENCE};
pub use output::{OutputValue, TransactionOutput};
pub use transaction::Transaction;
