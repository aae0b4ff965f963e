#![deny(missing_docs)]

//! BTC transaction codec - complete workspace surface.
//!
//! Re-exports all member crates for convenient single-crate usage: the
//! transaction model with its segwit wire codec and signature hashing,
//! the script newtype, and the byte-level primitives.

pub use btc_primitives as primitives;
pub use btc_script as script;
pub use btc_transaction as transaction;
