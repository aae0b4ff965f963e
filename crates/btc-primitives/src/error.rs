/// Unified error type for primitives operations.
///
/// Covers errors from byte-cursor reads, hash construction, and hex decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// Unexpected end of input data.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// Invalid hash value.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
