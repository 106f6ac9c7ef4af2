use txkit_primitives::PrimitivesError;
use txkit_script::ScriptError;

/// Error types for transaction codec operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The buffer is below the 10-byte minimum transaction size.
    #[error("too short to be a transaction: {0} bytes, even an empty transaction has 10")]
    TooShort(usize),

    /// The buffer holds more than one decoded transaction's worth of bytes.
    #[error("trailing {0} bytes after transaction")]
    TrailingBytes(usize),

    /// The buffer ran out while reading the named field.
    #[error("truncated input while reading {0}")]
    Truncated(&'static str),

    /// Invalid hex at a text-to-byte boundary.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// An underlying script error (forwarded from `txkit-script`).
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// An underlying primitives error (forwarded from `txkit-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}
