/// Error types for script operations.
///
/// Covers script building and parsing failures, push-data size limits,
/// and address decoding problems.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid hex string at a text-to-byte boundary.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Attempted to append a push-data opcode through `append_opcode`.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Invalid push-data token encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// Not enough bytes in the script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds the maximum representable length.
    #[error("data too big")]
    DataTooBig,

    /// A push-data part in a multi-push sequence exceeds the length limit.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    /// Script is empty when a non-empty script was expected.
    #[error("script is empty")]
    EmptyScript,

    /// Script is not a pay-to-public-key-hash script.
    #[error("not a P2PKH")]
    NotP2PKH,

    /// A public key hash had the wrong byte length.
    #[error("invalid public key hash length: {0} bytes, want 20")]
    InvalidPublicKeyHash(usize),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58 decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte not supported (not P2PKH mainnet/testnet).
    #[error("address not supported {0}")]
    UnsupportedAddress(String),

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    ChecksumFailed,
}
