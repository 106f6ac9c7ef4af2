//! Transaction output with satoshi value and locking script.
//!
//! The locking script defines the conditions under which the output's
//! value may be spent. Provides binary serialization following the wire
//! format, plus constructors for the standard output types.
//!
//! # Wire format
//!
//! | Field          | Size         |
//! |----------------|--------------|
//! | satoshis       | 8 bytes (LE) |
//! | script length  | VarInt       |
//! | locking_script | variable     |

use txkit_primitives::util::{ByteReader, ByteWriter, VarInt};
use txkit_script::{Address, Script};

use crate::template;
use crate::TransactionError;

/// A single transaction output.
///
/// Each output specifies a `satoshis` value (64-bit, in the smallest
/// currency unit, no overflow checking beyond the type width) and a
/// `locking_script` defining the spending condition.
#[derive(Clone, Debug)]
pub struct Output {
    /// The number of satoshis locked by this output.
    pub satoshis: u64,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub locking_script: Script,
}

impl Output {
    /// Create a new `Output` with zero satoshis and an empty script.
    ///
    /// # Returns
    /// A default `Output`.
    pub fn new() -> Self {
        Output {
            satoshis: 0,
            locking_script: Script::new(),
        }
    }

    // -----------------------------------------------------------------
    // Standard output constructors
    // -----------------------------------------------------------------

    /// Create a P2PKH output paying to a hex-encoded public key hash.
    ///
    /// # Arguments
    /// * `pub_key_hash_hex` - The 20-byte hash160 as a 40-character hex string.
    /// * `satoshis` - The output value.
    ///
    /// # Returns
    /// The output, or an error if the hex is invalid or the hash is not
    /// 20 bytes.
    pub fn new_p2pkh_from_pub_key_hash_str(
        pub_key_hash_hex: &str,
        satoshis: u64,
    ) -> Result<Self, TransactionError> {
        let pkh = hex::decode(pub_key_hash_hex)
            .map_err(|e| TransactionError::InvalidHex(e.to_string()))?;
        Ok(Output {
            satoshis,
            locking_script: template::p2pkh::lock_pub_key_hash(&pkh)?,
        })
    }

    /// Create a P2PKH output paying to a Base58Check address.
    ///
    /// # Arguments
    /// * `addr` - The address string.
    /// * `satoshis` - The output value.
    ///
    /// # Returns
    /// The output, or an address decoding error.
    pub fn new_p2pkh_from_address(addr: &str, satoshis: u64) -> Result<Self, TransactionError> {
        let address = Address::from_string(addr)?;
        Ok(Output {
            satoshis,
            locking_script: template::p2pkh::lock(&address),
        })
    }

    /// Create a hash-puzzle output requiring a secret preimage and a key.
    ///
    /// # Arguments
    /// * `secret` - The secret; only its hash160 enters the script.
    /// * `pub_key_hash_hex` - The owning public key hash as hex.
    /// * `satoshis` - The output value.
    ///
    /// # Returns
    /// The output, or an error for invalid hex or a wrong-length hash.
    pub fn new_hash_puzzle(
        secret: &str,
        pub_key_hash_hex: &str,
        satoshis: u64,
    ) -> Result<Self, TransactionError> {
        let pkh = hex::decode(pub_key_hash_hex)
            .map_err(|e| TransactionError::InvalidHex(e.to_string()))?;
        Ok(Output {
            satoshis,
            locking_script: template::hash_puzzle::lock(secret.as_bytes(), &pkh)?,
        })
    }

    /// Create an unspendable data-carrier output holding a single payload.
    ///
    /// # Arguments
    /// * `data` - The payload bytes, emitted as one push.
    ///
    /// # Returns
    /// A zero-value output, or an error if the payload is too large to push.
    pub fn new_op_return(data: &[u8]) -> Result<Self, TransactionError> {
        Ok(Output {
            satoshis: 0,
            locking_script: template::data::lock(&[data])?,
        })
    }

    /// Create an unspendable data-carrier output holding multiple payloads.
    ///
    /// Each part becomes its own push, in slice order.
    ///
    /// # Arguments
    /// * `parts` - The payload parts.
    ///
    /// # Returns
    /// A zero-value output, or an error naming the first oversized part.
    pub fn new_op_return_parts(parts: &[&[u8]]) -> Result<Self, TransactionError> {
        Ok(Output {
            satoshis: 0,
            locking_script: template::data::lock(parts)?,
        })
    }

    // -----------------------------------------------------------------
    // Wire codec
    // -----------------------------------------------------------------

    /// Deserialize an `Output` from a `ByteReader`.
    ///
    /// Reads 8-byte LE satoshis, a VarInt script length, and the script
    /// bytes.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// The decoded `Output`, or `Truncated` naming the field that ran out.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let satoshis = reader
            .read_u64_le()
            .map_err(|_| TransactionError::Truncated("output satoshis"))?;

        let script_len = reader
            .read_varint()
            .map_err(|_| TransactionError::Truncated("output script length"))?;

        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|_| TransactionError::Truncated("locking script"))?;

        Ok(Output {
            satoshis,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this `Output` into a `ByteWriter`.
    ///
    /// Writes 8-byte LE satoshis, a minimal VarInt script length, and the
    /// script bytes.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire-format bytes to.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.satoshis);
        writer.write_varint(VarInt::from(self.locking_script.len()));
        writer.write_bytes(self.locking_script.as_bytes());
    }

    /// Serialize this output to a byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(9 + self.locking_script.len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize this output for signature hash computation.
    ///
    /// The layout is identical to `to_bytes`; the external signing
    /// subsystem requires outputs serialized exactly as the wire format.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the serialized output.
    pub fn bytes_for_sig_hash(&self) -> Vec<u8> {
        self.to_bytes()
    }

    /// Return the locking script as a hex-encoded string.
    ///
    /// # Returns
    /// A lowercase hex string of the locking script bytes.
    pub fn locking_script_hex(&self) -> String {
        self.locking_script.to_hex()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "value:     {}\nscriptLen: {}\nscript:    {}",
            self.satoshis,
            self.locking_script.len(),
            self.locking_script.to_hex(),
        )
    }
}
