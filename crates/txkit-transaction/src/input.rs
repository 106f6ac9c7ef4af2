//! Transaction input referencing a previous output.
//!
//! Carries the previous transaction ID, output index, unlocking script,
//! and sequence number, with binary serialization following the wire
//! format. The input owns its script bytes outright; it holds no
//! reference back to the transaction or output being spent.

use txkit_primitives::util::{ByteReader, ByteWriter, VarInt};
use txkit_script::Script;

use crate::TransactionError;

/// Default sequence number marking a finalized input.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single transaction input.
///
/// References an output of a previous transaction by its transaction ID
/// (`previous_tx_id`, in wire byte order) and output index. The
/// `unlocking_script` supplies the data that satisfies the referenced
/// output's locking script; it is empty until the input is signed.
///
/// # Wire format
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | previous_tx_id     | 32 bytes         |
/// | previous_tx_out_index | 4 bytes (LE)  |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence_number    | 4 bytes (LE)     |
#[derive(Clone, Debug)]
pub struct Input {
    /// The 32-byte ID of the transaction whose output is being spent, in
    /// wire (internal) byte order. Displayed reversed by convention.
    pub previous_tx_id: [u8; 32],

    /// Index of the output within the previous transaction.
    pub previous_tx_out_index: u32,

    /// The unlocking script (scriptSig). Empty when unsigned.
    pub unlocking_script: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,
}

impl Input {
    /// Create a new `Input` with default values.
    ///
    /// The previous tx id is zeroed, the output index is 0, the script is
    /// empty, and the sequence is finalized.
    ///
    /// # Returns
    /// A default `Input`.
    pub fn new() -> Self {
        Input {
            previous_tx_id: [0u8; 32],
            previous_tx_out_index: 0,
            unlocking_script: Script::new(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
        }
    }

    /// Create an input spending the given output of a previous transaction.
    ///
    /// # Arguments
    /// * `prev_tx_id_hex` - The previous transaction ID as a 64-character
    ///   hex string in display (reversed) byte order.
    /// * `vout` - The output index being spent.
    ///
    /// # Returns
    /// An unsigned `Input`, or `InvalidHex` if the ID is not 32 hex bytes.
    pub fn from_utxo(prev_tx_id_hex: &str, vout: u32) -> Result<Self, TransactionError> {
        let decoded = hex::decode(prev_tx_id_hex)
            .map_err(|e| TransactionError::InvalidHex(e.to_string()))?;
        if decoded.len() != 32 {
            return Err(TransactionError::InvalidHex(format!(
                "txid must be 32 bytes, got {}",
                decoded.len()
            )));
        }

        // Display order is the reverse of wire order.
        let mut previous_tx_id = [0u8; 32];
        for (i, b) in decoded.iter().rev().enumerate() {
            previous_tx_id[i] = *b;
        }

        Ok(Input {
            previous_tx_id,
            previous_tx_out_index: vout,
            unlocking_script: Script::new(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
        })
    }

    /// Deserialize an `Input` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// The decoded `Input`, or `Truncated` naming the field that ran out.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader
            .read_bytes(32)
            .map_err(|_| TransactionError::Truncated("input previous tx id"))?;
        let mut previous_tx_id = [0u8; 32];
        previous_tx_id.copy_from_slice(txid_bytes);

        let previous_tx_out_index = reader
            .read_u32_le()
            .map_err(|_| TransactionError::Truncated("input previous output index"))?;

        let script_len = reader
            .read_varint()
            .map_err(|_| TransactionError::Truncated("input script length"))?;

        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|_| TransactionError::Truncated("unlocking script"))?;

        let sequence_number = reader
            .read_u32_le()
            .map_err(|_| TransactionError::Truncated("input sequence number"))?;

        Ok(Input {
            previous_tx_id,
            previous_tx_out_index,
            unlocking_script: Script::from_bytes(script_bytes),
            sequence_number,
        })
    }

    /// Serialize this `Input` into a `ByteWriter`.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire-format bytes to.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        self.write_with_script(writer, self.unlocking_script.as_bytes());
    }

    /// Serialize this `Input` with a zero-length unlocking script.
    ///
    /// Used when building the per-input signing serialization, where every
    /// input except the one being signed is written with its script
    /// cleared.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire-format bytes to.
    pub fn write_cleared_to(&self, writer: &mut ByteWriter) {
        self.write_with_script(writer, &[]);
    }

    /// Serialize this `Input` with the given bytes in place of its
    /// unlocking script. All other fields are written as stored.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire-format bytes to.
    /// * `script` - The script bytes to write, with a VarInt length prefix.
    pub fn write_with_script(&self, writer: &mut ByteWriter, script: &[u8]) {
        writer.write_bytes(&self.previous_tx_id);
        writer.write_u32_le(self.previous_tx_out_index);
        writer.write_varint(VarInt::from(script.len()));
        writer.write_bytes(script);
        writer.write_u32_le(self.sequence_number);
    }

    /// Serialize this input to a byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(40 + self.unlocking_script.len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Return the previous transaction ID as a display-order hex string.
    ///
    /// # Returns
    /// A 64-character hex string with the bytes reversed from wire order.
    pub fn previous_tx_id_hex(&self) -> String {
        let mut id = self.previous_tx_id;
        id.reverse();
        hex::encode(id)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "prevTxId:  {}\nprevOut:   {}\nscriptLen: {}\nscript:    {}\nsequence:  {:08x}",
            self.previous_tx_id_hex(),
            self.previous_tx_out_index,
            self.unlocking_script.len(),
            self.unlocking_script.to_hex(),
            self.sequence_number,
        )
    }
}
