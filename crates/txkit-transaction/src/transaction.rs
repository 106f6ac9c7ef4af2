//! Core transaction type.
//!
//! A complete transaction with version, inputs, outputs, and lock time.
//! Supports binary and hex serialization, transaction ID computation,
//! coinbase detection, and the cleared-inputs serialization used by the
//! legacy per-input signing procedure.

use txkit_primitives::hash::sha256d;
use txkit_primitives::util::{ByteReader, ByteWriter, VarInt};
use txkit_script::Script;

use crate::input::{Input, DEFAULT_SEQUENCE_NUMBER};
use crate::output::Output;
use crate::TransactionError;

/// Minimum possible size of an encoded transaction in bytes:
/// version(4) + varint(0 inputs)(1) + varint(0 outputs)(1) + locktime(4).
const MINIMUM_TX_SIZE: usize = 10;

/// A transaction consisting of a version, ordered inputs, ordered outputs,
/// and a lock time.
///
/// Input and output order is semantically significant: it affects both the
/// identity hash and the signature hash. The sequences are owned by the
/// transaction and reachable only through read accessors and the append
/// operations; the identity is recomputed from current contents on every
/// request.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE)              |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE)              |
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Transaction format version. Currently 1 or 2.
    pub version: u32,

    /// Lock time. If non-zero and sequences are below the sentinel, the
    /// transaction is not final until the given height or timestamp.
    pub lock_time: u32,

    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    ///
    /// # Returns
    /// A `Transaction` with no inputs or outputs.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            lock_time: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// The string must contain exactly one complete transaction.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// The decoded `Transaction`, or an error if the hex is invalid or
    /// the bytes do not form exactly one transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes =
            hex::decode(hex_str).map_err(|e| TransactionError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The byte slice must contain exactly one complete transaction with
    /// no trailing data.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// The decoded `Transaction`, or `TooShort`/`Truncated`/
    /// `TrailingBytes` describing the failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let (tx, used) = Self::from_stream(bytes)?;
        let trailing = bytes.len() - used;
        if trailing != 0 {
            return Err(TransactionError::TrailingBytes(trailing));
        }
        Ok(tx)
    }

    /// Parse one transaction from the front of a byte slice.
    ///
    /// The slice may contain further data after the transaction (for
    /// example more transactions in a block body); the number of bytes
    /// consumed is returned alongside the decoded value.
    ///
    /// # Arguments
    /// * `bytes` - Bytes starting with an encoded transaction.
    ///
    /// # Returns
    /// The decoded `Transaction` and the count of bytes consumed, or
    /// `TooShort`/`Truncated` describing the failure.
    pub fn from_stream(bytes: &[u8]) -> Result<(Self, usize), TransactionError> {
        if bytes.len() < MINIMUM_TX_SIZE {
            return Err(TransactionError::TooShort(bytes.len()));
        }

        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        Ok((tx, reader.position()))
    }

    /// Deserialize a transaction from a `ByteReader`.
    ///
    /// Reads the version, input count, inputs, output count, outputs, and
    /// lock time in wire order, advancing the reader past the transaction.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a transaction.
    ///
    /// # Returns
    /// The decoded `Transaction`, or `Truncated` naming the field that
    /// ran out of bytes.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let version = reader
            .read_u32_le()
            .map_err(|_| TransactionError::Truncated("version"))?;

        let input_count = reader
            .read_varint()
            .map_err(|_| TransactionError::Truncated("input count"))?;

        // Cap preallocation; a hostile count fails on the first short read.
        let mut inputs = Vec::with_capacity(input_count.value().min(1024) as usize);
        for _ in 0..input_count.value() {
            inputs.push(Input::read_from(reader)?);
        }

        let output_count = reader
            .read_varint()
            .map_err(|_| TransactionError::Truncated("output count"))?;

        let mut outputs = Vec::with_capacity(output_count.value().min(1024) as usize);
        for _ in 0..output_count.value() {
            outputs.push(Output::read_from(reader)?);
        }

        let lock_time = reader
            .read_u32_le()
            .map_err(|_| TransactionError::Truncated("lock time"))?;

        Ok(Transaction {
            version,
            lock_time,
            inputs,
            outputs,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw bytes.
    ///
    /// # Returns
    /// The wire-format bytes: version(4) + varint(n_in) + inputs +
    /// varint(n_out) + outputs + locktime(4).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_helper(None)
    }

    /// Serialize this transaction to a hex string.
    ///
    /// # Returns
    /// A lowercase hex-encoded string of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Serialize for the legacy per-input signing procedure.
    ///
    /// Every input is written with an empty unlocking script, except the
    /// input at `index`, which carries `locking_script` (the script of the
    /// output it spends) in place of its own. The transaction itself is
    /// not modified; the substitution exists only in the returned bytes.
    ///
    /// # Arguments
    /// * `index` - The input being signed.
    /// * `locking_script` - The spent output's locking script.
    ///
    /// # Returns
    /// The substituted wire-format bytes.
    pub fn to_bytes_with_cleared_inputs(&self, index: usize, locking_script: &Script) -> Vec<u8> {
        self.to_bytes_helper(Some((index, locking_script)))
    }

    fn to_bytes_helper(&self, substitution: Option<(usize, &Script)>) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for (i, input) in self.inputs.iter().enumerate() {
            match substitution {
                Some((index, script)) if i == index => {
                    input.write_with_script(&mut writer, script.as_bytes());
                }
                Some(_) => input.write_cleared_to(&mut writer),
                None => input.write_to(&mut writer),
            }
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID.
    ///
    /// The ID is the byte-reversed double SHA-256 of the serialized
    /// transaction, i.e. the bytes in display order. It is recomputed
    /// from the current contents on every call; appending inputs or
    /// outputs after construction changes the result.
    ///
    /// # Returns
    /// The 32 identity bytes in display order.
    pub fn tx_id(&self) -> [u8; 32] {
        let mut id = sha256d(&self.to_bytes());
        id.reverse();
        id
    }

    /// Compute the transaction ID as a hex string.
    ///
    /// # Returns
    /// A 64-character lowercase hex string of the identity bytes.
    pub fn tx_id_hex(&self) -> String {
        hex::encode(self.tx_id())
    }

    // -----------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------

    /// Append an `Input` to this transaction.
    ///
    /// # Arguments
    /// * `input` - The input to add.
    pub fn add_input(&mut self, input: Input) {
        self.inputs.push(input);
    }

    /// Return the inputs in order.
    ///
    /// # Returns
    /// A read-only slice of the inputs.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Return the input at the given index.
    ///
    /// # Arguments
    /// * `index` - The input position.
    ///
    /// # Returns
    /// `Some(&Input)` if the index is in range, otherwise `None`.
    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    /// Return the number of inputs in the transaction.
    ///
    /// # Returns
    /// The input count.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Set the unlocking script of the input at the given index.
    ///
    /// This is how the external signing subsystem attaches a produced
    /// unlocking script without gaining a mutable view of the sequence.
    ///
    /// # Arguments
    /// * `index` - The input position.
    /// * `script` - The unlocking script to store.
    ///
    /// # Returns
    /// `true` if the index was in range and the script was set.
    pub fn set_unlocking_script(&mut self, index: usize, script: Script) -> bool {
        match self.inputs.get_mut(index) {
            Some(input) => {
                input.unlocking_script = script;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------

    /// Append an `Output` to this transaction.
    ///
    /// # Arguments
    /// * `output` - The output to add.
    pub fn add_output(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Return the outputs in order.
    ///
    /// # Returns
    /// A read-only slice of the outputs.
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Return the output at the given index.
    ///
    /// # Arguments
    /// * `index` - The output position.
    ///
    /// # Returns
    /// `Some(&Output)` if the index is in range, otherwise `None`.
    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    /// Return the number of outputs in the transaction.
    ///
    /// # Returns
    /// The output count.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Compute the sum of all output satoshi values.
    ///
    /// # Returns
    /// The total satoshis across all outputs.
    pub fn total_output_satoshis(&self) -> u64 {
        self.outputs.iter().map(|o| o.satoshis).sum()
    }

    // -----------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------

    /// Determine whether this is a coinbase transaction.
    ///
    /// A coinbase transaction has exactly one input whose previous tx id
    /// is all zeros and whose previous output index or sequence number
    /// equals `0xFFFFFFFF`.
    ///
    /// # Returns
    /// `true` if this is a coinbase transaction.
    pub fn is_coinbase(&self) -> bool {
        if self.inputs.len() != 1 {
            return false;
        }

        let input = &self.inputs[0];
        if input.previous_tx_id != [0u8; 32] {
            return false;
        }

        input.previous_tx_out_index == DEFAULT_SEQUENCE_NUMBER
            || input.sequence_number == DEFAULT_SEQUENCE_NUMBER
    }

    /// Determine whether any output carries a data (OP_RETURN) script.
    ///
    /// # Returns
    /// `true` if at least one output's locking script is a data carrier.
    pub fn has_data_outputs(&self) -> bool {
        self.outputs.iter().any(|o| o.locking_script.is_data())
    }

    /// Return the size of this transaction in bytes.
    ///
    /// # Returns
    /// The byte length of the serialized transaction.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
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
