/// Script type - a sequence of opcodes and data pushes.
///
/// Scripts appear in transaction inputs (unlocking) and outputs (locking)
/// to carry spending conditions. `Script` wraps a `Vec<u8>` and provides
/// construction, classification, and rendering; it never interprets
/// script semantics beyond recognizing known byte shapes.

use std::fmt;

use crate::chunk::{decode_script, encode_push_datas, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A script program, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    ///
    /// # Returns
    /// An empty `Script`.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or `InvalidHex`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// A `Script` wrapping a copy of the given bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from an ASM string.
    ///
    /// Space-separated tokens: known opcode names are emitted directly,
    /// anything else is hex-decoded and appended as push data.
    ///
    /// # Arguments
    /// * `asm` - A space-separated ASM string.
    ///
    /// # Returns
    /// A `Script`, or an error if any token is invalid.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        if asm.is_empty() {
            return Ok(script);
        }
        for token in asm.split(' ') {
            match string_to_opcode(token) {
                Some(op) => script.append_opcode(op)?,
                None => script.append_push_data_hex(token)?,
            }
        }
        Ok(script)
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    ///
    /// # Returns
    /// The hex representation of the script bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Convert the script to its ASM (human-readable) representation.
    ///
    /// Each opcode or data push becomes a space-separated token; pushes
    /// render as hex, opcodes by name.
    ///
    /// # Returns
    /// The ASM string. Empty or malformed scripts render as "".
    pub fn to_asm(&self) -> String {
        let chunks = match self.chunks() {
            Ok(chunks) => chunks,
            Err(_) => return String::new(),
        };
        chunks
            .iter()
            .map(|c| c.to_asm_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Return a reference to the underlying bytes.
    ///
    /// # Returns
    /// A byte slice of the script contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    ///
    /// # Returns
    /// The number of bytes in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty.
    ///
    /// # Returns
    /// `true` if the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Append a single opcode byte.
    ///
    /// Push-data opcodes (OP_DATA_1..OP_PUSHDATA4) are rejected; use
    /// `append_push_data` for those so the length prefix is correct.
    ///
    /// # Arguments
    /// * `op` - The opcode byte to append.
    ///
    /// # Returns
    /// `Ok(())`, or `InvalidOpcodeType` for a push-data opcode.
    pub fn append_opcode(&mut self, op: u8) -> Result<(), ScriptError> {
        if (OP_DATA_1..=OP_PUSHDATA4).contains(&op) {
            return Err(ScriptError::InvalidOpcodeType(
                opcode_to_string(op).to_string(),
            ));
        }
        self.0.push(op);
        Ok(())
    }

    /// Append data bytes with the minimal push prefix.
    ///
    /// Direct length byte for 0-75 bytes, OP_PUSHDATA1 for up to 255,
    /// OP_PUSHDATA2 for up to 65535, OP_PUSHDATA4 beyond that.
    ///
    /// # Arguments
    /// * `data` - The data bytes to push.
    ///
    /// # Returns
    /// `Ok(())`, or `DataTooBig` if the length is not representable.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append hex-encoded data with the minimal push prefix.
    ///
    /// # Arguments
    /// * `hex_str` - Hex string to decode and push.
    ///
    /// # Returns
    /// `Ok(())`, or an error if the hex is invalid or the data too large.
    pub fn append_push_data_hex(&mut self, hex_str: &str) -> Result<(), ScriptError> {
        let data = hex::decode(hex_str).map_err(|_| ScriptError::InvalidOpcodeData)?;
        self.append_push_data(&data)
    }

    /// Append one push per element of `parts`, in order.
    ///
    /// The whole sequence is assembled before anything is appended, so a
    /// part that fails to encode leaves the script untouched.
    ///
    /// # Arguments
    /// * `parts` - Slice of data byte slices to push.
    ///
    /// # Returns
    /// `Ok(())`, or `PartTooBig(i)` naming the first oversized part.
    pub fn append_push_data_array(&mut self, parts: &[&[u8]]) -> Result<(), ScriptError> {
        let encoded = encode_push_datas(parts)?;
        self.0.extend_from_slice(&encoded);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// Check if this is a pay-to-public-key-hash locking script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Returns
    /// `true` if the script matches the P2PKH shape.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check if this is a pay-to-script-hash locking script.
    ///
    /// Pattern: OP_HASH160 <20 bytes> OP_EQUAL
    ///
    /// # Returns
    /// `true` if the script matches the P2SH shape.
    pub fn is_p2sh(&self) -> bool {
        let b = &self.0;
        b.len() == 23 && b[0] == OP_HASH160 && b[1] == OP_DATA_20 && b[22] == OP_EQUAL
    }

    /// Check if this is a data-carrier script.
    ///
    /// # Returns
    /// `true` if the script begins with OP_RETURN or OP_FALSE OP_RETURN.
    pub fn is_data(&self) -> bool {
        let b = &self.0;
        (!b.is_empty() && b[0] == OP_RETURN)
            || (b.len() > 1 && b[0] == OP_FALSE && b[1] == OP_RETURN)
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// Extract the public key hash from a P2PKH locking script.
    ///
    /// # Returns
    /// The 20-byte public key hash, or an error if the script does not
    /// start with OP_DUP OP_HASH160 followed by a push.
    pub fn public_key_hash(&self) -> Result<Vec<u8>, ScriptError> {
        if self.0.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        if self.0.len() <= 2 || self.0[0] != OP_DUP || self.0[1] != OP_HASH160 {
            return Err(ScriptError::NotP2PKH);
        }
        let chunks = decode_script(&self.0[2..])?;
        chunks
            .first()
            .and_then(|chunk| chunk.data.clone())
            .ok_or(ScriptError::NotP2PKH)
    }

    /// Parse the script into a vector of decoded chunks.
    ///
    /// # Returns
    /// The chunk sequence, or an error if a push is truncated.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
