//! Hash-puzzle locking script template.
//!
//! Produces `OP_HASH160 <hash160(secret)> OP_EQUALVERIFY OP_DUP
//! OP_HASH160 <pubKeyHash> OP_EQUALVERIFY OP_CHECKSIG`, a redeem
//! condition requiring both knowledge of a secret preimage and ownership
//! of the key behind the public key hash.

use txkit_primitives::hash::hash160;
use txkit_script::opcodes::*;
use txkit_script::{Script, ScriptError};

use crate::TransactionError;

/// Create a hash-puzzle locking script.
///
/// # Arguments
/// * `secret` - The secret bytes; only `hash160(secret)` enters the script.
/// * `pub_key_hash` - The 20-byte hash160 of the owning public key.
///
/// # Returns
/// The locking script, or `InvalidPublicKeyHash` if the hash is not
/// exactly 20 bytes.
pub fn lock(secret: &[u8], pub_key_hash: &[u8]) -> Result<Script, TransactionError> {
    if pub_key_hash.len() != 20 {
        return Err(ScriptError::InvalidPublicKeyHash(pub_key_hash.len()).into());
    }

    let mut script = Script::new();
    script.append_opcode(OP_HASH160)?;
    script.append_push_data(&hash160(secret))?;
    script.append_opcode(OP_EQUALVERIFY)?;
    script.append_opcode(OP_DUP)?;
    script.append_opcode(OP_HASH160)?;
    script.append_push_data(pub_key_hash)?;
    script.append_opcode(OP_EQUALVERIFY)?;
    script.append_opcode(OP_CHECKSIG)?;
    Ok(script)
}
