//! Pay-to-public-key-hash locking script template.
//!
//! Produces the standard 25-byte locking script
//! `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.

use txkit_script::opcodes::*;
use txkit_script::{Address, Script, ScriptError};

use crate::TransactionError;

/// Create a P2PKH locking script from an address.
///
/// # Arguments
/// * `address` - The address whose public key hash to lock to.
///
/// # Returns
/// The 25-byte P2PKH locking script.
pub fn lock(address: &Address) -> Script {
    build(&address.public_key_hash)
}

/// Create a P2PKH locking script from a raw public key hash.
///
/// # Arguments
/// * `pub_key_hash` - The 20-byte hash160 of the public key.
///
/// # Returns
/// The locking script, or `InvalidPublicKeyHash` if the hash is not
/// exactly 20 bytes.
pub fn lock_pub_key_hash(pub_key_hash: &[u8]) -> Result<Script, TransactionError> {
    if pub_key_hash.len() != 20 {
        return Err(ScriptError::InvalidPublicKeyHash(pub_key_hash.len()).into());
    }
    Ok(build(pub_key_hash))
}

fn build(pub_key_hash: &[u8]) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(pub_key_hash);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script::from_bytes(&bytes)
}
