//! Data-carrier (OP_RETURN) locking script template.
//!
//! Produces `OP_FALSE OP_RETURN` followed by one push per payload part,
//! in order. The leading OP_FALSE makes the output provably unspendable;
//! the pushes carry arbitrary application data without delimiter
//! ambiguity.

use txkit_script::opcodes::*;
use txkit_script::Script;

use crate::TransactionError;

/// Create a data-carrier locking script.
///
/// The parts are pushed in slice order. Assembly is atomic: if any part
/// exceeds the representable push length the script is not produced.
///
/// # Arguments
/// * `parts` - The data payloads, one push each.
///
/// # Returns
/// The locking script, or `PartTooBig` naming the oversized part.
pub fn lock(parts: &[&[u8]]) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.append_opcode(OP_FALSE)?;
    script.append_opcode(OP_RETURN)?;
    script.append_push_data_array(parts)?;
    Ok(script)
}
