/// txkit - Script building, parsing, and address handling.
///
/// Provides the opaque `Script` type, opcode definitions, script chunk
/// parsing, and P2PKH address encoding/decoding. Scripts are treated as
/// byte programs: this crate emits and recognizes known opcode shapes but
/// never executes them.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{Address, Network};
pub use chunk::ScriptChunk;
