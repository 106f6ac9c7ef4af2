#![deny(missing_docs)]

//! txkit - Ledger transaction wire codec and locking-script builders.
//!
//! Re-exports all txkit components for convenient single-crate usage.

pub use txkit_primitives as primitives;
pub use txkit_script as script;
pub use txkit_transaction as transaction;
