//! Locking-script templates for the standard output types.
//!
//! Each template assembles the opcode sequence for one supported spending
//! condition: pay-to-public-key-hash, hash puzzle, and the unspendable
//! data carrier. Templates produce `Script` values only; signing the
//! corresponding unlocking scripts belongs to the external signing
//! subsystem.

pub mod data;
pub mod hash_puzzle;
pub mod p2pkh;
