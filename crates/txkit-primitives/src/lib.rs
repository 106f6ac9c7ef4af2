/// txkit - Hashing and binary codec primitives.
///
/// This crate provides the foundational building blocks for txkit:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Variable-length integer encoding (VarInt)
/// - Bounds-checked binary reader/writer for wire-format data

pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
