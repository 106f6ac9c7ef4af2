/// Error type for primitives operations.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// A read required more bytes than the buffer holds.
    #[error("unexpected end of data")]
    UnexpectedEof,
}
