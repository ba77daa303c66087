pub type EditorResult<T> = Result<T, EditorError>;

/// An index argument fell outside the valid bound for the operation.
///
/// `len` is the sequence length at the time of the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("index {index} out of range (len={len})")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Errors surfaced at the load/save boundary.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
