/// # Piece Table Module.
///
/// Backing store for the editable byte sequence: an immutable original
/// buffer, an append-only add buffer and the ordered pieces over both.
pub mod original;
pub mod piece;
pub mod sequence;

/// Capacity the add buffer starts with and is shrunk back to after a rebase.
pub const BASELINE_CAPACITY: usize = 4096;
