//! Read-only text views over a byte document and the parser for the
//! command line that drives it.

pub mod command;
pub mod render;

/// Bytes per hex row when none is configured.
pub const DEFAULT_ROW_WIDTH: usize = 8;
/// History entries shown per panel when none is configured.
pub const DEFAULT_HISTORY_ROWS: usize = 9;
