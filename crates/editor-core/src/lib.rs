//! Editable byte sequence with command-based undo/redo.
//!
//! [`piece_table::sequence::ByteSequence`] holds the bytes, and
//! [`history::EditHistory`] owns it and records every mutation as an
//! invertible [`enums::Command`].

pub mod enums;
pub mod errors;
pub mod history;
pub mod piece_table;
