//! A byte document bound to a file on disk.
//!
//! [`document::Document`] is the only place bytes enter or leave the
//! process: [`document::Document::open`] decodes the file into an
//! [`editor_core::history::EditHistory`], [`document::Document::save`]
//! writes the current sequence back.

pub mod document;
