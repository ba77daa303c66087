pub mod mmap;
pub mod write;
