#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Original,
    Add,
}

/// One applied mutation, with enough information to replay or invert it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Revise {
        index: usize,
        old_value: u8,
        new_value: u8,
    },
    Insert {
        /// Position the new byte occupies after the insertion.
        index: usize,
        inserted_value: u8,
    },
    Delete {
        index: usize,
        removed_value: u8,
    },
}

impl Command {
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            Command::Revise { index, .. }
            | Command::Insert { index, .. }
            | Command::Delete { index, .. } => index,
        }
    }
}
