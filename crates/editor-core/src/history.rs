/// Owns a `ByteSequence` and routes every mutation through a recorded
/// `Command`, so each one can be undone and redone.
///
/// Commands only ever move between the top of `undo_stack` and the top of
/// `redo_stack`. A fresh mutation discards the whole redo branch.
#[derive(Debug)]
pub struct EditHistory {
    bytes: crate::piece_table::sequence::ByteSequence,
    undo_stack: Vec<crate::enums::Command>,
    redo_stack: Vec<crate::enums::Command>,
}

impl EditHistory {
    pub fn new(bytes: crate::piece_table::sequence::ByteSequence) -> Self {
        Self {
            bytes,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &crate::piece_table::sequence::ByteSequence {
        &self.bytes
    }

    /// See `ByteSequence::rebase`. Contents are unchanged so history stays valid.
    pub fn rebase(&mut self, original: impl Into<crate::piece_table::original::Original>) -> bool {
        self.bytes.rebase(original)
    }
}

/*

====================================
============ MUTATIONS =============
====================================

*/

impl EditHistory {
    fn record(&mut self, command: crate::enums::Command) {
        tracing::debug!(?command, "recorded");

        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Overwrites the byte at `index` with `value`.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` unless `index < len`; nothing is recorded.
    pub fn revise(&mut self, index: usize, value: u8) -> Result<(), crate::errors::OutOfRange> {
        let old_value = self.bytes.replace(index, value)?;

        self.record(crate::enums::Command::Revise {
            index,
            old_value,
            new_value: value,
        });

        Ok(())
    }

    /// Inserts `value` so it lands at `index`; `index == len` appends.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `index > len`; nothing is recorded.
    pub fn insert(&mut self, index: usize, value: u8) -> Result<(), crate::errors::OutOfRange> {
        self.bytes.insert_at(index, value)?;

        self.record(crate::enums::Command::Insert {
            index,
            inserted_value: value,
        });

        Ok(())
    }

    /// Removes the byte at `index`.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` unless `index < len`; nothing is recorded.
    pub fn remove(&mut self, index: usize) -> Result<(), crate::errors::OutOfRange> {
        let removed_value = self.bytes.delete_at(index)?;

        self.record(crate::enums::Command::Delete {
            index,
            removed_value,
        });

        Ok(())
    }
}

/*

====================================
=========== UNDO / REDO ============
====================================

*/

impl EditHistory {
    fn apply_inverse(
        &mut self,
        command: &crate::enums::Command,
    ) -> Result<(), crate::errors::OutOfRange> {
        match *command {
            crate::enums::Command::Revise {
                index, old_value, ..
            } => self.bytes.replace(index, old_value).map(drop),
            crate::enums::Command::Insert { index, .. } => self.bytes.delete_at(index).map(drop),
            crate::enums::Command::Delete {
                index,
                removed_value,
            } => self.bytes.insert_at(index, removed_value),
        }
    }

    fn apply_forward(
        &mut self,
        command: &crate::enums::Command,
    ) -> Result<(), crate::errors::OutOfRange> {
        match *command {
            crate::enums::Command::Revise {
                index, new_value, ..
            } => self.bytes.replace(index, new_value).map(drop),
            crate::enums::Command::Insert {
                index,
                inserted_value,
            } => self.bytes.insert_at(index, inserted_value),
            crate::enums::Command::Delete { index, .. } => self.bytes.delete_at(index).map(drop),
        }
    }

    /// Reverts up to `n` of the most recent commands, stopping early when
    /// the undo stack runs out. Returns how many were reverted.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` only if a recorded command no longer fits the
    ///   sequence. That command is put back and both stacks stay consistent.
    pub fn undo_n(&mut self, n: usize) -> Result<usize, crate::errors::OutOfRange> {
        let mut applied = 0;

        while applied < n {
            let Some(command) = self.undo_stack.pop() else {
                break;
            };

            if let Err(err) = self.apply_inverse(&command) {
                tracing::warn!(?command, %err, "undo could not be applied");
                self.undo_stack.push(command);

                return Err(err);
            }

            tracing::debug!(?command, "undone");
            self.redo_stack.push(command);
            applied += 1;
        }

        Ok(applied)
    }

    /// Reapplies up to `n` of the most recently undone commands, stopping
    /// early when the redo stack runs out. Returns how many were reapplied.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` under the same conditions as [`EditHistory::undo_n`].
    pub fn redo_n(&mut self, n: usize) -> Result<usize, crate::errors::OutOfRange> {
        let mut applied = 0;

        while applied < n {
            let Some(command) = self.redo_stack.pop() else {
                break;
            };

            if let Err(err) = self.apply_forward(&command) {
                tracing::warn!(?command, %err, "redo could not be applied");
                self.redo_stack.push(command);

                return Err(err);
            }

            tracing::debug!(?command, "redone");
            self.undo_stack.push(command);
            applied += 1;
        }

        Ok(applied)
    }

    /// # Errors
    ///
    /// See [`EditHistory::undo_n`].
    pub fn undo(&mut self) -> Result<bool, crate::errors::OutOfRange> {
        Ok(self.undo_n(1)? == 1)
    }

    /// # Errors
    ///
    /// See [`EditHistory::redo_n`].
    pub fn redo(&mut self) -> Result<bool, crate::errors::OutOfRange> {
        Ok(self.redo_n(1)? == 1)
    }
}

/*

====================================
============= PEEKING ==============
====================================

*/

impl EditHistory {
    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo stack, most recent first.
    pub fn undo_entries(&self) -> impl ExactSizeIterator<Item = &crate::enums::Command> + '_ {
        self.undo_stack.iter().rev()
    }

    /// Redo stack, most recently undone first.
    pub fn redo_entries(&self) -> impl ExactSizeIterator<Item = &crate::enums::Command> + '_ {
        self.redo_stack.iter().rev()
    }

    pub fn peek_undo(&self, n: usize) -> impl Iterator<Item = &crate::enums::Command> + '_ {
        self.undo_entries().take(n)
    }

    pub fn peek_redo(&self, n: usize) -> impl Iterator<Item = &crate::enums::Command> + '_ {
        self.redo_entries().take(n)
    }
}
