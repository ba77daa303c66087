/// Ordered, position-indexed sequence of bytes.
///
/// Stored as a piece table: unedited bytes are read straight from
/// [`Original`](crate::piece_table::original::Original), every written byte
/// is appended to `add`, and `pieces` lists the visible ranges in order.
#[derive(Debug)]
pub struct ByteSequence {
    original: crate::piece_table::original::Original,
    /// Append-only buffer holding every byte written by a mutation.
    add: Vec<u8>,
    pieces: Vec<crate::piece_table::piece::Piece>,
    /// Sum of all piece lengths.
    len: usize,
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl ByteSequence {
    pub fn new(original: impl Into<crate::piece_table::original::Original>) -> Self {
        let original = original.into();
        let len = original.len();
        let mut pieces = Vec::new();

        if len > 0 {
            pieces.push(crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Original,
                range: 0..len,
            });
        }

        Self {
            original,
            add: Vec::with_capacity(crate::piece_table::BASELINE_CAPACITY),
            pieces,
            len,
        }
    }

    /// One element per input byte, in order.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl ByteSequence {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn out_of_range(&self, index: usize) -> crate::errors::OutOfRange {
        crate::errors::OutOfRange {
            index,
            len: self.len,
        }
    }

    #[inline]
    fn slice_of(&self, piece: &crate::piece_table::piece::Piece) -> &[u8] {
        match piece.buf_kind {
            crate::enums::BufferKind::Original => &self.original.as_slice()[piece.range.clone()],
            crate::enums::BufferKind::Add => &self.add[piece.range.clone()],
        }
    }

    /// Piece index and offset inside it for a position strictly below `len`.
    #[inline]
    fn locate(&self, mut pos: usize) -> Option<(usize, usize)> {
        for (idx, piece) in self.pieces.iter().enumerate() {
            let piece_len = piece.len();

            if pos < piece_len {
                return Some((idx, pos));
            }

            pos -= piece_len;
        }

        None
    }
}

/*

=====================================
============== READING ==============
=====================================

*/

impl ByteSequence {
    /// # Errors
    ///
    /// - [`OutOfRange`](crate::errors::OutOfRange) unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<u8, crate::errors::OutOfRange> {
        let (idx, offset) = self.locate(index).ok_or(self.out_of_range(index))?;

        Ok(self.slice_of(&self.pieces[idx])[offset])
    }

    /// Copies `count` bytes starting at `start`.
    ///
    /// # Errors
    ///
    /// - [`OutOfRange`](crate::errors::OutOfRange) if the window ends past `len()`.
    pub fn get_range(&self, start: usize, count: usize) -> Result<Vec<u8>, crate::errors::OutOfRange> {
        let end = start
            .checked_add(count)
            .filter(|end| *end <= self.len)
            .ok_or(self.out_of_range(start.saturating_add(count)))?;
        let mut res = Vec::with_capacity(count);
        let mut pos = 0;

        for chunk in self.iter_chunks() {
            let chunk_end = pos + chunk.len();

            if chunk_end > start && pos < end {
                let from = start.saturating_sub(pos);
                let to = chunk.len().min(end - pos);

                res.extend_from_slice(&chunk[from..to]);
            }

            if chunk_end >= end {
                break;
            }

            pos = chunk_end;
        }

        Ok(res)
    }

    /// Zero-copy slices of the sequence, in order.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pieces.iter().map(|piece| self.slice_of(piece))
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.iter_chunks().flat_map(|chunk| chunk.iter().copied())
    }

    /// Full contents, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.len);

        for chunk in self.iter_chunks() {
            res.extend_from_slice(chunk);
        }

        res
    }

    /// Whether the sequence holds exactly `other`.
    #[must_use]
    pub fn matches(&self, other: &[u8]) -> bool {
        let mut rest = other;

        for chunk in self.iter_chunks() {
            let Some((head, tail)) = rest.split_at_checked(chunk.len()) else {
                return false;
            };

            if head != chunk {
                return false;
            }

            rest = tail;
        }

        rest.is_empty()
    }
}

/*

=====================================
====== REPLACE / INSERT / DELETE ====
=====================================

*/

impl ByteSequence {
    /// Makes `pos` a piece boundary and returns the index of the piece that
    /// starts there (`pieces.len()` when `pos == len`). Requires `pos <= len`.
    fn split_at(&mut self, pos: usize) -> usize {
        let mut start = 0;

        for idx in 0..self.pieces.len() {
            let piece_len = self.pieces[idx].len();

            if pos == start {
                return idx;
            }

            if pos < start + piece_len {
                let piece = self.pieces[idx].clone();
                let cut = piece.range.start + (pos - start);

                self.pieces.splice(
                    idx..=idx,
                    [
                        crate::piece_table::piece::Piece {
                            buf_kind: piece.buf_kind,
                            range: piece.range.start..cut,
                        },
                        crate::piece_table::piece::Piece {
                            buf_kind: piece.buf_kind,
                            range: cut..piece.range.end,
                        },
                    ],
                );

                return idx + 1;
            }

            start += piece_len;
        }

        self.pieces.len()
    }

    fn push_add(&mut self, value: u8) -> std::ops::Range<usize> {
        let start = self.add.len();

        self.add.push(value);

        start..start + 1
    }

    /// Extends the piece before `idx` when `range` continues it in the add buffer.
    fn merge_into_previous(&mut self, idx: usize, range: &std::ops::Range<usize>) -> bool {
        if let Some(prev) = idx.checked_sub(1).and_then(|i| self.pieces.get_mut(i))
            && prev.buf_kind == crate::enums::BufferKind::Add
            && prev.range.end == range.start
        {
            prev.range.end = range.end;

            return true;
        }

        false
    }

    /// Overwrites the byte at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// - [`OutOfRange`](crate::errors::OutOfRange) unless `index < len()`.
    pub fn replace(&mut self, index: usize, value: u8) -> Result<u8, crate::errors::OutOfRange> {
        let old_value = self.get(index)?;
        let idx = self.split_at(index);

        self.split_at(index + 1);

        let range = self.push_add(value);

        if self.merge_into_previous(idx, &range) {
            self.pieces.remove(idx);
        } else {
            self.pieces[idx] = crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Add,
                range,
            };
        }

        Ok(old_value)
    }

    /// Inserts `value` so that it ends up at `index`; `index == len()` appends.
    ///
    /// # Errors
    ///
    /// - [`OutOfRange`](crate::errors::OutOfRange) if `index > len()`.
    pub fn insert_at(&mut self, index: usize, value: u8) -> Result<(), crate::errors::OutOfRange> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }

        let idx = self.split_at(index);
        let range = self.push_add(value);

        if !self.merge_into_previous(idx, &range) {
            self.pieces.insert(
                idx,
                crate::piece_table::piece::Piece {
                    buf_kind: crate::enums::BufferKind::Add,
                    range,
                },
            );
        }

        self.len += 1;

        Ok(())
    }

    /// Removes the byte at `index`, shifting the tail down by one.
    ///
    /// # Errors
    ///
    /// - [`OutOfRange`](crate::errors::OutOfRange) unless `index < len()`.
    pub fn delete_at(&mut self, index: usize) -> Result<u8, crate::errors::OutOfRange> {
        let removed_value = self.get(index)?;
        let idx = self.split_at(index);

        self.pieces[idx].range.start += 1;

        if self.pieces[idx].is_empty() {
            self.pieces.remove(idx);
        }

        self.len -= 1;

        Ok(removed_value)
    }
}

/*

=================
===== REBASE ====
=================

*/

impl ByteSequence {
    /// Swaps the backing store for `original` once it is known to hold the
    /// current contents, typically the file that was just saved.
    ///
    /// Collapses all pieces into one and drops the add buffer. Returns
    /// `false` and keeps the current layout if `original` differs.
    pub fn rebase(&mut self, original: impl Into<crate::piece_table::original::Original>) -> bool {
        let original = original.into();

        if original.len() != self.len || !self.matches(original.as_slice()) {
            tracing::warn!(
                expected = self.len,
                found = original.len(),
                "rebase skipped, new source does not match sequence"
            );

            return false;
        }

        self.original = original;
        self.add.clear();

        if self.add.capacity() > crate::piece_table::BASELINE_CAPACITY {
            self.add.shrink_to(crate::piece_table::BASELINE_CAPACITY);
        }

        self.pieces.clear();

        if self.len > 0 {
            self.pieces.push(crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Original,
                range: 0..self.len,
            });
        }

        true
    }
}
