#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub buf_kind: crate::enums::BufferKind,
    pub range: std::ops::Range<usize>,
}

impl Piece {
    #[inline]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }
}
