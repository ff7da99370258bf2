/// Position of the displayed question, clamped to `0..len`.
///
/// Out-of-range moves are ignored rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.len
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Navigation controls only make sense with more than one question.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.len > 1
    }

    /// Returns `true` if the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns `true` if the cursor moved.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to `index` if it is in range. Returns `true` if it was accepted.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
