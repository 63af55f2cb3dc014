//! Focus cycling over a form whose size is known only at runtime.

/// Tracks which of `len` slots has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing {
    len: usize,
    focused: usize,
}

impl FocusRing {
    /// A ring over `len` slots, focused on the first.
    pub fn new(len: usize) -> Self {
        Self { len, focused: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn is_focused(&self, index: usize) -> bool {
        !self.is_empty() && self.focused == index
    }

    /// Move to the next slot, wrapping after the last.
    pub fn next(&mut self) -> usize {
        if !self.is_empty() {
            self.focused = (self.focused + 1) % self.len;
        }
        self.focused
    }

    /// Move to the previous slot, wrapping before the first.
    pub fn prev(&mut self) -> usize {
        if !self.is_empty() {
            self.focused = (self.focused + self.len - 1) % self.len;
        }
        self.focused
    }

    /// Jump to `index`, clamped to the last slot.
    pub fn focus(&mut self, index: usize) -> usize {
        self.focused = index.min(self.len.saturating_sub(1));
        self.focused
    }
}
