//! "Load more" window over a filtered result.

pub const DEFAULT_INITIAL_WINDOW: usize = 6;
pub const DEFAULT_WINDOW_INCREMENT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    window_size: usize,
    initial: usize,
    increment: usize,
}

impl PaginationCursor {
    pub fn new(initial: usize, increment: usize) -> Self {
        let initial = initial.max(1);
        Self {
            window_size: initial,
            initial,
            increment: increment.max(1),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Grow the window by one increment, never past `total`.
    pub fn load_more(&mut self, total: usize) {
        self.window_size = (self.window_size + self.increment).min(total).max(self.initial);
    }

    pub fn reset(&mut self) {
        self.window_size = self.initial;
    }

    /// Resume at a window a client already reached, e.g. from a `shown`
    /// query parameter. Clamped to `[initial, max(initial, total)]`.
    pub fn restore(&mut self, window_size: usize, total: usize) {
        self.window_size = window_size.min(total).max(self.initial);
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.window_size < total
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.window_size.min(items.len())]
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_WINDOW, DEFAULT_WINDOW_INCREMENT)
    }
}
