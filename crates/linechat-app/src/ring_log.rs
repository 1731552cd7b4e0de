//! Fixed-capacity line log.

/// Insertion-ordered log that overwrites its oldest line once full.
///
/// All slots are allocated up front and never reallocated.
#[derive(Debug, Clone)]
pub struct RingLog {
    lines: Box<[String]>,
    /// Slot the next append writes to.
    oldest: usize,
    /// Lines written so far, saturating at capacity.
    len: usize,
}

impl RingLog {
    /// Create an empty log. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { lines: vec![String::new(); capacity].into_boxed_slice(), oldest: 0, len: 0 }
    }

    /// Append a line, discarding the oldest one when full.
    pub fn append(&mut self, line: impl Into<String>) {
        let capacity = self.capacity();
        if let Some(slot) = self.lines.get_mut(self.oldest) {
            *slot = line.into();
        }
        self.oldest = (self.oldest + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// The `n`-th most recent line; `get(0)` is the newest.
    ///
    /// Returns `""` when fewer than `n + 1` lines have been appended.
    pub fn get(&self, n: usize) -> &str {
        if n >= self.len {
            return "";
        }
        let capacity = self.capacity();
        let index = (self.oldest + capacity - 1 - n) % capacity;
        self.lines.get(index).map_or("", String::as_str)
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// No line has been appended since creation or the last [`Self::clear`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forget every line, keeping the slots.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.oldest = 0;
        self.len = 0;
    }

    /// Lines from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        (0..self.len).map(|n| self.get(n))
    }
}
