//! Owned scratch workspace.

/// Grow-only workspace of `u64` words.
///
/// Contents are unspecified between uses: consumers overwrite every word they
/// read. Growing keeps the existing allocation when capacity allows, so a
/// buffer sized for the largest call can be reused for every smaller one.
#[derive(Debug, Clone, Default)]
pub struct ScratchBuffer {
    words: Vec<u64>,
}

impl ScratchBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Create a buffer holding exactly `len` words.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len],
        }
    }

    /// Number of usable words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the buffer holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Grow to at least `len` words. Returns `true` if the buffer grew.
    pub fn ensure_len(&mut self, len: usize) -> bool {
        if self.words.len() >= len {
            return false;
        }
        self.words.resize(len, 0);
        true
    }

    /// Borrow the first `len` words, growing first if needed.
    pub fn prefix_mut(&mut self, len: usize) -> &mut [u64] {
        self.ensure_len(len);
        &mut self.words[..len]
    }

    /// Borrow the whole buffer.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

impl AsMut<[u64]> for ScratchBuffer {
    fn as_mut(&mut self) -> &mut [u64] {
        self.as_mut_slice()
    }
}
