//! Fixed-Size Circular Buffer for Score History
//!
//! ## Overview
//!
//! A ring buffer with compile-time storage `N` and a runtime `limit <= N`.
//! The storage size bounds memory; the limit is the logical window that
//! configuration can choose without changing types.
//!
//! ```text
//! CircularBuffer<f32, 8> with limit = 5:
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  -  │  -  │  -  │
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!    ↑                       ↑     unused slots
//!    └── write_pos wraps     └── at limit - 1
//! ```
//!
//! - `push()`: O(1), overwrites the oldest value once `len == limit`
//! - `iter()`: oldest to newest
//! - no heap allocation
//!
//! ## Usage Example
//!
//! ```rust
//! use lumaguard_core::buffer::CircularBuffer;
//!
//! let mut window: CircularBuffer<f32, 8> = CircularBuffer::with_limit(3);
//! for v in [0.1, 0.2, 0.3, 0.4] {
//!     window.push(v);
//! }
//!
//! let values: Vec<f32> = window.iter().copied().collect();
//! assert_eq!(values, vec![0.2, 0.3, 0.4]);
//! ```

/// Fixed-size circular buffer with a runtime window limit
///
/// ## Internal Invariants
///
/// - `1 <= limit <= N`
/// - `write_pos < limit`
/// - `len <= limit`
#[derive(Clone, Debug)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage; `None` marks slots that were never written
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid values
    len: usize,

    /// Logical capacity
    limit: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates an empty buffer using the full storage as its window
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
            limit: N,
        }
    }

    /// Creates an empty buffer whose window is `limit` values
    ///
    /// `limit` is clamped into `1..=N`; callers that need to reject bad
    /// limits validate before constructing (see
    /// [`SmootherConfig::validate`](crate::SmootherConfig::validate)).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
            limit: limit.clamp(1, N.max(1)),
        }
    }

    /// Adds a value, overwriting the oldest one when the window is full
    pub fn push(&mut self, value: T) {
        self.data[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % self.limit;

        if self.len < self.limit {
            self.len += 1;
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the window is full
    pub fn is_full(&self) -> bool {
        self.len == self.limit
    }

    /// Logical capacity
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Most recent value
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { self.limit - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Drop all values, keeping the limit
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Value by logical index (0 = oldest)
    ///
    /// When not yet full the data starts at slot 0. Once full, the oldest
    /// value sits at `write_pos`:
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical:   [A, B, C, D, E]
    /// ```
    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < self.limit {
            index
        } else {
            (self.write_pos + index) % self.limit
        };

        self.data[actual_index].as_ref()
    }
}

impl<const N: usize> CircularBuffer<f32, N> {
    /// Arithmetic mean of the stored values, `None` when empty
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let sum: f32 = self.iter().sum();
        Some(sum / self.len as f32)
    }
}

/// Iterator over circular buffer contents
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
