//! Fixed-capacity sample arena with frontier cursors.
use glam::Vec2;

use crate::error::{Error, Result};

/// Ordered, fixed-capacity sequence of accepted sample positions.
///
/// Samples between `head` and `tail` form the frontier of not-yet-expanded samples.
/// Storage is allocated once at construction and never grows past `capacity`.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: Vec<Vec2>,
    capacity: usize,
    head: usize,
}

impl SampleBuffer {
    /// Preallocates storage for `capacity` samples. A zero capacity is rejected.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be > 0".into()));
        }
        Ok(Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the next sample to expand.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of accepted samples.
    #[inline]
    pub fn tail(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Whether accepted samples remain to be expanded.
    #[inline]
    pub fn has_frontier(&self) -> bool {
        self.head < self.samples.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.samples.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.samples
    }

    /// Appends a sample and returns its index, or `None` when the buffer is full.
    pub fn push(&mut self, p: Vec2) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.samples.len();
        self.samples.push(p);
        Some(index)
    }

    /// Takes the next frontier sample and advances `head`.
    pub fn pop_frontier(&mut self) -> Option<Vec2> {
        let p = self.samples.get(self.head).copied()?;
        self.head += 1;
        Some(p)
    }

    /// Drops the remaining frontier so that `head == tail`.
    pub fn drain_frontier(&mut self) {
        self.head = self.samples.len();
    }

    /// Removes all samples while keeping the allocation.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }
}
