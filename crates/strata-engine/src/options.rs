//! Heap and collector options

use crate::defaults::{DEFAULT_GC_THRESHOLD, DEFAULT_INITIAL_CAPACITY};

/// Options used to create a heap and its collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapOptions {
    /// Object slots reserved up front
    pub initial_capacity: usize,
    /// Live object count at which `GarbageCollector::should_collect` fires
    pub gc_threshold: usize,
}

impl HeapOptions {
    /// Options with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial object capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the collection threshold
    pub fn with_gc_threshold(mut self, threshold: usize) -> Self {
        self.gc_threshold = threshold;
        self
    }
}

impl Default for HeapOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            gc_threshold: DEFAULT_GC_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HeapOptions::new();
        assert_eq!(options.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(options.gc_threshold, DEFAULT_GC_THRESHOLD);
    }

    #[test]
    fn test_builder_setters() {
        let options = HeapOptions::new()
            .with_initial_capacity(8)
            .with_gc_threshold(2);
        assert_eq!(options.initial_capacity, 8);
        assert_eq!(options.gc_threshold, 2);
    }
}
