//! Default constants for heap and collector configuration.

/// Default number of object slots reserved when a heap is created.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Default number of live objects that makes a collection worthwhile.
pub const DEFAULT_GC_THRESHOLD: usize = 4096;
