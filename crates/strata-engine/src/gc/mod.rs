//! Garbage collection
//!
//! The heap owns every object, type record and serialization context. The
//! collector never looks inside an object itself: it asks the object's
//! representation to report what the object references (`gc_mark`) and to
//! release the storage of dead objects (`gc_free`).
//!
//! # Collection order
//!
//! ```text
//! roots ──► gc_mark(obj) ──► type record ──► how / what / context
//!                 │
//!                 └────────► context
//! sweep: gc_free(dead obj) ──► reclaim slot ──► gc_free_repr(dead record)
//! ```

mod collector;
mod heap;
mod roots;

pub use collector::{GarbageCollector, GcStats};
pub use heap::{Heap, HeapStats};
pub use roots::RootSet;
