//! Strata object runtime
//!
//! This crate provides the host side of the representation contract:
//! - Object heap (type records, objects, serialization contexts)
//! - Mark-sweep garbage collector driven by representation callbacks
//! - Process-wide representation registry
//! - Built-in representations (`Uninstantiable`)

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod defaults;
pub mod error;
pub mod gc;
pub mod object;
pub mod options;
pub mod repr;

// Re-export SDK types (canonical definitions live in strata-sdk)
pub use strata_sdk::{
    AttrHint, BoxedPrimitive, ContextId, ExceptionCategory, GcMarker, Inlineable, ObjectId,
    ObjectSpace, ReprBody, ReprError, ReprHandle, ReprResult, Representation, StorageSpec,
    TypeRecordId,
};

pub use error::{EngineError, EngineResult};
pub use gc::{GarbageCollector, GcStats, Heap, HeapStats, RootSet};
pub use object::{HeapObject, SerializationContext, TypeRecord};
pub use options::HeapOptions;
pub use repr::{registry, ReprId, ReprRegistry, Uninstantiable, UNINSTANTIABLE};
