//! Strata SDK - representation contract
//!
//! This crate defines the operation table every representation strategy
//! implements, together with the handle, storage and error types the
//! table speaks in. It has no dependency on the engine, so strategies can be
//! written against the contract alone.
//!
//! # Example
//!
//! ```ignore
//! use strata_sdk::{ObjectId, ObjectSpace, ReprHandle};
//!
//! fn make_type(repr: ReprHandle, heap: &mut dyn ObjectSpace, how: ObjectId) -> ObjectId {
//!     repr.type_object_for(heap, Some(how))
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod handle;
pub mod repr;
pub mod storage;

pub use error::{ExceptionCategory, ReprError, ReprResult};
pub use handle::{ContextId, ObjectId, TypeRecordId};
pub use repr::{GcMarker, ObjectSpace, ReprBody, ReprHandle, Representation};
pub use storage::{AttrHint, BoxedPrimitive, Inlineable, StorageSpec};
