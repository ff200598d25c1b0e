//! Opaque handles into the host object model
//!
//! Handles are plain arena indices. They carry no lifetime and are only
//! meaningful for the heap that issued them; a handle to a reclaimed slot is
//! a collector-discipline violation, not something the contract detects.

use std::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from an arena index
            #[inline]
            pub const fn from_index(index: u32) -> Self {
                Self(index)
            }

            /// Arena index of this handle
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_handle!(
    /// Handle to a heap object (type object or instance)
    ObjectId,
    "obj"
);

define_handle!(
    /// Handle to a shared type record
    TypeRecordId,
    "type"
);

define_handle!(
    /// Handle to a serialization context (an object's owning unit)
    ContextId,
    "sc"
);
