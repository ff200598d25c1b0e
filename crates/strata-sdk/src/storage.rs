//! Storage specifications and attribute hints
//!
//! The runtime queries a type's `StorageSpec` before trying to inline or box
//! values of that type, and asks for an `AttrHint` before falling back to a
//! name-based attribute lookup.

/// How values of a type can be stored inside another object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inlineable {
    /// Only a reference to the value can be stored
    Reference,
    /// The value can be flattened into the containing object
    Inline,
}

/// Native primitive a type boxes, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxedPrimitive {
    /// Does not box a primitive
    None,
    /// Boxes a native int
    Int,
    /// Boxes a native num
    Num,
    /// Boxes a native string
    Str,
}

/// Boxing and inlining capability of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageSpec {
    /// Inlining capability
    pub inlineable: Inlineable,
    /// Primitive kind held when boxed
    pub boxed_primitive: BoxedPrimitive,
    /// Whether the type can box a native value at all
    pub can_box: bool,
}

impl StorageSpec {
    /// Reference-only, not boxable
    pub const REFERENCE: StorageSpec = StorageSpec {
        inlineable: Inlineable::Reference,
        boxed_primitive: BoxedPrimitive::None,
        can_box: false,
    };

    /// Check if values must be stored by reference
    #[inline]
    pub fn is_reference_only(&self) -> bool {
        self.inlineable == Inlineable::Reference
    }
}

impl Default for StorageSpec {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Cached fast-path token for a named attribute
///
/// Attribute operations take `Option<AttrHint>`; `None` means "no hint" and
/// forces a name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrHint(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_spec() {
        let spec = StorageSpec::REFERENCE;
        assert!(spec.is_reference_only());
        assert_eq!(spec.boxed_primitive, BoxedPrimitive::None);
        assert!(!spec.can_box);
        assert_eq!(StorageSpec::default(), spec);
    }
}
