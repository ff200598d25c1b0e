//! GC root tracking
//!
//! Roots are the objects the runtime holds directly: interpreter registers,
//! global symbols, the meta-objects of the bootstrap types.

use strata_sdk::ObjectId;

/// Root set for garbage collection
#[derive(Debug, Default, Clone)]
pub struct RootSet {
    roots: Vec<ObjectId>,
}

impl RootSet {
    /// Create a new root set
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Add a root
    pub fn add_root(&mut self, obj: ObjectId) {
        if !self.roots.contains(&obj) {
            self.roots.push(obj);
        }
    }

    /// Remove a root, returning whether it was present
    pub fn remove_root(&mut self, obj: ObjectId) -> bool {
        match self.roots.iter().position(|&root| root == obj) {
            Some(pos) => {
                self.roots.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clear all roots
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    /// Iterate over all roots
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.roots.iter().copied()
    }

    /// Get total number of roots
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_set_creation() {
        let roots = RootSet::new();
        assert_eq!(roots.len(), 0);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_root_set_add_dedups() {
        let mut roots = RootSet::new();
        roots.add_root(ObjectId::from_index(1));
        roots.add_root(ObjectId::from_index(1));
        roots.add_root(ObjectId::from_index(2));
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn test_root_set_remove() {
        let mut roots = RootSet::new();
        roots.add_root(ObjectId::from_index(1));

        assert!(roots.remove_root(ObjectId::from_index(1)));
        assert!(!roots.remove_root(ObjectId::from_index(1)));
        assert!(roots.is_empty());
    }
}
