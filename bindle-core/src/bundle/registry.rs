//! Build-scoped module registry.
//!
//! Owns the canonical-path→index map and the FIFO work queue. Indices are
//! assigned exactly once, at first sight, contiguously from 0; the entry
//! module is always index 0 because it is registered first. One registry
//! belongs to exactly one build: `reset` is mandatory before reuse.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::bundle::path::ModulePath;

#[derive(Debug, Default)]
pub struct ModuleRegistry {
    indices: HashMap<ModulePath, usize>,
    pending: VecDeque<ModulePath>,
    next_index: usize,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `path`, assigning the next one and enqueueing the path if it
    /// has not been seen in this build.
    pub fn get_index(&mut self, path: &ModulePath) -> usize {
        if let Some(&index) = self.indices.get(path) {
            return index;
        }
        let index = self.next_index;
        self.next_index += 1;
        self.indices.insert(path.clone(), index);
        self.pending.push_back(path.clone());
        trace!(target: "bindle::bundle", index, module = %path, "registered module");
        index
    }

    /// Idempotent: a path that is already mapped is not queued again.
    pub fn enqueue(&mut self, path: &ModulePath) {
        let _ = self.get_index(path);
    }

    /// Next module to process; `None` ends the bundling loop.
    pub fn next_pending(&mut self) -> Option<ModulePath> {
        self.pending.pop_front()
    }

    /// Number of assigned indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_mapped(&self, path: &ModulePath) -> bool {
        self.indices.contains_key(path)
    }

    /// Clear all state. Required between builds; stale indices must never
    /// leak into the next one.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.pending.clear();
        self.next_index = 0;
    }
}
