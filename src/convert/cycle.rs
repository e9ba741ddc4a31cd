//! Reference-cycle detection for graph traversal.

/// The set of composite identities currently being visited.
///
/// One guard is created per top-level conversion call and threaded
/// explicitly through every recursive step, so concurrent top-level
/// conversions never observe each other's state. Identities are pointer
/// addresses, never value equality: two distinct equal composites are
/// not conflated.
#[derive(Debug, Default)]
pub struct CycleGuard {
    visiting: Vec<usize>,
}

impl CycleGuard {
    pub fn new() -> Self {
        CycleGuard::default()
    }

    /// Marks an identity as in-progress. Returns `false` if it is
    /// already being visited, in which case the caller must not recurse
    /// and must apply the configured cycle strategy instead.
    pub fn enter(&mut self, identity: usize) -> bool {
        if self.visiting.contains(&identity) {
            return false;
        }
        self.visiting.push(identity);
        true
    }

    /// Removes an identity. Idempotent; callers invoke this on every
    /// exit path, including error paths.
    pub fn leave(&mut self, identity: usize) {
        if let Some(index) = self.visiting.iter().rposition(|&id| id == identity) {
            self.visiting.remove(index);
        }
    }

    pub fn depth(&self) -> usize {
        self.visiting.len()
    }
}
