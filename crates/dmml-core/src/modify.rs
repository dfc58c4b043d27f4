//! Batched-modify bookkeeping.
//!
//! A node that touches several fields in one logical operation wraps the
//! changes in `start_modify` / `end_modify`. While the scope is open every
//! `modified` call only marks the node as pending; closing the outermost
//! scope fires a single aggregate notification if anything was marked.
//!
//! Fired notifications are counted in `mtime` and queued until the owner
//! collects them with `take_notifications` and forwards them to observers.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedState {
    disable_count: u32,
    pending: bool,
    mtime: u64,
    undelivered: u32,
}

impl ModifiedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a (nestable) batch scope. Returns true if a scope was already open.
    pub fn start_modify(&mut self) -> bool {
        let was_modifying = self.disable_count > 0;
        self.disable_count += 1;
        was_modifying
    }

    /// Close a batch scope. Returns true if the aggregate notification fired.
    pub fn end_modify(&mut self) -> bool {
        debug_assert!(self.disable_count > 0, "end_modify without start_modify");
        self.disable_count = self.disable_count.saturating_sub(1);
        if self.disable_count == 0 && self.pending {
            self.pending = false;
            self.fire();
            return true;
        }
        false
    }

    /// Record a change. Returns true if a notification fired immediately.
    pub fn modified(&mut self) -> bool {
        if self.disable_count > 0 {
            self.pending = true;
            false
        } else {
            self.fire();
            true
        }
    }

    pub fn is_modifying(&self) -> bool {
        self.disable_count > 0
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of notifications fired over the lifetime of the owner.
    pub fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Collect notifications fired since the last call.
    pub fn take_notifications(&mut self) -> u32 {
        std::mem::take(&mut self.undelivered)
    }

    /// Drop undelivered notifications and any pending batch state.
    pub fn clear_notifications(&mut self) {
        self.undelivered = 0;
        self.pending = false;
        self.disable_count = 0;
    }

    fn fire(&mut self) {
        self.mtime += 1;
        self.undelivered += 1;
    }
}
