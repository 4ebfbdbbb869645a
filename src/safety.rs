//! Thread safety classification
//!
//! Every user plugin declares a thread safety level that the scheduler
//! consults once, at island construction time, to pick an execution backend.

use serde::{Deserialize, Serialize};

/// Declared thread safety level of a plugin
///
/// The ordering is meaningful: `None < Basic`. Plugins that do not override
/// the declaration default to [`ThreadSafety::None`], the conservative
/// choice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ThreadSafety {
    /// No thread safety: any concurrent operation on distinct instances is unsafe
    None,
    /// Basic thread safety: any concurrent operation on distinct instances is safe
    Basic,
}

impl ThreadSafety {
    /// Combined safety of a task touching two plugins at once
    ///
    /// The weaker of the two levels governs the whole task.
    pub fn combine(self, other: ThreadSafety) -> ThreadSafety {
        self.min(other)
    }
}
