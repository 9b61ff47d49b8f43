use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Next node uid handed out by [`Uid::fresh`].
///
/// Uids are never reused: a node keeps its uid when it moves between graphs,
/// so recycling freed values would let two live nodes compare equal.
static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Globally unique, immutable node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(u64);

impl Uid {
    /// Allocates a uid that no other node in this process has.
    pub(crate) fn fresh() -> Self {
        Uid(NEXT_UID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a graph instance, generated once when the graph is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(Uuid);

impl GraphId {
    pub(crate) fn generate() -> Self {
        GraphId(Uuid::new_v4())
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
