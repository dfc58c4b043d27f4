use core::fmt;
use core::num::NonZeroU32;

/// Handle of a node slot in a scene arena.
///
/// Slots are never reused while a scene lives, so a removed node's id keeps
/// pointing at an empty slot instead of at a newer node. Stored as the slot
/// index plus one, which keeps `Option<NodeId>` (the maximized view, the
/// layout node of a detached logic) as small as the id itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    pub const fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Arena slot this id refers to.
    pub const fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

pub type NodeId = Id;
