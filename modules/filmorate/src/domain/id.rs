use crate::contract::model::Id;

/// Hands out identifiers as `max(existing) + 1`, starting at 1.
///
/// The allocator remembers the highest id it ever issued, so an id freed by a
/// delete is never handed out again, even when it was the current maximum.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    last_issued: Id,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a collection whose current keys are `keys`.
    pub fn next<'a>(&mut self, keys: impl IntoIterator<Item = &'a Id>) -> Id {
        let current_max = keys.into_iter().copied().max().unwrap_or(0);
        let next = current_max.max(self.last_issued) + 1;
        self.last_issued = next;
        next
    }

    pub fn last_issued(&self) -> Id {
        self.last_issued
    }
}
