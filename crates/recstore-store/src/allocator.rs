//! Identifier allocation.
//!
//! The next identifier is one past the highest identifier the session has
//! ever known about: loaded from the medium, handed out by `create`, or
//! staged by the caller. The mark never moves backwards, so an identifier
//! dropped by `save` is not handed out again.

use recstore_entity::RecordId;

/// The smallest identifier that is at least `floor` and above every `known` one.
pub fn next_id<I>(known: I, floor: RecordId) -> RecordId
where
    I: IntoIterator<Item = RecordId>,
{
    known
        .into_iter()
        .fold(floor, |next, id| if id >= next { id.next() } else { next })
}

/// High-water-mark identifier allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    next: RecordId,
}

impl IdAllocator {
    /// Allocator for an empty store.
    pub fn new() -> Self {
        Self {
            next: RecordId::FIRST,
        }
    }

    /// Allocator positioned after every identifier in `known`.
    pub fn seeded<I>(known: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        Self {
            next: next_id(known, RecordId::FIRST),
        }
    }

    /// The identifier the next [`allocate`](Self::allocate) returns.
    pub fn peek(&self) -> RecordId {
        self.next
    }

    /// Hand out the next identifier and advance.
    pub fn allocate(&mut self) -> RecordId {
        let id = self.next;
        self.next = id.next();
        id
    }

    /// Account for an identifier that entered the session from outside.
    pub fn observe(&mut self, id: RecordId) {
        self.next = next_id([id], self.next);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(raw: &[u64]) -> Vec<RecordId> {
        raw.iter().copied().map(RecordId::new).collect()
    }

    #[test]
    fn next_id_of_nothing_is_floor() {
        assert_eq!(next_id(Vec::new(), RecordId::FIRST), RecordId::FIRST);
    }

    #[test]
    fn next_id_skips_gaps() {
        assert_eq!(next_id(ids(&[1, 2, 4]), RecordId::FIRST), RecordId::new(5));
        assert_eq!(next_id(ids(&[4, 1, 2]), RecordId::FIRST), RecordId::new(5));
    }

    #[test]
    fn next_id_respects_floor() {
        assert_eq!(next_id(ids(&[1, 2]), RecordId::new(10)), RecordId::new(10));
    }

    #[test]
    fn seeded_allocation_is_sequential() {
        let mut alloc = IdAllocator::seeded(ids(&[1, 2, 4]));
        assert_eq!(alloc.allocate(), RecordId::new(5));
        assert_eq!(alloc.allocate(), RecordId::new(6));
        assert_eq!(alloc.peek(), RecordId::new(7));
    }

    #[test]
    fn observe_raises_but_never_lowers() {
        let mut alloc = IdAllocator::new();
        alloc.observe(RecordId::new(9));
        assert_eq!(alloc.peek(), RecordId::new(10));
        alloc.observe(RecordId::new(3));
        assert_eq!(alloc.peek(), RecordId::new(10));
    }

    proptest! {
        #[test]
        fn allocations_strictly_increase(
            seed in proptest::collection::vec(1u64..1_000, 0..20),
            observed in proptest::collection::vec(1u64..2_000, 0..20),
        ) {
            let mut alloc = IdAllocator::seeded(ids(&seed));
            let mut last = RecordId::NULL;
            for raw in observed {
                let id = alloc.allocate();
                prop_assert!(id > last);
                prop_assert!(seed.iter().all(|s| RecordId::new(*s) < id));
                last = id;
                alloc.observe(RecordId::new(raw));
            }
        }
    }
}
