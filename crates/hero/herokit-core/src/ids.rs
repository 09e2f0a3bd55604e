//! Identifiers for hero contexts and the transitions they run.

use serde::{Deserialize, Serialize};

/// Logical id the host attaches to a pair of source/destination views.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub String);

impl HeroId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeroId {
    fn from(s: &str) -> Self {
        HeroId(s.to_string())
    }
}

impl From<String> for HeroId {
    fn from(s: String) -> Self {
        HeroId(s)
    }
}

impl std::fmt::Display for HeroId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequence number stamped on each started transition.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionSeq(pub u32);

/// Monotonic allocator for TransitionSeq.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_seq: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_seq(&mut self) -> TransitionSeq {
        let id = TransitionSeq(self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_seq(), TransitionSeq(0));
        assert_eq!(alloc.alloc_seq(), TransitionSeq(1));
        alloc.reset();
        assert_eq!(alloc.alloc_seq(), TransitionSeq(0));
    }

    #[test]
    fn hero_id_serializes_as_plain_string() {
        let id = HeroId::from("note-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"note-7\"");
    }
}
