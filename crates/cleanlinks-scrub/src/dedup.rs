//! Recency cache that makes message handling idempotent against
//! duplicate delivery.

use std::collections::VecDeque;

use cleanlinks_core::config::DEFAULT_DEDUP_CAPACITY;
use cleanlinks_core::types::MessageKey;

/// Fixed-capacity FIFO of recently seen message keys.
///
/// Membership test and insert are one operation: [`DedupGate::admit`].
/// A key that is already present is not refreshed, so eviction order is
/// first-seen order.
#[derive(Debug, Clone)]
pub struct DedupGate {
    capacity: usize,
    recent: VecDeque<MessageKey>,
}

impl DedupGate {
    /// A gate remembering at most `capacity` keys (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns `true` the first time `key` is offered while it is still
    /// remembered, `false` for repeats.
    pub fn admit(&mut self, key: MessageKey) -> bool {
        if self.recent.contains(&key) {
            return false;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(key);
        true
    }

    pub fn contains(&self, key: &MessageKey) -> bool {
        self.recent.contains(key)
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DedupGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanlinks_core::types::{ChatId, MessageId};

    fn key(id: i32) -> MessageKey {
        MessageKey::new(ChatId(-100), MessageId(id))
    }

    #[test]
    fn repeat_delivery_is_rejected() {
        let mut gate = DedupGate::default();
        assert!(gate.admit(key(1)));
        assert!(!gate.admit(key(1)));
    }

    #[test]
    fn oldest_key_is_evicted_past_capacity() {
        let mut gate = DedupGate::default();
        for id in 1..=11 {
            assert!(gate.admit(key(id)));
        }
        assert_eq!(gate.len(), 10);
        assert!(!gate.contains(&key(1)));
        assert!(gate.contains(&key(2)));
        // Forgotten, so it is admitted again.
        assert!(gate.admit(key(1)));
    }

    #[test]
    fn rejected_repeat_does_not_refresh_position() {
        let mut gate = DedupGate::new(2);
        assert!(gate.admit(key(1)));
        assert!(gate.admit(key(2)));
        assert!(!gate.admit(key(1)));
        assert!(gate.admit(key(3)));
        assert!(!gate.contains(&key(1)));
        assert!(gate.contains(&key(2)));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut gate = DedupGate::new(0);
        assert_eq!(gate.capacity(), 1);
        assert!(gate.admit(key(1)));
        assert!(!gate.admit(key(1)));
    }

    #[test]
    fn chat_is_part_of_the_key() {
        let mut gate = DedupGate::default();
        assert!(gate.admit(MessageKey::new(ChatId(1), MessageId(5))));
        assert!(gate.admit(MessageKey::new(ChatId(2), MessageId(5))));
    }
}
