use crate::canvas::model::Point;
use crate::recognize::wire::RecognitionRecord;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Paces newly recognized records onto the overlay, one per `delay`. Each
/// record keeps the anchor its batch was scheduled with.
#[derive(Debug, Clone)]
pub struct RevealQueue {
    delay: Duration,
    pending: VecDeque<(Instant, RecognitionRecord, Point)>,
}

impl Default for RevealQueue {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY)
    }
}

impl RevealQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: VecDeque::new(),
        }
    }

    /// Queue a batch placed at `anchor`. Record `i` becomes due
    /// `(i + 1) * delay` after `now`, or after the last record still waiting
    /// from an earlier batch. A due time past what `Instant` can represent
    /// stays at the last representable one.
    pub fn schedule(&mut self, records: Vec<RecognitionRecord>, anchor: Point, now: Instant) {
        let mut due = self
            .pending
            .back()
            .map(|(due, _, _)| (*due).max(now))
            .unwrap_or(now);
        for record in records {
            due = due.checked_add(self.delay).unwrap_or(due);
            self.pending.push_back((due, record, anchor));
        }
    }

    /// Remove and return every record due at `now` with its anchor, in order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(RecognitionRecord, Point)> {
        let mut ready = Vec::new();
        while let Some((due, _, _)) = self.pending.front() {
            if *due > now {
                break;
            }
            if let Some((_, record, anchor)) = self.pending.pop_front() {
                ready.push((record, anchor));
            }
        }
        ready
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|(due, _, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
