// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The pending-event queue, ordered by firing time.

use costline_core::simulation::{SimTime, SimulationEvent};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct ScheduledEvent {
    time: SimTime,
    sequence: u64,
    event: SimulationEvent,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    // Reversed so the max-heap pops the earliest event, then the first scheduled.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A min-queue of events keyed by absolute firing time.
///
/// Events scheduled for the same instant fire in the order they were pushed.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    next_sequence: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to fire at absolute time `time`.
    pub fn push(&mut self, time: SimTime, event: SimulationEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent {
            time,
            sequence,
            event,
        });
    }

    /// Removes and returns the next event with its firing time.
    pub fn pop(&mut self) -> Option<(SimTime, SimulationEvent)> {
        self.heap
            .pop()
            .map(|scheduled| (scheduled.time, scheduled.event))
    }

    /// Firing time of the next event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|scheduled| scheduled.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no event is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(label: &str) -> SimulationEvent {
        SimulationEvent::Timer {
            label: label.to_string(),
            delay: 0.0,
        }
    }

    fn label(event: &SimulationEvent) -> &str {
        match event {
            SimulationEvent::Timer { label, .. } => label,
            other => other.name(),
        }
    }

    #[test]
    fn test_pops_in_time_order() {
        let mut queue = EventQueue::new();
        queue.push(10.0, timer("late"));
        queue.push(0.0, timer("early"));
        queue.push(5.0, timer("middle"));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek_time(), Some(0.0));
        let order: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|(time, event)| (time, label(&event).to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (0.0, "early".to_string()),
                (5.0, "middle".to_string()),
                (10.0, "late".to_string()),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_fire_in_push_order() {
        let mut queue = EventQueue::new();
        queue.push(5.0, timer("first"));
        queue.push(5.0, timer("second"));
        queue.push(5.0, timer("third"));

        let labels: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|(_, event)| label(&event).to_string())
            .collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }
}
