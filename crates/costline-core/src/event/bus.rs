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

use std::sync::{Mutex, PoisonError};

/// A generic, thread-safe broadcast bus.
///
/// Every subscriber gets its own bounded channel and receives a clone of each
/// published event. The bus keeps no receiver of its own, so with no
/// subscriber nothing is buffered. A subscriber whose channel is full misses
/// the event; a dropped subscriber is forgotten on the next publish.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    capacity: usize,
    subscribers: Mutex<Vec<flume::Sender<T>>>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a bus whose subscribers buffer at most `capacity` events each.
    pub fn new(capacity: usize) -> Self {
        log::debug!("EventBus initialized (capacity {capacity}).");
        Self {
            capacity,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Publishes an event to every live subscriber.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        subscribers.retain(|sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(flume::TrySendError::Full(_)) => {
                log::warn!("Subscriber buffer full, event dropped.");
                true
            }
            Err(flume::TrySendError::Disconnected(_)) => {
                log::debug!("Subscriber disconnected, removing it.");
                false
            }
        });
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::bounded(self.capacity);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    /// Number of subscribers still registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestRecord {
        Sample { unit: String, value: f64 },
        Flush,
    }

    fn sample(value: f64) -> TestRecord {
        TestRecord::Sample {
            unit: "rc-1".to_string(),
            value,
        }
    }

    #[test]
    fn test_every_subscriber_receives_in_order() {
        let bus = EventBus::<TestRecord>::new(8);
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(sample(30.0));
        bus.publish(sample(50.0));
        bus.publish(TestRecord::Flush);

        let expected = vec![sample(30.0), sample(50.0), TestRecord::Flush];
        assert_eq!(first.try_iter().collect::<Vec<_>>(), expected);
        assert_eq!(second.try_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_publish_without_subscribers_buffers_nothing() {
        let bus = EventBus::<TestRecord>::new(8);
        bus.publish(sample(1.0));

        let late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_full_subscriber_misses_events() {
        let bus = EventBus::<TestRecord>::new(2);
        let subscriber = bus.subscribe();

        bus.publish(sample(1.0));
        bus.publish(sample(2.0));
        bus.publish(sample(3.0));

        assert_eq!(
            subscriber.try_iter().collect::<Vec<_>>(),
            vec![sample(1.0), sample(2.0)]
        );
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_after_subscriber_dropped_removes_it() {
        let bus = EventBus::<TestRecord>::new(4);
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(TestRecord::Flush);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(TestRecord::Flush));
    }

    #[test]
    fn test_subscriber_receives_from_other_thread() {
        let bus = Arc::new(EventBus::<TestRecord>::new(4));
        let subscriber = bus.subscribe();

        let publisher = Arc::clone(&bus);
        let handle = thread::spawn(move || publisher.publish(sample(10.0)));

        let received = subscriber
            .recv_timeout(Duration::from_secs(1))
            .expect("Failed to receive event from thread");
        assert_eq!(received, sample(10.0));
        handle.join().expect("Thread join failed");
    }
}
