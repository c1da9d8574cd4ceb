//! # veld_event - Event Channels and Observer Bus
//!
//! Message plumbing for the editor core:
//! - [`EventChannel`] - single-type FIFO queue connecting two components
//! - [`EventBus`] - typed publish/subscribe for read-only observers
//!
//! Everything runs on one logical thread; the internal locks only exist so
//! that senders can share a channel through `&self` and `Arc`.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

/// Trait for events.
pub trait Event: Send + Sync + 'static {}

// Blanket implementation
impl<T: Send + Sync + 'static> Event for T {}

/// Channel for single-type events.
///
/// FIFO delivery: events are received in the exact order they were sent,
/// which the reconciliation layer relies on for per-object ordering.
pub struct EventChannel<E: Event> {
    queue: Mutex<VecDeque<E>>,
}

impl<E: Event> EventChannel<E> {
    /// Create a new channel.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Send an event.
    pub fn send(&self, event: E) {
        self.queue.lock().push_back(event);
    }

    /// Receive the oldest pending event.
    pub fn receive(&self) -> Option<E> {
        self.queue.lock().pop_front()
    }

    /// Drain all pending events in send order.
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Get pending count.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber ID, returned by [`EventBus::subscribe`] for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Dynamic event handler.
type DynamicHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Event envelope carrying a type-erased event.
struct EventEnvelope {
    type_id: TypeId,
    data: Box<dyn Any + Send + Sync>,
}

/// Event bus for publishing and subscribing to typed events.
///
/// Observers register handlers per event type; `process` dispatches all
/// pending events in publish order. Handlers take `&E` only - components
/// that need to mutate state in reaction to a message use an
/// [`EventChannel`] and drain it themselves instead.
pub struct EventBus {
    queue: Mutex<VecDeque<EventEnvelope>>,
    handlers: HashMap<TypeId, Vec<(SubscriberId, DynamicHandler)>>,
    next_subscriber_id: u64,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            handlers: HashMap::new(),
            next_subscriber_id: 1,
        }
    }

    /// Publish an event.
    pub fn publish<E: Event>(&self, event: E) {
        self.queue.lock().push_back(EventEnvelope {
            type_id: TypeId::of::<E>(),
            data: Box::new(event),
        });
    }

    /// Subscribe to an event type.
    pub fn subscribe<E: Event, F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        let wrapped: DynamicHandler = Box::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        self.handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push((id, wrapped));

        id
    }

    /// Unsubscribe a handler.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        for handlers in self.handlers.values_mut() {
            handlers.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    /// Dispatch all pending events in publish order.
    pub fn process(&mut self) {
        loop {
            let envelope = match self.queue.lock().pop_front() {
                Some(envelope) => envelope,
                None => break,
            };
            if let Some(handlers) = self.handlers.get(&envelope.type_id) {
                for (_, handler) in handlers {
                    handler(envelope.data.as_ref());
                }
            }
        }
    }

    /// Clear all events without dispatching them.
    pub fn clear(&self) {
        self.queue.lock().clear();
    }

    /// Get pending event count.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Check if there are pending events.
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, EventChannel, SubscriberId};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct TestEvent(i32);

    #[test]
    fn test_event_bus() {
        let mut bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        bus.subscribe(move |_: &TestEvent| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(TestEvent(42));
        bus.process();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_bus_unsubscribe() {
        let mut bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = bus.subscribe(move |_: &TestEvent| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        bus.unsubscribe(id);

        bus.publish(TestEvent(42));
        bus.process();

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_event_bus_publish_order() {
        let mut bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        bus.subscribe(move |e: &TestEvent| {
            seen_clone.lock().push(e.0);
        });

        bus.publish(TestEvent(1));
        bus.publish(TestEvent(2));
        bus.publish(TestEvent(3));
        bus.process();

        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_event_channel() {
        let channel: EventChannel<TestEvent> = EventChannel::new();

        channel.send(TestEvent(1));
        channel.send(TestEvent(2));
        channel.send(TestEvent(3));

        let events = channel.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].0, 1);
        assert_eq!(events[1].0, 2);
        assert_eq!(events[2].0, 3);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_event_channel_receive() {
        let channel: EventChannel<TestEvent> = EventChannel::new();
        channel.send(TestEvent(7));

        assert_eq!(channel.len(), 1);
        assert_eq!(channel.receive().map(|e| e.0), Some(7));
        assert!(channel.receive().is_none());
    }
}
