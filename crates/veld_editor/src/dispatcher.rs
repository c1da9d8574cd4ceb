//! Session dispatcher.
//!
//! Owns the inbound message channel, the editor, and the observer bus for
//! the render/UI layer. Created at session start, dropped at session end -
//! no ambient global signal hub.

use std::sync::Arc;

use veld_event::{EventBus, EventChannel};

use crate::editor::Editor;
use crate::messages::{EditorNotification, EngineMessage};

/// Drives the editor from inbound engine notifications.
///
/// `pump` is the editor's single scheduling point, a two-phase reaction:
/// phase 1 applies every pending notification synchronously in arrival
/// order; phase 2 flushes the deferred selections, re-validating that their
/// targets still exist. Afterwards the accumulated change events are
/// re-published on the observer bus.
pub struct Dispatcher {
    inbound: Arc<EventChannel<EngineMessage>>,
    pub editor: Editor,
    pub bus: EventBus,
}

impl Dispatcher {
    pub fn new(editor: Editor) -> Self {
        Self {
            inbound: Arc::new(EventChannel::new()),
            editor,
            bus: EventBus::new(),
        }
    }

    /// Channel the transport layer delivers engine notifications into.
    pub fn inbound(&self) -> Arc<EventChannel<EngineMessage>> {
        self.inbound.clone()
    }

    /// Apply all pending notifications, then settle deferred selections,
    /// then notify observers. Returns the number of messages applied.
    pub fn pump(&mut self) -> usize {
        // Phase 1: apply the whole batch in arrival order.
        let messages = self.inbound.drain();
        let applied = messages.len();
        for message in messages {
            self.editor.apply(message);
        }

        // Phase 2: select after the batch has settled.
        self.editor.flush_deferred_focus();

        // Let the render/UI observers react.
        let notifications: Vec<EditorNotification> = self.editor.notifications().drain();
        for notification in notifications {
            self.bus.publish(notification);
        }
        self.bus.process();

        applied
    }
}
