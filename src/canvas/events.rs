//! Canvas event notifications.

use super::host::ObjectId;
use crate::input::Tool;
use std::cell::RefCell;

/// Events broadcast by the canvas and the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    ObjectAdded(ObjectId),
    ObjectModified(ObjectId),
    ObjectRemoved(ObjectId),
    /// A pencil stroke was committed as a free-hand object
    PathCreated(ObjectId),
    /// A full render pass finished
    AfterRender,
    ToolChanged { old: Tool, new: Tool },
    /// A pointer gesture ended (carries no payload)
    GestureCompleted,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&CanvasEvent)>;

/// A simple event bus broadcasting canvas events to registered handlers.
///
/// Single-threaded. Handlers must not subscribe or unsubscribe from inside
/// their own callback.
pub struct EventBus {
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
    next_id: RefCell<u64>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field(
                "handlers",
                &format!("<{} handlers>", self.handlers.borrow().len()),
            )
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: RefCell::new(0),
        }
    }

    /// Registers a handler; it receives every event emitted afterwards.
    pub fn subscribe(&self, handler: impl FnMut(&CanvasEvent) + 'static) -> SubscriptionId {
        let mut next = self.next_id.borrow_mut();
        let id = SubscriptionId(*next);
        *next += 1;
        self.handlers.borrow_mut().push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Removes every handler.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers an event to all handlers in subscription order.
    pub fn emit(&self, event: &CanvasEvent) {
        log::trace!("Emitting {event:?}");
        for (_, handler) in self.handlers.borrow_mut().iter_mut() {
            handler(event);
        }
    }
}
