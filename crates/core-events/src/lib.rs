//! The process-wide, topic-typed publish/subscribe event bus, plus the
//! small vocabulary of types (`Mode`, key descriptors, `KeyTarget`) the bus's
//! events carry.
//!
//! [`EventBus`] is generic over a context type rather than holding closures
//! that capture shared mutable editor state: handlers are
//! `FnMut(&Event, &mut Ctx)`, and `Ctx` is passed in by the caller at
//! `emit` time. This keeps every mutable borrow single-threaded and
//! non-aliased without reaching for `Rc<RefCell<_>>`. There is no global
//! singleton — the bus is created at editor startup and passed into
//! whatever needs to emit or subscribe, per the source's design intent.

use bitflags::bitflags;
use std::collections::HashMap;

/// Editor mode. `View` is the initial mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    View,
    Insert,
    Command,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const CONTROL = 0b001;
        const SHIFT   = 0b010;
        const ALT     = 0b100;
    }
}

/// A normalized key, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
}

/// A raw key event as delivered to bus subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyDescriptor {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        KeyDescriptor { code, mods }
    }

    pub fn is_ctrl(&self, ch: char) -> bool {
        self.mods.contains(KeyModifiers::CONTROL) && self.code == KeyCode::Char(ch)
    }
}

/// The element a `Key` event was routed to by the orchestrator's modal
/// dispatch; `None` in View mode, where State is the sole listener that may
/// switch to Insert or Command mode. Every subscriber still receives every
/// `Key` event regardless of `target` — it is up to each handler to decide
/// whether the event is meant for it (Window's global Ctrl-bindings, for
/// instance, ignore `target` entirely since they must work in any mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    None,
    Tab,
    State,
}

/// One of the four event kinds the bus carries.
#[derive(Debug, Clone)]
pub enum Event {
    ModeChanged { mode: Mode },
    StateChanged,
    Key { target: KeyTarget, key: KeyDescriptor },
    SubmittedCommand { command: String },
}

/// The discriminant subscribers register against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ModeChanged,
    StateChanged,
    Key,
    SubmittedCommand,
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::ModeChanged { .. } => Topic::ModeChanged,
            Event::StateChanged => Topic::StateChanged,
            Event::Key { .. } => Topic::Key,
            Event::SubmittedCommand { .. } => Topic::SubmittedCommand,
        }
    }
}

type Handler<Ctx> = Box<dyn FnMut(&Event, &mut Ctx)>;

/// A topic-keyed publish/subscribe registry. Dispatch is synchronous, to all
/// current subscribers of the event's topic, in registration order.
pub struct EventBus<Ctx> {
    subscribers: HashMap<Topic, Vec<Handler<Ctx>>>,
}

impl<Ctx> Default for EventBus<Ctx> {
    fn default() -> Self {
        EventBus {
            subscribers: HashMap::new(),
        }
    }
}

impl<Ctx> EventBus<Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic, handler: impl FnMut(&Event, &mut Ctx) + 'static) {
        self.subscribers.entry(topic).or_default().push(Box::new(handler));
    }

    /// Dispatch `event` to every subscriber of its topic, in registration
    /// order. Handlers that want to raise further events should push them
    /// onto a queue carried by `Ctx` rather than calling `emit` again —
    /// `emit` already holds this topic's subscriber list mutably for the
    /// duration of the dispatch.
    pub fn emit(&mut self, event: Event, ctx: &mut Ctx) {
        let topic = event.topic();
        tracing::trace!(target: "runtime.events", ?topic, "dispatch");
        if let Some(mut handlers) = self.subscribers.remove(&topic) {
            for handler in handlers.iter_mut() {
                handler(&event, ctx);
            }
            self.subscribers.insert(topic, handlers);
        }
    }
}
