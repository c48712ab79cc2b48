//! `EditorContext`: the `Ctx` type the orchestrator's `EventBus` is generic
//! over. Bundles the window, the global state, and a queue handlers push
//! follow-up events onto instead of re-entering `emit`.

use core_config::Config;
use core_events::Event;
use core_model::Window;
use core_state::State;
use std::collections::VecDeque;

pub struct EditorContext {
    pub window: Window,
    pub state: State,
    pub config: Config,
    pub pending: VecDeque<Event>,
}

impl EditorContext {
    pub fn new(window: Window, state: State, config: Config) -> Self {
        EditorContext {
            window,
            state,
            config,
            pending: VecDeque::new(),
        }
    }
}
