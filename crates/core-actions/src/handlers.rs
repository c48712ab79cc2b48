//! The three `Key`-topic subscribers plus the `SubmittedCommand` subscriber,
//! registered onto the orchestrator's `EventBus<EditorContext>` in this
//! order. Every handler receives every `Key` event regardless of `target` —
//! each decides for itself whether the event concerns it, per §4.9/§4.10.

use crate::commands::execute_command;
use crate::context::EditorContext;
use crate::io_ops::{self, SaveResult};
use core_events::{Event, KeyCode, KeyModifiers, KeyTarget, Mode};
use core_model::Tab;

/// Window's global Ctrl-bindings: tab navigation, close, and save. These
/// fire in every mode, so `target` is ignored entirely.
pub fn window_global_handler(event: &Event, ctx: &mut EditorContext) {
    let Event::Key { key, .. } = event else {
        return;
    };
    if !key.mods.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Char('q') => ctx.window.previous_tab(),
        KeyCode::Char('e') => ctx.window.next_tab(),
        KeyCode::Char('t') => ctx.window.add_tab(Tab::new("new tab")),
        KeyCode::Char('w') => ctx.window.close_tab(),
        KeyCode::Char('s') => match io_ops::save_tab(ctx.window.active_tab()) {
            SaveResult::Success => {}
            SaveResult::NoPath => {
                ctx.state.set_mode(Mode::Command);
                ctx.state.seed_command("path ");
                ctx.pending.push_back(Event::ModeChanged { mode: Mode::Command });
            }
            SaveResult::Error(e) => {
                ctx.state.toast_message(format!("save failed: {e}"));
                ctx.pending.push_back(Event::StateChanged);
            }
        },
        _ => {}
    }
}

/// State's own key handling: entering Insert/Command mode from View, and
/// editing the pending command line once in Command mode.
pub fn state_mode_handler(event: &Event, ctx: &mut EditorContext) {
    let Event::Key { target, key } = event else {
        return;
    };
    match target {
        KeyTarget::None => match key.code {
            KeyCode::Char('i') if key.mods.is_empty() => {
                ctx.state.set_mode(Mode::Insert);
                ctx.pending.push_back(Event::ModeChanged { mode: Mode::Insert });
            }
            KeyCode::Char(':') if key.mods.is_empty() => {
                ctx.state.set_mode(Mode::Command);
                ctx.pending.push_back(Event::ModeChanged { mode: Mode::Command });
            }
            _ => {}
        },
        KeyTarget::State => match key.code {
            KeyCode::Escape => {
                ctx.state.set_mode(Mode::View);
                ctx.pending.push_back(Event::ModeChanged { mode: Mode::View });
            }
            KeyCode::Enter => {
                let command = ctx.state.command_text();
                ctx.state.set_mode(Mode::View);
                ctx.pending.push_back(Event::SubmittedCommand { command });
            }
            KeyCode::Backspace => ctx.state.delete_last_from_command(),
            KeyCode::Char(c) => ctx.state.append_to_command(c),
            _ => {}
        },
        KeyTarget::Tab => {}
    }
}

/// Insert-mode editing of the active tab's document.
pub fn tab_edit_handler(event: &Event, ctx: &mut EditorContext) {
    let Event::Key { target: KeyTarget::Tab, key } = event else {
        return;
    };
    let tab = ctx.window.active_tab_mut();
    match key.code {
        KeyCode::Enter => tab.insert_newline(),
        KeyCode::Backspace => tab.backspace(),
        KeyCode::Delete => tab.delete(),
        KeyCode::Escape => {
            ctx.state.set_mode(Mode::View);
            ctx.pending.push_back(Event::ModeChanged { mode: Mode::View });
        }
        KeyCode::Char(c) => tab.insert_rune(c),
        _ => {}
    }
}

/// Runs the submitted command-line text through the command grammar.
pub fn submitted_command_handler(event: &Event, ctx: &mut EditorContext) {
    if let Event::SubmittedCommand { command } = event {
        tracing::debug!(target: "dispatch", %command, "submitted_command");
        execute_command(command, &mut ctx.window, &mut ctx.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{EventBus, KeyDescriptor, Topic};
    use core_layout::Element;

    fn bus_with_handlers() -> EventBus<EditorContext> {
        let mut bus = EventBus::new();
        bus.subscribe(Topic::Key, window_global_handler);
        bus.subscribe(Topic::Key, state_mode_handler);
        bus.subscribe(Topic::Key, tab_edit_handler);
        bus.subscribe(Topic::SubmittedCommand, submitted_command_handler);
        bus
    }

    fn fresh_ctx() -> EditorContext {
        EditorContext::new(core_model::Window::new(), core_state::State::new(), core_config::Config::default())
    }

    #[test]
    fn colon_from_view_mode_enters_command_mode() {
        let mut bus = bus_with_handlers();
        let mut ctx = fresh_ctx();
        bus.emit(
            Event::Key {
                target: KeyTarget::None,
                key: KeyDescriptor::new(KeyCode::Char(':'), KeyModifiers::empty()),
            },
            &mut ctx,
        );
        assert!(ctx.state.is_mode(Mode::Command));
    }

    #[test]
    fn scenario_d_ctrl_e_saturates_at_last_tab() {
        let mut bus = bus_with_handlers();
        let mut ctx = fresh_ctx();
        ctx.window.add_tab(core_model::Tab::new("second"));
        assert_eq!(ctx.window.active_index(), 1);
        bus.emit(
            Event::Key {
                target: KeyTarget::None,
                key: KeyDescriptor::new(KeyCode::Char('e'), KeyModifiers::CONTROL),
            },
            &mut ctx,
        );
        assert_eq!(ctx.window.active_index(), 1);
    }

    #[test]
    fn typing_a_command_and_pressing_enter_drains_into_submitted_command() {
        let mut bus = bus_with_handlers();
        let mut ctx = fresh_ctx();
        ctx.state.set_mode(Mode::Command);
        for ch in "xyz".chars() {
            bus.emit(
                Event::Key {
                    target: KeyTarget::State,
                    key: KeyDescriptor::new(KeyCode::Char(ch), KeyModifiers::empty()),
                },
                &mut ctx,
            );
        }
        bus.emit(
            Event::Key {
                target: KeyTarget::State,
                key: KeyDescriptor::new(KeyCode::Enter, KeyModifiers::empty()),
            },
            &mut ctx,
        );
        while let Some(followup) = ctx.pending.pop_front() {
            bus.emit(followup, &mut ctx);
        }
        assert_eq!(ctx.state.toast().unwrap().message, "unknown command: xyz");
    }

    #[test]
    fn insert_mode_printable_key_inserts_into_active_tab() {
        let mut bus = bus_with_handlers();
        let mut ctx = fresh_ctx();
        ctx.window.active_tab_mut().set_assigned_size(core_render::Size::new(80, 24));
        bus.emit(
            Event::Key {
                target: KeyTarget::Tab,
                key: KeyDescriptor::new(KeyCode::Char('a'), KeyModifiers::empty()),
            },
            &mut ctx,
        );
        assert_eq!(
            ctx.window.active_tab().document().line(0).to_string_lossy(),
            "a"
        );
    }
}
