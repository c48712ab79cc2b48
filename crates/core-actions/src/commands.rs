//! The `:`-command grammar, interpreted by `execute_command` per the
//! orchestrator's command table. `w` and `q` are independent predicates
//! (not an else-if chain) so `wq` runs both, `w` first; if the save fails,
//! `q` is not honored.

use crate::io_ops::{self, SaveResult};
use core_events::Mode;
use core_model::{Tab, Window};
use core_state::State;

pub fn execute_command(cmd: &str, window: &mut Window, state: &mut State) {
    if let Some(path) = cmd.strip_prefix("path ") {
        window.active_tab_mut().set_path(path);
        return;
    }
    if let Some(path) = cmd.strip_prefix("open ") {
        window.add_tab(Tab::open_or_empty(path));
        return;
    }

    let mut handled = false;
    if cmd.contains('w') {
        handled = true;
        match io_ops::save_tab(window.active_tab()) {
            SaveResult::Success => {}
            SaveResult::NoPath => {
                state.set_mode(Mode::Command);
                state.seed_command("path ");
                return;
            }
            SaveResult::Error(e) => {
                state.toast_message(format!("save failed: {e}"));
                return;
            }
        }
    }
    if cmd.contains('q') {
        handled = true;
        state.set_finished();
    }
    if !handled {
        state.toast_message(format!("unknown command: {cmd}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_a_save_without_path_seeds_path_command() {
        let mut window = Window::new();
        let mut state = State::new();
        execute_command("wq", &mut window, &mut state);
        assert!(state.is_mode(Mode::Command));
        assert_eq!(state.command_text(), "path ");
        assert!(!state.is_finished());
    }

    #[test]
    fn scenario_f_unknown_command_toasts() {
        let mut window = Window::new();
        let mut state = State::new();
        execute_command("xyz", &mut window, &mut state);
        assert_eq!(state.toast().unwrap().message, "unknown command: xyz");
        assert!(state.is_mode(Mode::View));
    }

    #[test]
    fn path_then_wq_saves_and_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut window = Window::new();
        let mut state = State::new();
        execute_command(&format!("path {}", path.display()), &mut window, &mut state);
        execute_command("wq", &mut window, &mut state);
        assert!(state.is_finished());
        assert!(path.exists());
    }

    #[test]
    fn open_adds_and_activates_a_new_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.txt");
        std::fs::write(&path, "hello").unwrap();
        let mut window = Window::new();
        let mut state = State::new();
        execute_command(&format!("open {}", path.display()), &mut window, &mut state);
        assert_eq!(window.tabs().len(), 2);
        assert_eq!(window.active_tab().document().line(0).to_string_lossy(), "hello");
    }

    #[test]
    fn q_alone_finishes_without_saving() {
        let mut window = Window::new();
        let mut state = State::new();
        execute_command("q", &mut window, &mut state);
        assert!(state.is_finished());
    }
}
