//! Background input producers: a crossterm-event reader thread and
//! per-toast expiry timers, both handing their results to the UI thread over
//! a `crossbeam-channel` bounded channel rather than sharing state directly.

use core_events::{KeyCode, KeyDescriptor, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event as CEvent, KeyCode as CKeyCode, KeyModifiers as CMods};
use std::thread::JoinHandle;
use std::time::Duration;

/// Everything the UI thread's poll loop can receive from the background.
#[derive(Debug, Clone)]
pub enum Signal {
    Key(KeyDescriptor),
    Resize(u16, u16),
    /// A toast's expiry timer fired; carries the generation token the UI
    /// thread must compare against the currently displayed toast before
    /// clearing it (a stale timer must not clobber a newer toast).
    ToastExpired(u64),
}

fn map_modifiers(mods: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CMods::CONTROL) {
        out |= KeyModifiers::CONTROL;
    }
    if mods.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    if mods.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    out
}

fn map_key_code(code: CKeyCode) -> Option<KeyCode> {
    match code {
        CKeyCode::Char(c) => Some(KeyCode::Char(c)),
        CKeyCode::Enter => Some(KeyCode::Enter),
        CKeyCode::Esc => Some(KeyCode::Escape),
        CKeyCode::Backspace => Some(KeyCode::Backspace),
        CKeyCode::Delete => Some(KeyCode::Delete),
        CKeyCode::Left => Some(KeyCode::Left),
        CKeyCode::Right => Some(KeyCode::Right),
        CKeyCode::Up => Some(KeyCode::Up),
        CKeyCode::Down => Some(KeyCode::Down),
        _ => None,
    }
}

/// Spawn the background terminal-event producer. Blocks on `crossterm::event::read`
/// and forwards every key press and resize as a [`Signal`]; exits quietly once
/// `sender` disconnects (the UI thread has shut down).
pub fn spawn_terminal_reader(sender: Sender<Signal>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(target: "input", error = %e, "terminal_read_failed");
                    continue;
                }
            };
            let signal = match event {
                CEvent::Key(key_event) => {
                    let Some(code) = map_key_code(key_event.code) else {
                        continue;
                    };
                    Signal::Key(KeyDescriptor::new(code, map_modifiers(key_event.modifiers)))
                }
                CEvent::Resize(width, height) => Signal::Resize(width, height),
                _ => continue,
            };
            if sender.send(signal).is_err() {
                break;
            }
        }
    })
}

/// Spawn a one-shot timer for a toast's expiry. `generation` is the token
/// the UI thread compares against the currently displayed toast.
pub fn spawn_toast_timer(sender: Sender<Signal>, generation: u64, duration: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || {
        std::thread::sleep(duration);
        let _ = sender.send(Signal::ToastExpired(generation));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_timer_posts_expiry_with_matching_generation() {
        let (tx, rx) = crossbeam_channel::unbounded();
        spawn_toast_timer(tx, 7, Duration::from_millis(10));
        let signal = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        match signal {
            Signal::ToastExpired(generation) => assert_eq!(generation, 7),
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[test]
    fn map_key_code_recognizes_editing_keys() {
        assert_eq!(map_key_code(CKeyCode::Enter), Some(KeyCode::Enter));
        assert_eq!(map_key_code(CKeyCode::Char('x')), Some(KeyCode::Char('x')));
        assert_eq!(map_key_code(CKeyCode::F(1)), None);
    }

    #[test]
    fn map_modifiers_translates_control() {
        let mods = map_modifiers(CMods::CONTROL);
        assert!(mods.contains(KeyModifiers::CONTROL));
        assert!(!mods.contains(KeyModifiers::SHIFT));
    }
}
