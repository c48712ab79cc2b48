//! Global editor state: mode, the pending command line, the transient toast,
//! and the `finished` flag that ends the program. Renders the one-line
//! status bar.

use core_events::Mode;
use core_layout::Element;
use core_render::{Point, Screen, Size, draw_text};
use core_text::Line;

const DEFAULT_COMMAND_LINE_CAPACITY: usize = 64;

/// A transient status message with a generation token so a stale expiry
/// timer can never clear a newer toast (see `core-input`'s toast timer).
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub generation: u64,
}

/// Global editor state. Owns the pending command line (itself a gap-buffer
/// `Line`, reused rather than a bare string, so the command line gets the
/// same caret semantics as a document line) and the current toast, if any.
pub struct State {
    mode: Mode,
    command_line: Line,
    toast: Option<Toast>,
    finished: bool,
    next_toast_generation: u64,
    size: Size,
}

impl State {
    pub fn new() -> Self {
        State {
            mode: Mode::View,
            command_line: Line::new_empty(DEFAULT_COMMAND_LINE_CAPACITY),
            toast: None,
            finished: false,
            next_toast_generation: 0,
            size: Size::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_mode(&self, mode: Mode) -> bool {
        self.mode == mode
    }

    /// Switch mode, resetting the pending command line and clearing any
    /// toast. Does not itself emit `ModeChanged` — the caller (the
    /// orchestrator's dispatch handlers) does that, since only it knows
    /// whether this transition originated from a bus event worth re-raising.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset_command_line();
        self.toast = None;
    }

    pub fn command_line(&self) -> &Line {
        &self.command_line
    }

    pub fn append_to_command(&mut self, r: char) {
        self.command_line.insert(r);
    }

    pub fn delete_last_from_command(&mut self) {
        self.command_line.delete_before_cursor();
    }

    pub fn command_text(&self) -> String {
        self.command_line.to_string_lossy()
    }

    /// Replace the pending command text outright, caret at the end — used
    /// to seed `"path "` when Ctrl-S or `:w` finds no save path set.
    pub fn seed_command(&mut self, text: &str) {
        self.command_line = Line::from_chars(&text.chars().collect::<Vec<_>>(), false);
    }

    pub fn reset_command_line(&mut self) {
        self.command_line = Line::new_empty(DEFAULT_COMMAND_LINE_CAPACITY);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self) {
        self.finished = true;
    }

    /// Set a toast message, returning the generation token its expiry timer
    /// must present for the clear to take effect.
    pub fn toast_message(&mut self, message: impl Into<String>) -> u64 {
        let generation = self.next_toast_generation;
        self.next_toast_generation += 1;
        let message = message.into();
        tracing::trace!(target: "state.toast", generation, %message, "posted");
        self.toast = Some(Toast { message, generation });
        generation
    }

    /// Clear the toast only if `generation` matches the currently displayed
    /// one; a superseded timer firing late is a no-op.
    pub fn clear_toast_if_current(&mut self, generation: u64) {
        if matches!(&self.toast, Some(t) if t.generation == generation) {
            self.toast = None;
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// The status-line text: the pending command in Command mode, else the
    /// active toast, else the mode banner.
    pub fn info_line(&self) -> String {
        if self.is_mode(Mode::Command) {
            format!(":{}", self.command_text())
        } else if let Some(toast) = &self.toast {
            toast.message.clone()
        } else {
            match self.mode {
                Mode::View => "-- VIEW --".to_string(),
                Mode::Insert => "-- INSERT --".to_string(),
                Mode::Command => unreachable!(),
            }
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}

impl Element for State {
    fn name(&self) -> &str {
        "State"
    }

    fn preferred_size(&self) -> Size {
        Size::new(0, 1)
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.size = Size::new(size.width, 1);
    }

    fn assigned_size(&self) -> Size {
        self.size
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let far = Point::new(origin.x + self.size.width.saturating_sub(1), origin.y);
        draw_text(screen, origin, far, &self.info_line());
        self.size
    }
}
