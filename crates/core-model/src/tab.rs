//! A tab: a document paired with a caret, a viewport, and an optional save
//! path.

use core_layout::Element;
use core_render::{Point, Screen, Size};
use core_text::Document;
use std::path::{Path, PathBuf};

pub struct Tab {
    document: Document,
    path: Option<PathBuf>,
    display_name: String,
    line_index: usize,
    column_index: usize,
    cx: u16,
    cy: u16,
    size: Size,
}

impl Tab {
    pub fn new(display_name: impl Into<String>) -> Self {
        Tab {
            document: Document::new(),
            path: None,
            display_name: display_name.into(),
            line_index: 0,
            column_index: 0,
            cx: 0,
            cy: 0,
            size: Size::default(),
        }
    }

    /// An empty tab whose initial line is allocated with `gap_capacity`
    /// chars instead of the built-in default.
    pub fn with_capacity(display_name: impl Into<String>, gap_capacity: usize) -> Self {
        Tab {
            document: Document::with_capacity(gap_capacity),
            path: None,
            display_name: display_name.into(),
            line_index: 0,
            column_index: 0,
            cx: 0,
            cy: 0,
            size: Size::default(),
        }
    }

    /// Open `path`: if it exists, load its content; otherwise bind an empty
    /// tab to that path (so `:w` later creates the file). Either way the
    /// display name is the path's basename.
    pub fn open_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let display_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        let document = match std::fs::read_to_string(path) {
            Ok(content) => Document::from_str(&content),
            Err(e) => {
                tracing::warn!(target: "model.tab", path = %path.display(), error = %e, "open_failed_starting_empty");
                Document::new()
            }
        };
        Tab {
            document,
            path: Some(path.to_path_buf()),
            display_name,
            line_index: 0,
            column_index: 0,
            cx: 0,
            cy: 0,
            size: Size::default(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Set the save path (and display name) — used by the `path <P>`
    /// command.
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.display_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        self.path = Some(path.to_path_buf());
    }

    pub fn caret(&self) -> (usize, usize) {
        (self.line_index, self.column_index)
    }

    fn current_line_len(&self) -> usize {
        self.document.line(self.line_index).len()
    }

    pub fn insert_rune(&mut self, r: char) {
        self.document.line_mut(self.line_index).insert(r);
        self.column_index += 1;
        self.cx += 1;
    }

    pub fn backspace(&mut self) {
        if self.column_index > 0 {
            self.document.line_mut(self.line_index).delete_before_cursor();
            self.column_index -= 1;
            self.cx = self.cx.saturating_sub(1);
        } else if self.line_index > 0 {
            let prev_len = self.document.line(self.line_index - 1).len();
            self.document.join_with_previous(self.line_index);
            self.column_index = prev_len;
            self.line_index -= 1;
            self.cy = self.cy.saturating_sub(1);
            self.cx = (prev_len as u16).min(self.size.width.saturating_sub(1));
            self.document
                .line_mut(self.line_index)
                .move_cursor_to(self.column_index);
        }
    }

    pub fn delete(&mut self) {
        if self.column_index < self.current_line_len() {
            self.document.line_mut(self.line_index).delete_after_cursor();
        } else if self.line_index + 1 < self.document.line_count() {
            self.document.join_with_next(self.line_index);
        }
    }

    pub fn insert_newline(&mut self) {
        self.document.insert_newline(self.line_index, self.column_index);
        self.line_index += 1;
        self.column_index = 0;
        self.cx = 0;
        let max_cy = self.size.height.saturating_sub(1);
        self.cy = (self.cy + 1).min(max_cy);
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let line_count = self.document.line_count();
        let height = self.size.height.max(1);
        let max_cy = (height - 1).min(self.cy + (line_count - self.line_index - 1) as u16);

        let new_line_index = (self.line_index as i64 + dy as i64)
            .clamp(0, line_count as i64 - 1) as usize;
        self.line_index = new_line_index;

        let new_cy = (self.cy as i64 + dy as i64).clamp(0, max_cy as i64) as u16;
        self.cy = new_cy;

        let line_len = self.current_line_len();
        let new_col = (self.column_index as i64 + dx as i64).max(0) as usize;
        self.column_index = new_col.min(line_len);

        self.document
            .line_mut(self.line_index)
            .move_cursor_to(self.column_index);
        self.cx = (self.column_index as u16).min(self.size.width.saturating_sub(1));
    }

    /// Whether the caret sits over an actual character (so rendering should
    /// invert that cell rather than asking for the terminal's hardware
    /// cursor).
    pub fn caret_over_char(&self) -> bool {
        self.column_index < self.current_line_len()
    }

    pub fn screen_caret(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

impl Element for Tab {
    fn name(&self) -> &str {
        "Tab"
    }

    fn preferred_size(&self) -> Size {
        Size::default()
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.size = size;
        let max_cy = size.height.saturating_sub(1);
        if self.cy > max_cy {
            self.cy = max_cy;
        }
    }

    fn assigned_size(&self) -> Size {
        self.size
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let height = self.size.height;
        let width = self.size.width;
        if height == 0 || width == 0 {
            return self.size;
        }
        let top_line = self.line_index.saturating_sub(self.cy as usize);
        for row in 0..height {
            let line_idx = top_line + row as usize;
            if line_idx >= self.document.line_count() {
                break;
            }
            let line = self.document.line(line_idx);
            for (col, ch) in line.runes() {
                if col as u16 >= width {
                    break;
                }
                let is_caret = line_idx == self.line_index && col == self.column_index;
                screen.set_cell(origin.x + col as u16, origin.y + row, ch, is_caret);
            }
        }
        if !self.caret_over_char() {
            screen.show_cursor(Point::new(
                origin.x + self.cx.min(width.saturating_sub(1)),
                origin.y + self.cy,
            ));
        }
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_with_size(w: u16, h: u16) -> Tab {
        let mut tab = Tab::new("new tab");
        tab.set_assigned_size(Size::new(w, h));
        tab
    }

    #[test]
    fn insert_rune_advances_caret_and_column() {
        let mut tab = tab_with_size(80, 24);
        tab.insert_rune('a');
        tab.insert_rune('b');
        assert_eq!(tab.caret(), (0, 2));
        assert_eq!(tab.document().line(0).to_string_lossy(), "ab");
    }

    #[test]
    fn scenario_b_split_and_rejoin() {
        let mut tab = Tab::new("t");
        tab.set_assigned_size(Size::new(80, 24));
        for r in "hello".chars() {
            tab.insert_rune(r);
        }
        tab.move_cursor(-3, 0);
        assert_eq!(tab.caret().1, 2);
        tab.insert_newline();
        tab.backspace();
        assert_eq!(tab.document().line_count(), 1);
        assert_eq!(tab.document().line(0).to_string_lossy(), "hello");
        assert_eq!(tab.caret(), (0, 2));
    }

    #[test]
    fn scenario_c_multiline_delete_at_eol() {
        let mut document_tab = Tab::new("t");
        document_tab.set_assigned_size(Size::new(80, 24));
        for r in "abc".chars() {
            document_tab.insert_rune(r);
        }
        document_tab.insert_newline();
        for r in "def".chars() {
            document_tab.insert_rune(r);
        }
        document_tab.move_cursor(0, -1);
        document_tab.move_cursor(3, 0);
        assert_eq!(document_tab.caret(), (0, 3));
        document_tab.delete();
        assert_eq!(document_tab.document().line_count(), 1);
        assert_eq!(document_tab.document().line(0).to_string_lossy(), "abcdef");
        assert_eq!(document_tab.caret(), (0, 3));
    }

    #[test]
    fn backspace_at_column_zero_joins_with_previous_line() {
        let mut tab = tab_with_size(80, 24);
        for r in "ab".chars() {
            tab.insert_rune(r);
        }
        tab.insert_newline();
        for r in "cd".chars() {
            tab.insert_rune(r);
        }
        tab.move_cursor(-2, 0);
        assert_eq!(tab.caret(), (1, 0));
        tab.backspace();
        assert_eq!(tab.document().line_count(), 1);
        assert_eq!(tab.document().line(0).to_string_lossy(), "abcd");
        assert_eq!(tab.caret(), (0, 2));
    }

    #[test]
    fn move_cursor_horizontal_clamps_at_line_end_without_wrapping() {
        let mut tab = tab_with_size(80, 24);
        for r in "hi".chars() {
            tab.insert_rune(r);
        }
        tab.move_cursor(10, 0);
        assert_eq!(tab.caret(), (0, 2));
    }

    #[test]
    fn insert_then_backspace_is_a_no_op_round_trip() {
        let mut tab = tab_with_size(80, 24);
        for r in "abc".chars() {
            tab.insert_rune(r);
        }
        let before = tab.document().line(0).to_string_lossy();
        let before_caret = tab.caret();
        tab.insert_rune('X');
        tab.backspace();
        assert_eq!(tab.document().line(0).to_string_lossy(), before);
        assert_eq!(tab.caret(), before_caret);
    }

    #[test]
    fn open_or_empty_on_missing_path_binds_empty_document() {
        let tab = Tab::open_or_empty("./does_not_exist_surely.txt");
        assert_eq!(tab.display_name(), "does_not_exist_surely.txt");
        assert!(tab.document().line(0).is_empty());
        assert_eq!(tab.document().line_count(), 1);
    }
}
