//! Gap-buffer backed line storage and the document that owns a sequence of them.
//!
//! `Line` is the single-line gap buffer described by the editor's data model:
//! a fixed-capacity array of `char`s split into a left region, a gap, and a
//! right region, with the cursor always sitting at `gap_start`. `Document` is
//! an ordered, never-empty sequence of `Line`s with the split/join operations
//! a tab needs for newline insertion, backspace-at-column-zero, and
//! delete-at-end-of-line.

const DEFAULT_CAPACITY: usize = 64;

/// A single line of text backed by a gap buffer.
#[derive(Debug, Clone)]
pub struct Line {
    buf: Vec<char>,
    gap_start: usize,
    gap_end: usize,
}

impl Line {
    /// An empty line with room for `capacity` characters before the first grow.
    pub fn new_empty(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Line {
            buf: vec!['\0'; capacity],
            gap_start: 0,
            gap_end: capacity,
        }
    }

    /// A line seeded with `content`. If `cursor_at_start`, the gap (and
    /// cursor) sits before all of `content`; otherwise it sits after it,
    /// which is how a freshly loaded file line is constructed.
    pub fn from_chars(content: &[char], cursor_at_start: bool) -> Self {
        let capacity = (content.len() * 2).max(DEFAULT_CAPACITY);
        let mut buf = vec!['\0'; capacity];
        let gap_len = capacity - content.len();
        if cursor_at_start {
            buf[gap_len..].copy_from_slice(content);
            Line {
                buf,
                gap_start: 0,
                gap_end: gap_len,
            }
        } else {
            buf[..content.len()].copy_from_slice(content);
            Line {
                buf,
                gap_start: content.len(),
                gap_end: capacity,
            }
        }
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Logical length: number of characters outside the gap.
    pub fn len(&self) -> usize {
        self.capacity() - (self.gap_end - self.gap_start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cursor position, which is always `gap_start`.
    pub fn cursor_pos(&self) -> usize {
        self.gap_start
    }

    /// Insert `r` at the cursor and advance the cursor past it.
    pub fn insert(&mut self, r: char) {
        if self.gap_start == self.gap_end {
            self.grow();
        }
        self.buf[self.gap_start] = r;
        self.gap_start += 1;
    }

    /// Delete the character immediately before the cursor. No-op at column 0.
    pub fn delete_before_cursor(&mut self) {
        if self.gap_start > 0 {
            self.gap_start -= 1;
        }
    }

    /// Delete the character immediately after the cursor. No-op at end.
    pub fn delete_after_cursor(&mut self) {
        if self.gap_end < self.capacity() {
            self.gap_end += 1;
        }
    }

    /// Move the cursor to logical position `pos`, clamped to `[0, len()]`.
    pub fn move_cursor_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            for i in 0..shift {
                self.buf[self.gap_end - 1 - i] = self.buf[self.gap_start - 1 - i];
            }
            self.gap_start -= shift;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            for i in 0..shift {
                self.buf[self.gap_start + i] = self.buf[self.gap_end + i];
            }
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Return everything after the cursor and logically empty the right
    /// region. Returns an empty vec if the cursor is already at the end.
    pub fn cut_after_cursor(&mut self) -> Vec<char> {
        let tail: Vec<char> = self.buf[self.gap_end..].to_vec();
        self.gap_end = self.capacity();
        tail
    }

    /// Move this line's cursor to its end, then insert every rune of `other`.
    pub fn append_from(&mut self, other: &Line) {
        self.move_cursor_to(self.len());
        for (_, r) in other.runes() {
            self.insert(r);
        }
    }

    /// A restartable lazy sequence of `(logical_index, rune)` pairs: left
    /// region first, then right region, indices in logical space.
    pub fn runes(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        let left = self.buf[..self.gap_start].iter().copied();
        let right = self.buf[self.gap_end..].iter().copied();
        left.chain(right).enumerate()
    }

    /// Materialize the logical contents as a `String`.
    pub fn to_string_lossy(&self) -> String {
        self.runes().map(|(_, r)| r).collect()
    }

    /// Double the backing array, preserving the right region's offset from
    /// the end of the buffer.
    fn grow(&mut self) {
        let old_cap = self.capacity();
        let new_cap = (old_cap * 2).max(1);
        let right_len = old_cap - self.gap_end;
        let mut new_buf = vec!['\0'; new_cap];
        new_buf[..self.gap_start].copy_from_slice(&self.buf[..self.gap_start]);
        let new_gap_end = new_cap - right_len;
        new_buf[new_gap_end..].copy_from_slice(&self.buf[self.gap_end..]);
        self.buf = new_buf;
        self.gap_end = new_gap_end;
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new_empty(DEFAULT_CAPACITY)
    }
}

/// An ordered, never-empty sequence of lines.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// A document with a single empty line.
    pub fn new() -> Self {
        Document {
            lines: vec![Line::new_empty(DEFAULT_CAPACITY)],
        }
    }

    /// A document with a single empty line whose gap starts at `capacity`
    /// chars, overriding the built-in default.
    pub fn with_capacity(capacity: usize) -> Self {
        Document {
            lines: vec![Line::new_empty(capacity)],
        }
    }

    /// Build a document from file content: split on line feeds, each line
    /// seeded with the gap at the end (cursor past all content).
    pub fn from_str(content: &str) -> Self {
        let mut lines: Vec<Line> = content
            .lines()
            .map(|l| Line::from_chars(&l.chars().collect::<Vec<_>>(), false))
            .collect();
        if lines.is_empty() {
            lines.push(Line::new_empty(DEFAULT_CAPACITY));
        }
        Document { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> &Line {
        &self.lines[idx]
    }

    pub fn line_mut(&mut self, idx: usize) -> &mut Line {
        &mut self.lines[idx]
    }

    /// Split line `at` at column `col`: the tail becomes a new line inserted
    /// right after it.
    pub fn insert_newline(&mut self, at: usize, col: usize) {
        self.lines[at].move_cursor_to(col);
        let tail = self.lines[at].cut_after_cursor();
        let new_line = Line::from_chars(&tail, true);
        self.lines.insert(at + 1, new_line);
    }

    /// Merge line `at` onto line `at - 1`, removing line `at`. `at` must be > 0.
    pub fn join_with_previous(&mut self, at: usize) {
        debug_assert!(at > 0);
        let moved = self.lines.remove(at);
        self.lines[at - 1].append_from(&moved);
    }

    /// Merge line `at + 1` onto line `at`, removing line `at + 1`. `at` must
    /// be less than `line_count() - 1`.
    pub fn join_with_next(&mut self, at: usize) {
        debug_assert!(at + 1 < self.lines.len());
        let moved = self.lines.remove(at + 1);
        self.lines[at].append_from(&moved);
    }

    /// Serialize to a string with lines joined by `\n` and no trailing
    /// newline, per the save contract.
    pub fn to_content_string(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_runes_preserve_order() {
        let mut line = Line::new_empty(4);
        for r in "hi".chars() {
            line.insert(r);
        }
        assert_eq!(line.to_string_lossy(), "hi");
        assert_eq!(line.cursor_pos(), 2);
    }

    #[test]
    fn grows_when_gap_exhausted() {
        let mut line = Line::new_empty(2);
        for r in "hello".chars() {
            line.insert(r);
        }
        assert_eq!(line.to_string_lossy(), "hello");
    }

    #[test]
    fn move_cursor_to_shifts_regions_both_ways() {
        let mut line = Line::new_empty(8);
        for r in "abcdef".chars() {
            line.insert(r);
        }
        line.move_cursor_to(2);
        assert_eq!(line.cursor_pos(), 2);
        line.insert('X');
        assert_eq!(line.to_string_lossy(), "abXcdef");
        line.move_cursor_to(line.len());
        assert_eq!(line.cursor_pos(), line.len());
    }

    #[test]
    fn move_cursor_to_clamps_out_of_range() {
        let mut line = Line::from_chars(&['a', 'b', 'c'], true);
        line.move_cursor_to(99);
        assert_eq!(line.cursor_pos(), 3);
        line.move_cursor_to(usize::MAX);
        assert_eq!(line.cursor_pos(), 3);
    }

    #[test]
    fn delete_before_and_after_cursor_are_bounded() {
        let mut line = Line::from_chars(&['a', 'b'], true);
        line.delete_before_cursor();
        assert_eq!(line.cursor_pos(), 0);
        assert_eq!(line.to_string_lossy(), "ab");
        line.delete_after_cursor();
        assert_eq!(line.to_string_lossy(), "b");
    }

    #[test]
    fn cut_after_cursor_then_reinsert_round_trips() {
        let mut line = Line::new_empty(8);
        for r in "hello world".chars() {
            line.insert(r);
        }
        line.move_cursor_to(5);
        let tail = line.cut_after_cursor();
        assert_eq!(tail.iter().collect::<String>(), " world");
        assert_eq!(line.to_string_lossy(), "hello");
        for r in tail {
            line.insert(r);
        }
        assert_eq!(line.to_string_lossy(), "hello world");
    }

    #[test]
    fn append_from_joins_logical_content() {
        let mut a = Line::from_chars(&['a', 'b'], false);
        let b = Line::from_chars(&['c', 'd'], false);
        a.append_from(&b);
        assert_eq!(a.to_string_lossy(), "abcd");
    }

    #[test]
    fn document_insert_newline_splits_at_column() {
        let mut doc = Document::from_str("hello");
        doc.insert_newline(0, 2);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(0).to_string_lossy(), "he");
        assert_eq!(doc.line(1).to_string_lossy(), "llo");
    }

    #[test]
    fn document_join_with_previous_reverses_split() {
        let mut doc = Document::from_str("hello");
        doc.insert_newline(0, 2);
        doc.join_with_previous(1);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0).to_string_lossy(), "hello");
    }

    #[test]
    fn document_join_with_next_merges_following_line() {
        let mut doc = Document::from_str("abc\ndef");
        doc.join_with_next(0);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0).to_string_lossy(), "abcdef");
    }

    #[test]
    fn from_str_on_trailing_newline_has_no_empty_tail_line() {
        let doc = Document::from_str("a\nb\n");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn from_str_empty_content_has_one_empty_line() {
        let doc = Document::from_str("");
        assert_eq!(doc.line_count(), 1);
        assert!(doc.line(0).is_empty());
    }

    #[test]
    fn to_content_string_round_trips_without_trailing_newline() {
        let doc = Document::from_str("a\nb\nc");
        assert_eq!(doc.to_content_string(), "a\nb\nc");
    }
}
