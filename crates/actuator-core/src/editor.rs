//! Editor collaborator contracts and an in-memory implementation.
//!
//! All offsets are character indices from the start of the document, rows
//! and columns are zero based and only `\n` separates rows.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::slot::Slot;

/// Position in text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Range of positions in text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Text buffer behind an editor.
pub trait TextBuffer: Send + Sync {
    /// Position of the character at `offset`.
    fn position_for_character_index(&self, offset: usize) -> Point;

    /// Offset of `position`.
    fn character_index_for_position(&self, position: Point) -> usize;

    /// Range covering `row`, optionally including its line terminator.
    fn range_for_row(&self, row: usize, include_newline: bool) -> Range;

    fn text_in_range(&self, range: Range) -> String;

    /// Replace the text in `range`, returning the range of the inserted text.
    fn set_text_in_range(&self, range: Range, text: &str) -> Range;

    fn text(&self) -> String;

    /// Position just past the last character.
    fn end_position(&self) -> Point;
}

/// Editable surface able to provide its buffer and cursor.
pub trait Editor: Send + Sync {
    /// Complete text of the open document.
    fn text(&self) -> String;

    fn buffer(&self) -> Option<Arc<dyn TextBuffer>>;

    /// Path of the open document.
    fn path(&self) -> String;

    fn cursor_buffer_position(&self) -> Point;

    fn set_text(&self, text: &str);
}

/// Yields the currently active editor, if any.
pub trait EditorProvider: Send + Sync {
    fn current_editor(&self) -> Option<Arc<dyn Editor>>;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// A `String`-backed [`TextBuffer`].
#[derive(Debug, Default)]
pub struct MemoryBuffer {
    text: Mutex<String>,
}

impl MemoryBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
        }
    }

    pub fn set_text(&self, text: &str) {
        *self.text.lock() = text.to_string();
    }
}

fn position_in(text: &str, offset: usize) -> Point {
    let mut point = Point::default();
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            point.row += 1;
            point.column = 0;
        } else {
            point.column += 1;
        }
    }
    point
}

fn index_in(text: &str, position: Point) -> usize {
    let mut offset = 0;
    let mut lines = text.split('\n').peekable();
    let mut row = 0;
    while let Some(line) = lines.next() {
        let width = line.chars().count();
        if row == position.row || lines.peek().is_none() {
            return offset + position.column.min(width);
        }
        offset += width + 1;
        row += 1;
    }
    offset
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl TextBuffer for MemoryBuffer {
    fn position_for_character_index(&self, offset: usize) -> Point {
        position_in(&self.text.lock(), offset)
    }

    fn character_index_for_position(&self, position: Point) -> usize {
        index_in(&self.text.lock(), position)
    }

    fn range_for_row(&self, row: usize, include_newline: bool) -> Range {
        let text = self.text.lock();
        let rows: Vec<&str> = text.split('\n').collect();
        let row = row.min(rows.len().saturating_sub(1));
        let width = rows.get(row).map(|l| l.chars().count()).unwrap_or(0);
        let start = Point::new(row, 0);
        if include_newline && row + 1 < rows.len() {
            Range::new(start, Point::new(row + 1, 0))
        } else {
            Range::new(start, Point::new(row, width))
        }
    }

    fn text_in_range(&self, range: Range) -> String {
        let text = self.text.lock();
        let start = index_in(&text, range.start);
        let end = index_in(&text, range.end).max(start);
        text.chars().skip(start).take(end - start).collect()
    }

    fn set_text_in_range(&self, range: Range, replacement: &str) -> Range {
        let mut text = self.text.lock();
        let start = index_in(&text, range.start);
        let end = index_in(&text, range.end).max(start);
        let (start_byte, end_byte) = (byte_index(&text, start), byte_index(&text, end));
        text.replace_range(start_byte..end_byte, replacement);
        let inserted_end = start + replacement.chars().count();
        Range::new(position_in(&text, start), position_in(&text, inserted_end))
    }

    fn text(&self) -> String {
        self.text.lock().clone()
    }

    fn end_position(&self) -> Point {
        let text = self.text.lock();
        position_in(&text, text.chars().count())
    }
}

/// An [`Editor`] over a [`MemoryBuffer`] with a movable cursor.
#[derive(Debug)]
pub struct MemoryEditor {
    path: String,
    buffer: Arc<MemoryBuffer>,
    cursor: Mutex<Point>,
}

impl MemoryEditor {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            buffer: Arc::new(MemoryBuffer::new(text)),
            cursor: Mutex::new(Point::default()),
        }
    }

    pub fn set_cursor(&self, position: Point) {
        *self.cursor.lock() = position;
    }

    /// Move the cursor to a character offset.
    pub fn set_cursor_offset(&self, offset: usize) {
        let position = self.buffer.position_for_character_index(offset);
        self.set_cursor(position);
    }
}

impl Editor for MemoryEditor {
    fn text(&self) -> String {
        self.buffer.text()
    }

    fn buffer(&self) -> Option<Arc<dyn TextBuffer>> {
        Some(Arc::clone(&self.buffer) as Arc<dyn TextBuffer>)
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn cursor_buffer_position(&self) -> Point {
        *self.cursor.lock()
    }

    fn set_text(&self, text: &str) {
        self.buffer.set_text(text);
    }
}

/// Provider returning whichever editor was last made current.
#[derive(Default)]
pub struct CurrentEditor {
    editor: Slot<dyn Editor>,
}

impl CurrentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(editor: Arc<dyn Editor>) -> Self {
        Self {
            editor: Slot::with(editor),
        }
    }

    pub fn set(&self, editor: Arc<dyn Editor>) {
        self.editor.set(editor);
    }

    pub fn clear(&self) {
        self.editor.clear();
    }
}

impl EditorProvider for CurrentEditor {
    fn current_editor(&self) -> Option<Arc<dyn Editor>> {
        self.editor.get()
    }
}
