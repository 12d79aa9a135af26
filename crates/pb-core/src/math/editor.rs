//! Text buffer behind the math snippet editor

use super::symbols::Symbol;
use std::ops::Range;

/// Indentation inserted by the Tab key
pub const INDENT: &str = "  ";

/// Empty template slot
const SLOT: &str = "{}";

/// LaTeX input buffer with a selection
///
/// Offsets are byte offsets into the text and are always kept on char
/// boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathBuffer {
    text: String,
    selection: Range<usize>,
}

impl MathBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the finished text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Whether the buffer holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Current selection
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Cursor position (end of the selection)
    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// Select a range, clamped to the text and snapped to char boundaries
    pub fn set_selection(&mut self, range: Range<usize>) {
        let start = self.snap(range.start.min(range.end));
        let end = self.snap(range.start.max(range.end));
        self.selection = start..end;
    }

    /// Collapse the selection to a cursor
    pub fn set_cursor(&mut self, offset: usize) {
        self.set_selection(offset..offset);
    }

    /// Replace the whole text, cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::with_text(text);
    }

    fn snap(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn replace_selection(&mut self, insert: &str) -> usize {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, insert);
        start
    }

    /// Insert a palette symbol in place of the selection
    ///
    /// Plain symbols leave the cursor after the inserted LaTeX. Templates put
    /// it inside their first `{}` slot, or after the insertion when they have
    /// no slot.
    pub fn insert(&mut self, symbol: &Symbol) {
        let start = self.replace_selection(symbol.latex);
        let cursor = match (symbol.template, symbol.latex.find(SLOT)) {
            (true, Some(slot)) => start + slot + 1,
            _ => start + symbol.latex.len(),
        };
        self.set_cursor(cursor);
    }

    /// Insert raw text in place of the selection
    pub fn insert_str(&mut self, text: &str) {
        let start = self.replace_selection(text);
        self.set_cursor(start + text.len());
    }

    /// Tab key: indent in place of the selection
    pub fn indent(&mut self) {
        self.insert_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::symbols::{lookup, SymbolCategory};
    use pretty_assertions::assert_eq;

    fn symbol(key: &str) -> &'static Symbol {
        lookup(key).unwrap()
    }

    #[test]
    fn test_insert_plain_symbol_moves_cursor_after() {
        let mut buffer = MathBuffer::with_text("a  b");
        buffer.set_cursor(2);
        buffer.insert(symbol("π"));
        assert_eq!(buffer.text(), "a \\pi b");
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn test_insert_template_cursor_in_first_slot() {
        let mut buffer = MathBuffer::new();
        buffer.insert(symbol("Fraction"));
        assert_eq!(buffer.text(), "\\frac{}{}");
        assert_eq!(buffer.cursor(), 6);

        buffer.insert_str("1");
        assert_eq!(buffer.text(), "\\frac{1}{}");
    }

    #[test]
    fn test_insert_template_after_existing_text() {
        let mut buffer = MathBuffer::with_text("x = ");
        buffer.insert(symbol("√"));
        assert_eq!(buffer.text(), "x = \\sqrt{}");
        assert_eq!(buffer.cursor(), "x = \\sqrt{".len());
    }

    #[test]
    fn test_template_without_slot_cursor_after() {
        let mut buffer = MathBuffer::new();
        buffer.insert(symbol("∑"));
        assert_eq!(buffer.text(), "\\sum");
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buffer = MathBuffer::with_text("a + b");
        buffer.set_selection(2..3);
        buffer.insert(SymbolCategory::Basic.find("×").unwrap());
        assert_eq!(buffer.text(), "a \\times b");
        assert_eq!(buffer.selection(), 8..8);
    }

    #[test]
    fn test_indent() {
        let mut buffer = MathBuffer::with_text("ab");
        buffer.set_cursor(1);
        buffer.indent();
        assert_eq!(buffer.text(), "a  b");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_selection_snaps_to_char_boundary() {
        let mut buffer = MathBuffer::with_text("αβ");
        buffer.set_cursor(1);
        assert_eq!(buffer.cursor(), 0);
        buffer.set_selection(99..3);
        assert_eq!(buffer.selection(), 2..4);
    }

    #[test]
    fn test_blank_buffer() {
        assert!(MathBuffer::with_text("  \n").is_blank());
        assert!(!MathBuffer::with_text("x").is_blank());
    }

    #[test]
    fn test_set_text_resets_cursor() {
        let mut buffer = MathBuffer::new();
        buffer.set_text("x^2");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.into_text(), "x^2");
    }
}
