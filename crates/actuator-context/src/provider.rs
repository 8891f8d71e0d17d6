//! AST provider backed by the current editor.

use std::sync::Arc;

use actuator_core::ast::{AstNode, AstProvider, DocumentParser};
use actuator_core::editor::EditorProvider;

/// Offset to resolve the node under the cursor from.
///
/// When the cursor sits after spaces or tabs, steps back to the last
/// character before them so trailing whitespace resolves against the
/// preceding token. `None` when only whitespace precedes the cursor.
/// Offsets count characters.
pub fn normalize_offset(text: &str, offset: usize) -> Option<usize> {
    let preceding: Vec<char> = text.chars().take(offset).collect();
    if preceding.len() < offset {
        return Some(offset);
    }
    let blanks = preceding
        .iter()
        .rev()
        .take_while(|&&c| c == ' ' || c == '\t')
        .count();
    if blanks == 0 {
        return Some(offset);
    }
    (offset - blanks).checked_sub(1)
}

/// Parses the current editor's text on every request.
pub struct EditorAstProvider {
    editors: Arc<dyn EditorProvider>,
    parser: Arc<dyn DocumentParser>,
}

impl EditorAstProvider {
    pub fn new(editors: Arc<dyn EditorProvider>, parser: Arc<dyn DocumentParser>) -> Self {
        Self { editors, parser }
    }
}

impl AstProvider for EditorAstProvider {
    fn ast_root(&self) -> Option<Arc<dyn AstNode>> {
        let editor = self.editors.current_editor()?;
        let buffer = editor.buffer()?;
        self.parser.parse(&editor.path(), &buffer.text())
    }

    /// Innermost node at the normalized cursor offset, or the root when
    /// nothing narrower covers it.
    fn selected_node(&self) -> Option<Arc<dyn AstNode>> {
        let editor = self.editors.current_editor()?;
        let root = self.ast_root()?;
        let offset = editor
            .buffer()?
            .character_index_for_position(editor.cursor_buffer_position());

        normalize_offset(&editor.text(), offset)
            .and_then(|offset| root.find_element_at_offset(offset))
            .or(Some(root))
    }
}
