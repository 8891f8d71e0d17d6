//! Shared AST state driving engine batches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actuator_action::{ActionDescriptor, ActionEngine, TARGET_EDITOR_NODE};
use actuator_context::{AstStateCalculator, DerivedStateCalculator, GeneralAstState};
use actuator_core::ast::{AstNode, CompletionKind, DocumentParser};
use actuator_core::editor::{CurrentEditor, MemoryEditor};
use actuator_core::StateValue;

// =============================================================================
// Helpers
// =============================================================================

#[derive(Debug)]
struct Key {
    name: String,
}

impl AstNode for Key {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_element_at_offset(&self, _offset: usize) -> Option<Arc<dyn AstNode>> {
        None
    }
}

/// Root named after the first key; counts parses.
#[derive(Default)]
struct CountingParser {
    parses: AtomicUsize,
}

impl DocumentParser for CountingParser {
    fn parse(&self, _path: &str, text: &str) -> Option<Arc<dyn AstNode>> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        let name = text.split(':').next()?.trim().to_string();
        Some(Arc::new(Key { name }))
    }
}

fn classify(text: &str, offset: usize) -> CompletionKind {
    let before: String = text.chars().take(offset).collect();
    if before.trim_end().ends_with(':') {
        CompletionKind::Value
    } else {
        CompletionKind::Key
    }
}

struct Fixture {
    engine: ActionEngine,
    editor: Arc<MemoryEditor>,
    parser: Arc<CountingParser>,
}

/// Two actions, each deriving its own state from one shared calculator.
fn fixture() -> Fixture {
    let parser = Arc::new(CountingParser::default());
    let shared = Arc::new(AstStateCalculator::new(parser.clone(), Arc::new(classify)));
    let editor = Arc::new(MemoryEditor::new("api.raml", "title: API\nversion: v1\n"));
    editor.set_cursor_offset(3);
    shared.set_editor_provider(Arc::new(CurrentEditor::with(editor.clone())));

    let engine = ActionEngine::new();
    engine.add_action(
        ActionDescriptor::new("Rename key", TARGET_EDITOR_NODE, |_, _| {})
            .with_calculator(Arc::new(DerivedStateCalculator::new(
                shared.clone(),
                |general: Option<&GeneralAstState>| {
                    Ok(general
                        .filter(|g| g.completion_kind == Some(CompletionKind::Key))
                        .and_then(|g| g.node.as_ref())
                        .map(|node| StateValue::new(node.name().to_string())))
                },
            )))
            .with_visibility(|state| state.is_some()),
    );
    engine.add_action(
        ActionDescriptor::new("Edit value", TARGET_EDITOR_NODE, |_, _| {})
            .with_calculator(Arc::new(DerivedStateCalculator::new(
                shared,
                |general: Option<&GeneralAstState>| {
                    Ok(general
                        .filter(|g| g.completion_kind == Some(CompletionKind::Value))
                        .map(|g| StateValue::new(g.offset)))
                },
            )))
            .with_visibility(|state| state.is_some()),
    );

    Fixture { engine, editor, parser }
}

fn offered(engine: &ActionEngine) -> Vec<String> {
    engine
        .calculate_current_actions(TARGET_EDITOR_NODE)
        .iter()
        .map(|a| a.name().to_string())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_document_parsed_once_per_batch() {
    let fixture = fixture();

    assert_eq!(offered(&fixture.engine), vec!["Rename key"]);
    assert_eq!(fixture.parser.parses.load(Ordering::SeqCst), 1);

    offered(&fixture.engine);
    assert_eq!(fixture.parser.parses.load(Ordering::SeqCst), 2);
}

#[test]
fn test_cursor_movement_changes_offer() {
    let fixture = fixture();

    fixture.editor.set_cursor_offset(7);
    assert_eq!(offered(&fixture.engine), vec!["Edit value"]);

    fixture.editor.set_cursor_offset(0);
    assert!(offered(&fixture.engine).is_empty());
}

#[test]
fn test_materialized_state_survives_the_batch() {
    let fixture = fixture();
    let actions = fixture.engine.calculate_current_actions(TARGET_EDITOR_NODE);

    fixture.editor.set_cursor_offset(7);
    let name = actions[0].state().unwrap().downcast_ref::<String>().unwrap();
    assert_eq!(name, "title");
}
