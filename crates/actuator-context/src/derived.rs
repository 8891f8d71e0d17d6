//! Per-action calculators built on the shared AST state.

use std::sync::Arc;

use actuator_action::{ActionError, ContextStateCalculator};
use actuator_core::editor::Editor;
use actuator_core::StateValue;

use crate::ast_state::{AstStateCalculator, GeneralAstState};

/// Derives an action's own state from the shared [`GeneralAstState`].
///
/// Start and finish hooks go to the shared calculator, so however many
/// derived calculators a batch touches, the document is parsed once.
pub struct DerivedStateCalculator<F> {
    shared: Arc<AstStateCalculator>,
    derive: F,
}

impl<F> DerivedStateCalculator<F>
where
    F: Fn(Option<&GeneralAstState>) -> Result<Option<StateValue>, ActionError> + Send + Sync,
{
    pub fn new(shared: Arc<AstStateCalculator>, derive: F) -> Self {
        Self { shared, derive }
    }

    pub fn general_state(&self) -> Result<Option<Arc<GeneralAstState>>, ActionError> {
        self.shared.general_state()
    }

    pub fn editor(&self) -> Option<Arc<dyn Editor>> {
        self.shared.editor()
    }
}

impl<F> ContextStateCalculator for DerivedStateCalculator<F>
where
    F: Fn(Option<&GeneralAstState>) -> Result<Option<StateValue>, ActionError> + Send + Sync,
{
    fn calculate(&self) -> Result<Option<StateValue>, ActionError> {
        let general = self.shared.general_state()?;
        (self.derive)(general.as_deref())
    }

    fn calculation_started(&self) -> Result<(), ActionError> {
        self.shared.calculation_started()
    }

    fn calculation_finished(&self) -> Result<(), ActionError> {
        self.shared.calculation_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuator_core::ast::{AstNode, CompletionKind, DocumentParser};

    struct NoParser;

    impl DocumentParser for NoParser {
        fn parse(&self, _path: &str, _text: &str) -> Option<Arc<dyn AstNode>> {
            None
        }
    }

    #[test]
    fn test_derives_from_shared_state() {
        let shared = Arc::new(AstStateCalculator::new(
            Arc::new(NoParser),
            Arc::new(|_: &str, _: usize| CompletionKind::Value),
        ));
        let offsets = DerivedStateCalculator::new(shared.clone(), |general: Option<&GeneralAstState>| {
            Ok(general.map(|g| StateValue::new(g.offset)))
        });
        let editors = DerivedStateCalculator::new(shared.clone(), |general: Option<&GeneralAstState>| {
            Ok(general.and_then(|g| g.editor.clone()).map(StateValue::new))
        });

        offsets.calculation_started().unwrap();
        editors.calculation_started().unwrap();
        let offset = offsets.calculate().unwrap().unwrap();
        assert_eq!(offset.downcast_ref::<usize>(), Some(&0));
        assert!(editors.calculate().unwrap().is_none());
        offsets.calculation_finished().unwrap();
        editors.calculation_finished().unwrap();

        assert_eq!(shared.computations(), 1);
        assert!(offsets.editor().is_none());
    }
}
