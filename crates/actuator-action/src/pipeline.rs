//! Calculation batches.
//!
//! One batch runs the queried actions through, in order: capability
//! filtering, start hooks, state calculation, visibility filtering,
//! materialization and finish hooks. Start and finish hooks run once per
//! distinct calculator instance; finish hooks run even when nothing
//! survived.

use std::collections::HashSet;
use std::sync::Arc;

use actuator_core::{Logger, StateValue};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculator::{instance_key, ContextStateCalculator};
use crate::descriptor::ActionDescriptor;
use crate::error::{ActionError, Stage};
use crate::executable::ExecutableAction;
use crate::guard::guarded;
use crate::types::UiMode;
use crate::ui::TriggerContext;

const COMPONENT: &str = "pipeline";

/// Run one batch over `actions` (already selected by target or id).
pub(crate) fn run_batch(
    actions: Vec<Arc<ActionDescriptor>>,
    mode: UiMode,
    context: &TriggerContext,
) -> Vec<ExecutableAction> {
    let logger = context.logger.get_or_noop();
    let batch = Batch {
        id: Uuid::new_v4(),
        logger: logger.as_ref(),
        context,
    };

    let queried = actions.len();
    let candidates: Vec<_> = actions
        .into_iter()
        .filter(|action| action.kind().supported_in(mode))
        .collect();
    let calculators = distinct_calculators(&candidates);
    debug!(
        batch_id = %batch.id,
        %mode,
        queried,
        candidates = candidates.len(),
        calculators = calculators.len(),
        "Starting batch"
    );

    let mut failed_starts = HashSet::new();
    for calculator in &calculators {
        if let Err(err) = guarded(Stage::Started, || calculator.calculation_started()) {
            batch.report(Stage::Started, None, &err);
            failed_starts.insert(instance_key(calculator));
        }
    }

    let executables: Vec<_> = candidates
        .into_iter()
        .filter_map(|action| batch.materialize(action, &failed_starts))
        .collect();

    for calculator in &calculators {
        if let Err(err) = guarded(Stage::Finished, || calculator.calculation_finished()) {
            batch.report(Stage::Finished, None, &err);
        }
    }

    debug!(batch_id = %batch.id, offered = executables.len(), "Finished batch");
    executables
}

/// Calculator instances in first-use order, each once.
/// Identities of the calculator instances a batch over `actions` would run
/// hooks on in `mode`.
pub(crate) fn calculator_keys(actions: &[Arc<ActionDescriptor>], mode: UiMode) -> Vec<usize> {
    let supported: Vec<_> = actions
        .iter()
        .filter(|action| action.kind().supported_in(mode))
        .cloned()
        .collect();
    distinct_calculators(&supported)
        .iter()
        .map(|calculator| instance_key(calculator) as usize)
        .collect()
}

fn distinct_calculators(actions: &[Arc<ActionDescriptor>]) -> Vec<Arc<dyn ContextStateCalculator>> {
    let mut seen = HashSet::new();
    actions
        .iter()
        .filter_map(|action| action.calculator())
        .filter(|calculator| seen.insert(instance_key(calculator)))
        .cloned()
        .collect()
}

struct Batch<'a> {
    id: Uuid,
    logger: &'a dyn Logger,
    context: &'a TriggerContext,
}

impl Batch<'_> {
    fn materialize(
        &self,
        action: Arc<ActionDescriptor>,
        failed_starts: &HashSet<*const ()>,
    ) -> Option<ExecutableAction> {
        let state = self.calculate(&action, failed_starts)?;

        if let Some(filter) = action.visibility() {
            match guarded(Stage::Visibility, || Ok(filter(state.as_ref()))) {
                Ok(true) => {}
                Ok(false) => {
                    self.logger.debug_detail(
                        &format!("Action {} hidden by its visibility filter", action.name()),
                        COMPONENT,
                        "visibility",
                    );
                    return None;
                }
                Err(err) => {
                    self.report(Stage::Visibility, Some(action.as_ref()), &err);
                    return None;
                }
            }
        }

        Some(ExecutableAction::new(action, state, self.context.clone()))
    }

    /// Outer `None` drops the action; inner `None` is "no state".
    fn calculate(
        &self,
        action: &ActionDescriptor,
        failed_starts: &HashSet<*const ()>,
    ) -> Option<Option<StateValue>> {
        let Some(calculator) = action.calculator() else {
            return Some(None);
        };
        if failed_starts.contains(&instance_key(calculator)) {
            self.logger.debug(
                &format!("Skipping {}: its calculator failed to start", action.name()),
                COMPONENT,
                "calculate",
            );
            return None;
        }
        match guarded(Stage::Calculate, || calculator.calculate()) {
            Ok(state) => Some(state),
            Err(err) => {
                self.report(Stage::Calculate, Some(action), &err);
                None
            }
        }
    }

    fn report(&self, stage: Stage, action: Option<&ActionDescriptor>, err: &ActionError) {
        let message = match action {
            Some(action) => format!("Dropping action {}: {}", action.name(), err),
            None => format!("Calculator hook failed: {}", err),
        };
        warn!(batch_id = %self.id, %stage, "{}", message);
        self.logger.error(&message, COMPONENT, &stage.to_string());
    }
}
