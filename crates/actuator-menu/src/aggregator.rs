//! Contributor registry and menu tree queries.

use std::sync::Arc;

use actuator_action::guard::guarded;
use actuator_action::{ActionError, Stage};
use actuator_core::{Logger, Slot};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::contributor::{MenuContributor, MenuItem};
use crate::tree::{build_tree, MenuNode};

const COMPONENT: &str = "menu";

/// Registered contributors, in registration order.
pub struct MenuAggregator {
    contributors: RwLock<Vec<Arc<dyn MenuContributor>>>,
    logger: Arc<Slot<dyn Logger>>,
}

impl Default for MenuAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuAggregator {
    pub fn new() -> Self {
        Self::with_logger_slot(Arc::new(Slot::empty()))
    }

    /// Share a logger slot with other components.
    pub fn with_logger_slot(logger: Arc<Slot<dyn Logger>>) -> Self {
        Self {
            contributors: RwLock::new(Vec::new()),
            logger,
        }
    }

    /// Register `contributor`. One with the same id is replaced in place.
    pub fn register_contributor(&self, contributor: Arc<dyn MenuContributor>) {
        let mut contributors = self.contributors.write();
        match contributors.iter().position(|c| c.id() == contributor.id()) {
            Some(index) => {
                debug!(id = contributor.id(), "Replacing menu contributor");
                contributors[index] = contributor;
            }
            None => {
                debug!(id = contributor.id(), "Registered menu contributor");
                contributors.push(contributor);
            }
        }
    }

    pub fn contributor_ids(&self) -> Vec<String> {
        self.contributors
            .read()
            .iter()
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Ask every contributor for items and merge them into a new tree.
    ///
    /// All start hooks run before any item calculation and all finish hooks
    /// after. A contributor that panics loses its items for this query only.
    pub fn calculate_menu_items_tree(&self) -> Vec<MenuNode> {
        let contributors = self.contributors.read().clone();

        for contributor in &contributors {
            self.run(contributor.as_ref(), "started", || {
                contributor.calculation_started();
            });
        }

        let mut items: Vec<MenuItem> = Vec::new();
        for contributor in &contributors {
            if let Some(contributed) = self.run(contributor.as_ref(), "calculate", || contributor.calculate_items()) {
                items.extend(contributed);
            }
        }

        for contributor in &contributors {
            self.run(contributor.as_ref(), "finished", || {
                contributor.calculation_finished();
            });
        }

        debug!(contributors = contributors.len(), items = items.len(), "Built menu tree");
        build_tree(&items)
    }

    fn run<T>(&self, contributor: &dyn MenuContributor, step: &str, f: impl FnOnce() -> T) -> Option<T> {
        match guarded(Stage::Contributor, || Ok::<_, ActionError>(f())) {
            Ok(value) => Some(value),
            Err(err) => {
                let message = format!("Contributor {} failed to {}: {}", contributor.id(), step, err);
                warn!("{}", message);
                self.logger.get_or_noop().error(&message, COMPONENT, step);
                None
            }
        }
    }
}
