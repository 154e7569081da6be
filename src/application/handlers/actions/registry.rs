//! Action registry - Named custom actions callable by the engine.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::actions::{ActionCall, ActionError, ActionResponse};

/// A custom action run by the engine through the action server.
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, call: &ActionCall) -> Result<ActionResponse, ActionError>;
}

/// Actions keyed by name, listed in name order.
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action, replacing any action registered under the same name.
    pub fn register(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.insert(action.name(), action);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Command to execute the action named in the call.
#[derive(Debug, Clone)]
pub struct RunActionCommand {
    pub call: ActionCall,
}

pub struct RunActionHandler {
    registry: Arc<ActionRegistry>,
}

impl RunActionHandler {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub async fn handle(&self, cmd: RunActionCommand) -> Result<ActionResponse, ActionError> {
        let name = cmd.call.next_action.as_str();
        let action = self
            .registry
            .get(name)
            .ok_or_else(|| ActionError::UnknownAction(name.to_string()))?;

        tracing::info!(
            action = %name,
            sender_id = cmd.call.sender_id.as_deref().unwrap_or(""),
            "Running action"
        );
        action.run(&cmd.call).await
    }
}
