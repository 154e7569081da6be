//! Built-in actions: greeting, conversation tagging and human handoff.

use async_trait::async_trait;
use std::sync::Arc;

use super::registry::{Action, ActionRegistry};
use crate::domain::actions::{
    ActionCall, ActionError, ActionResponse, WorkingHours, UTTER_HANDOFF_OUT_OF_OFFICE,
    UTTER_HANDOFF_WORKING_TIME,
};
use crate::ports::{Clock, MessagingPlatform};

/// Registry holding every built-in action.
pub fn builtin_registry(
    platform: Arc<dyn MessagingPlatform>,
    clock: Arc<dyn Clock>,
    working_hours: WorkingHours,
) -> ActionRegistry {
    let notification = HandoffNotification {
        clock,
        working_hours,
    };
    let handoff = Handoff {
        platform: platform.clone(),
    };

    ActionRegistry::new()
        .register(Arc::new(HelloWorld))
        .register(Arc::new(TagConversation {
            platform: platform.clone(),
        }))
        .register(Arc::new(handoff.clone()))
        .register(Arc::new(notification.clone()))
        .register(Arc::new(DefaultFallbackAndHandoff {
            notification,
            handoff,
        }))
}

pub struct HelloWorld;

#[async_trait]
impl Action for HelloWorld {
    fn name(&self) -> &'static str {
        "action_hello_world"
    }

    async fn run(&self, _call: &ActionCall) -> Result<ActionResponse, ActionError> {
        let mut response = ActionResponse::new();
        response.utter_text("Hello World!");
        Ok(response)
    }
}

/// Adds the latest intent to the conversation's labels.
pub struct TagConversation {
    platform: Arc<dyn MessagingPlatform>,
}

#[async_trait]
impl Action for TagConversation {
    fn name(&self) -> &'static str {
        "action_tag_conversation"
    }

    async fn run(&self, call: &ActionCall) -> Result<ActionResponse, ActionError> {
        let (Some(conversation), Some(intent)) = (call.conversation(), call.latest_intent()) else {
            tracing::debug!("No Chatwoot conversation or intent, nothing to tag");
            return Ok(ActionResponse::new());
        };

        let mut labels = self.platform.labels(&conversation).await?;
        if !labels.iter().any(|label| label == intent) {
            labels.push(intent.to_string());
        }
        self.platform.set_labels(&conversation, &labels).await?;

        tracing::info!(conversation = %conversation, intent = %intent, "Conversation tagged");
        Ok(ActionResponse::new())
    }
}

/// Hands the conversation over to human agents.
#[derive(Clone)]
pub struct Handoff {
    platform: Arc<dyn MessagingPlatform>,
}

#[async_trait]
impl Action for Handoff {
    fn name(&self) -> &'static str {
        "action_handoff"
    }

    async fn run(&self, call: &ActionCall) -> Result<ActionResponse, ActionError> {
        if let Some(conversation) = call.conversation() {
            self.platform.open_conversation(&conversation).await?;
            tracing::info!(conversation = %conversation, "Conversation handed off");
        }
        Ok(ActionResponse::new())
    }
}

/// Tells the user whether an agent is available right now.
#[derive(Clone)]
pub struct HandoffNotification {
    clock: Arc<dyn Clock>,
    working_hours: WorkingHours,
}

#[async_trait]
impl Action for HandoffNotification {
    fn name(&self) -> &'static str {
        "action_handoff_notification"
    }

    async fn run(&self, _call: &ActionCall) -> Result<ActionResponse, ActionError> {
        let mut response = ActionResponse::new();
        if self.working_hours.contains(self.clock.now().time()) {
            response.utter_response(UTTER_HANDOFF_WORKING_TIME);
        } else {
            response.utter_response(UTTER_HANDOFF_OUT_OF_OFFICE);
        }
        Ok(response)
    }
}

/// Fallback: notify, then hand off.
pub struct DefaultFallbackAndHandoff {
    notification: HandoffNotification,
    handoff: Handoff,
}

#[async_trait]
impl Action for DefaultFallbackAndHandoff {
    fn name(&self) -> &'static str {
        "action_default_fallback_and_handoff"
    }

    async fn run(&self, call: &ActionCall) -> Result<ActionResponse, ActionError> {
        let mut response = self.notification.run(call).await?;
        response.merge(self.handoff.run(call).await?);
        Ok(response)
    }
}
