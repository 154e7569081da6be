//! HandleInboundEvent - Command handler for Chatwoot webhook events.
//!
//! Validates the event, dispatches the user message (twice for a restart,
//! stopping at the first failure) to the engine and relays every reply back to the conversation in order.

use std::sync::Arc;

use crate::domain::bridge::{
    describe, BotMessage, InboundEvent, InvalidEventError, OutboundDirective, PlatformAction,
    RelayOutcome, RelayReport, UserMessage,
};
use crate::domain::foundation::ConversationRef;
use crate::ports::{DialogueEngine, MessagingPlatform};

#[derive(Debug, Clone)]
pub struct HandleInboundEventCommand {
    pub event: InboundEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandleInboundEventResult {
    /// The event was not a bot-handled incoming message; nothing was done.
    Skipped(InvalidEventError),
    Processed {
        conversation: ConversationRef,
        dispatched: usize,
        report: RelayReport,
    },
}

pub struct HandleInboundEventHandler {
    engine: Arc<dyn DialogueEngine>,
    platform: Arc<dyn MessagingPlatform>,
}

impl HandleInboundEventHandler {
    pub fn new(engine: Arc<dyn DialogueEngine>, platform: Arc<dyn MessagingPlatform>) -> Self {
        Self { engine, platform }
    }

    pub async fn handle(&self, cmd: HandleInboundEventCommand) -> HandleInboundEventResult {
        let event = match cmd.event.validate() {
            Ok(event) => event,
            Err(reason) => {
                tracing::debug!(reason = %reason, "Skipping webhook event");
                return HandleInboundEventResult::Skipped(reason);
            }
        };

        let mut report = RelayReport::new();
        let mut dispatched = 0;

        // A failed dispatch ends the sequence; no `/start` after a failed restart.
        for message in event.messages() {
            dispatched += 1;
            match self.dispatch(&message).await {
                Some(replies) => report.merge(self.relay(&event.conversation, &replies).await),
                None => break,
            }
        }

        if !report.is_clean() {
            tracing::warn!(
                conversation = %event.conversation,
                sent = report.sent(),
                failed = report.failed(),
                "Some replies could not be relayed"
            );
        }

        HandleInboundEventResult::Processed {
            conversation: event.conversation,
            dispatched,
            report,
        }
    }

    /// Sends one message to the engine. Failures are logged and swallowed.
    async fn dispatch(&self, message: &UserMessage) -> Option<Vec<BotMessage>> {
        match self.engine.handle_message(message).await {
            Ok(replies) => Some(replies),
            Err(err) => {
                tracing::error!(
                    sender_id = %message.sender_id,
                    text = %message.text,
                    error = %err,
                    "Engine dispatch failed"
                );
                None
            }
        }
    }

    /// Relays replies one call at a time, in order. A failed call is recorded
    /// and the remaining calls still go out.
    pub async fn relay(&self, conversation: &ConversationRef, replies: &[BotMessage]) -> RelayReport {
        let mut report = RelayReport::new();

        for directive in replies.iter().flat_map(BotMessage::directives) {
            let actions = match directive.to_actions() {
                Ok(actions) => actions,
                Err(reason) => {
                    tracing::warn!(conversation = %conversation, reason = %reason, "Dropping reply");
                    report.record(directive_label(&directive), RelayOutcome::Dropped(reason));
                    continue;
                }
            };

            for action in actions {
                let label = describe(&action);
                let outcome = match &action {
                    PlatformAction::Send(message) => {
                        self.platform.send_message(conversation, message).await
                    }
                    PlatformAction::Typing => {
                        self.platform.toggle_typing(conversation).await
                    }
                };
                match outcome {
                    Ok(()) => report.record(label, RelayOutcome::Sent),
                    Err(err) => {
                        tracing::error!(
                            conversation = %conversation,
                            call = %label,
                            error = %err,
                            "Relay to Chatwoot failed"
                        );
                        report.record(label, RelayOutcome::Failed(err));
                    }
                }
            }
        }

        report
    }
}

fn directive_label(directive: &OutboundDirective) -> String {
    match directive {
        OutboundDirective::Text(_) => "text".to_string(),
        OutboundDirective::Buttons { .. } => "buttons".to_string(),
        OutboundDirective::Media(_) => "media".to_string(),
        OutboundDirective::Custom(_) => "custom payload".to_string(),
    }
}
