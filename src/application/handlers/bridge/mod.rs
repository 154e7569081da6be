//! Webhook bridge handlers.

mod handle_inbound_event;

pub use handle_inbound_event::{
    HandleInboundEventCommand, HandleInboundEventHandler, HandleInboundEventResult,
};
