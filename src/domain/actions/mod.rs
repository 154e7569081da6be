//! Custom actions: protocol types, working hours and errors.

mod errors;
mod protocol;
mod working_hours;

pub use errors::ActionError;
pub use protocol::{ActionCall, ActionResponse, ActionTracker, Intent, LatestMessage};
pub use working_hours::{InvalidTimeOfDay, WorkingHours};

/// Response shown when a handoff happens inside working hours.
pub const UTTER_HANDOFF_WORKING_TIME: &str = "utter_handoff_is_working_time";

/// Response shown when a handoff happens outside working hours.
pub const UTTER_HANDOFF_OUT_OF_OFFICE: &str = "utter_handoff_out_of_office";
