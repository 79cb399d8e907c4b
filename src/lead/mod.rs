//! Lead collection — the conversational flow that gathers a prospect's
//! contact details inside the chat transcript.
//!
//! The chat service signals when a turn should switch into collection. The
//! session then asks for name, email, phone, company and a free-text message
//! one at a time, lets the user skip the optional ones or cancel outright,
//! and finally submits the lead to the service.

pub mod collector;
pub mod input;
pub mod model;
pub mod prompts;
pub mod session;
pub mod state;

pub use collector::{LeadCollector, WidgetEvent};
pub use model::{CollectedLead, FieldValue, LeadField, LeadFields};
pub use session::{LeadAction, LeadSession};
pub use state::LeadStep;
