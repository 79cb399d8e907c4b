//! Bot-facing text for the lead collection flow.

use super::model::{LeadField, LeadFields};

pub const CANCELLED: &str =
    "No problem! I've cancelled that. Feel free to ask me anything else.";

pub const INVALID_EMAIL: &str = "That doesn't look like a valid email address. \
Could you double-check it? (e.g. name@company.com, or type 'cancel' to stop)";

pub const SUBMIT_FAILED: &str = "Sorry, something went wrong sending your details. \
Please try again later or contact us directly.";

pub const CHAT_FAILED: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Used when the service confirms a lead without a message of its own.
pub const SUBMIT_CONFIRMED: &str = "Thanks! We've received your information and will be in touch soon.";

/// Prompt asking for `field`, personalised with what is already known.
pub fn ask_for(field: LeadField, fields: &LeadFields) -> String {
    match field {
        LeadField::Name => {
            "I'd be happy to connect you with our team! May I have your name? \
(type 'cancel' to stop)"
                .to_string()
        }
        LeadField::Email => match fields.text(LeadField::Name) {
            Some(name) => format!(
                "Nice to meet you, {name}! What's the best email address to reach you? \
(type 'cancel' to stop)"
            ),
            None => "What's the best email address to reach you? (type 'cancel' to stop)"
                .to_string(),
        },
        LeadField::Phone => "Thanks! What's your phone number? \
(type 'skip' to leave it out, or 'cancel' to stop)"
            .to_string(),
        LeadField::Company => "What company are you with? \
(type 'skip' if it doesn't apply, or 'cancel' to stop)"
            .to_string(),
        LeadField::Message => "Last one: anything specific you'd like our team to know? \
(type 'skip' to send without a message, or 'cancel' to stop)"
            .to_string(),
    }
}
