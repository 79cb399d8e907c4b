//! LeadSession — per-widget lead collection state and its transition function.

use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;

use super::input::{
    is_cancel_token, is_skip_token, is_valid_email, looks_like_question, normalize,
    validate_email,
};
use super::model::{CollectedLead, FieldValue, LeadField, LeadFields};
use super::prompts;
use super::state::LeadStep;

/// What the controller should do after feeding one input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadAction {
    /// Session is not collecting; route the input elsewhere.
    Ignored,
    /// Show this prompt for the (possibly new) current field.
    Prompt(String),
    /// Input was rejected; the step did not change.
    Invalid {
        error: ValidationError,
        prompt: String,
    },
    /// The user backed out; the session is inactive and empty.
    Cancelled(String),
    /// The user asked a question instead; send it as an ordinary chat turn.
    Forward(String),
    /// All fields are in; submit this lead. The session is in `Submitting`.
    Submit(CollectedLead),
}

/// State of lead collection for one widget instance.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSession {
    id: Uuid,
    step: LeadStep,
    fields: LeadFields,
}

impl Default for LeadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: LeadStep::Inactive,
            fields: LeadFields::default(),
        }
    }

    /// Identifier of the current collection attempt (changes on every start).
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> LeadStep {
        self.step
    }

    pub fn fields(&self) -> &LeadFields {
        &self.fields
    }

    pub fn is_active(&self) -> bool {
        self.step.is_active()
    }

    /// Begin collecting at the name step.
    ///
    /// A pre-filled email is kept only if it passes validation; in that case
    /// the email step is skipped once the name is in. Starting while already
    /// active discards the previous attempt.
    pub fn start(&mut self, prefilled_email: Option<&str>) {
        if self.is_active() {
            tracing::debug!(session_id = %self.id, step = %self.step, "Restarting lead collection");
        }
        self.reset();
        self.id = Uuid::new_v4();
        self.step = LeadStep::CollectingName;

        if let Some(email) = prefilled_email.map(str::trim).filter(|e| !e.is_empty()) {
            if is_valid_email(email) {
                self.fields
                    .set(LeadField::Email, FieldValue::Provided(email.to_string()));
            } else {
                tracing::debug!(session_id = %self.id, "Ignoring invalid pre-filled email");
            }
        }
    }

    /// Drop back to inactive and forget every field.
    pub fn reset(&mut self) {
        self.step = LeadStep::Inactive;
        self.fields.clear();
    }

    /// Leave the `Submitting` step once the collected lead has been taken.
    pub fn finish_submission(&mut self) {
        if self.step != LeadStep::Submitting {
            tracing::warn!(session_id = %self.id, step = %self.step, "finish_submission outside Submitting");
        }
        self.reset();
    }

    /// Prompt for the step the session is currently on, if collecting.
    pub fn current_prompt(&self) -> Option<String> {
        self.step.field().map(|f| prompts::ask_for(f, &self.fields))
    }

    /// Feed one user input to the session.
    pub fn handle_input(&mut self, raw: &str) -> LeadAction {
        let Some(field) = self.step.field() else {
            return LeadAction::Ignored;
        };

        let value = raw.trim();
        let normalized = normalize(raw);

        if is_cancel_token(&normalized) && !(field.is_skippable() && is_skip_token(&normalized)) {
            tracing::info!(session_id = %self.id, step = %self.step, "Lead collection cancelled");
            self.reset();
            return LeadAction::Cancelled(prompts::CANCELLED.to_string());
        }

        if field == LeadField::Name && looks_like_question(&normalized) {
            tracing::info!(session_id = %self.id, "Question during name step; leaving lead collection");
            self.reset();
            return LeadAction::Forward(value.to_string());
        }

        if value.is_empty() {
            return LeadAction::Prompt(prompts::ask_for(field, &self.fields));
        }

        let skipped = is_skip_token(&normalized);
        let stored = match field {
            LeadField::Name => FieldValue::Provided(value.to_string()),
            LeadField::Email => {
                if let Err(error) = validate_email(value) {
                    tracing::debug!(session_id = %self.id, "Rejected malformed email");
                    return LeadAction::Invalid {
                        error,
                        prompt: prompts::INVALID_EMAIL.to_string(),
                    };
                }
                FieldValue::Provided(value.to_string())
            }
            LeadField::Phone | LeadField::Company if skipped => FieldValue::Skipped,
            // the final message is submitted as an explicit empty string
            LeadField::Message if skipped => FieldValue::Provided(String::new()),
            LeadField::Phone | LeadField::Company | LeadField::Message => {
                FieldValue::Provided(value.to_string())
            }
        };
        self.fields.set(field, stored);

        match self.fields.next_unset(Some(field)) {
            Some(next) => {
                self.advance(LeadStep::collecting(next));
                LeadAction::Prompt(prompts::ask_for(next, &self.fields))
            }
            None => {
                self.advance(LeadStep::Submitting);
                LeadAction::Submit(self.fields.to_collected())
            }
        }
    }

    fn advance(&mut self, target: LeadStep) {
        if !self.step.can_transition_to(target) {
            // next_unset only ever moves forward; reaching this is a bug
            tracing::error!(session_id = %self.id, from = %self.step, to = %target, "Invalid lead step transition");
            return;
        }
        tracing::debug!(session_id = %self.id, from = %self.step, to = %target, "Lead step advanced");
        self.step = target;
    }
}
