//! Lead collection state machine — which step the conversation is on.

use serde::{Deserialize, Serialize};

use super::model::LeadField;

/// Steps of the lead collection flow.
///
/// Progresses forward only: Inactive → CollectingName → ... →
/// CollectingMessage → Submitting → Inactive. Steps whose field is already
/// known (e.g. a pre-filled email) are jumped over. Any active step can drop
/// back to Inactive (cancel, off-topic question, submission finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStep {
    Inactive,
    CollectingName,
    CollectingEmail,
    CollectingPhone,
    CollectingCompany,
    CollectingMessage,
    Submitting,
}

impl LeadStep {
    /// The step that collects `field`.
    pub fn collecting(field: LeadField) -> Self {
        match field {
            LeadField::Name => Self::CollectingName,
            LeadField::Email => Self::CollectingEmail,
            LeadField::Phone => Self::CollectingPhone,
            LeadField::Company => Self::CollectingCompany,
            LeadField::Message => Self::CollectingMessage,
        }
    }

    /// The field this step is waiting for, if it is a collecting step.
    pub fn field(&self) -> Option<LeadField> {
        match self {
            Self::CollectingName => Some(LeadField::Name),
            Self::CollectingEmail => Some(LeadField::Email),
            Self::CollectingPhone => Some(LeadField::Phone),
            Self::CollectingCompany => Some(LeadField::Company),
            Self::CollectingMessage => Some(LeadField::Message),
            Self::Inactive | Self::Submitting => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: LeadStep) -> bool {
        use LeadStep::*;
        match (self, target) {
            (Inactive, CollectingName) => true,
            (Inactive, _) => false,
            (Submitting, Inactive) => true,
            (Submitting, _) => false,
            (_, Inactive) => true,
            (CollectingMessage, Submitting) => true,
            (_, Submitting) => false,
            // forward to any later collecting step
            (from, to) => to > *from,
        }
    }
}

impl Default for LeadStep {
    fn default() -> Self {
        Self::Inactive
    }
}

impl std::fmt::Display for LeadStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Inactive => "inactive",
            Self::CollectingName => "collecting_name",
            Self::CollectingEmail => "collecting_email",
            Self::CollectingPhone => "collecting_phone",
            Self::CollectingCompany => "collecting_company",
            Self::CollectingMessage => "collecting_message",
            Self::Submitting => "submitting",
        };
        write!(f, "{s}")
    }
}
