//! Lead fields and the values collected for them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::LeadSubmission;

/// A field of the lead record, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Company,
    Message,
}

impl LeadField {
    /// Every field, in the order they are asked for.
    pub const ORDER: [LeadField; 5] = [
        LeadField::Name,
        LeadField::Email,
        LeadField::Phone,
        LeadField::Company,
        LeadField::Message,
    ];

    /// Whether the user may answer `skip` for this field.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Phone | Self::Company | Self::Message)
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Message => "message",
        };
        write!(f, "{s}")
    }
}

/// What the user gave for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Provided(String),
    /// The user answered `skip`.
    Skipped,
}

impl FieldValue {
    /// Value as sent to the service; skipped fields become empty strings.
    pub fn as_submitted(&self) -> &str {
        match self {
            Self::Provided(v) => v,
            Self::Skipped => "",
        }
    }
}

/// Fields collected so far. Unset fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    values: BTreeMap<LeadField, FieldValue>,
}

impl LeadFields {
    pub fn get(&self, field: LeadField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn is_set(&self, field: LeadField) -> bool {
        self.values.contains_key(&field)
    }

    /// Provided text for a field, if any.
    pub fn text(&self, field: LeadField) -> Option<&str> {
        match self.values.get(&field)? {
            FieldValue::Provided(v) => Some(v),
            FieldValue::Skipped => None,
        }
    }

    /// Record a value. A field that is already set keeps its value.
    pub fn set(&mut self, field: LeadField, value: FieldValue) -> bool {
        if self.values.contains_key(&field) {
            return false;
        }
        self.values.insert(field, value);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// First unset field strictly after `after` (or from the start if `None`).
    pub fn next_unset(&self, after: Option<LeadField>) -> Option<LeadField> {
        LeadField::ORDER
            .into_iter()
            .filter(|f| after.is_none_or(|a| *f > a))
            .find(|f| !self.is_set(*f))
    }

    /// Snapshot the fields for submission.
    pub fn to_collected(&self) -> CollectedLead {
        let value = |f| {
            self.get(f)
                .map(|v| v.as_submitted().to_string())
                .unwrap_or_default()
        };
        CollectedLead {
            name: value(LeadField::Name),
            email: value(LeadField::Email),
            phone: value(LeadField::Phone),
            company: value(LeadField::Company),
            message: value(LeadField::Message),
        }
    }
}

/// A finished lead, ready to be wrapped into a [`LeadSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

impl CollectedLead {
    pub fn into_submission(
        self,
        client_id: &str,
        conversation_snippet: String,
        source_url: &str,
    ) -> LeadSubmission {
        LeadSubmission {
            client_id: client_id.to_string(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            message: self.message,
            conversation_snippet,
            source_url: source_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_ordered_by_collection_order() {
        let mut sorted = LeadField::ORDER.to_vec();
        sorted.sort();
        assert_eq!(sorted, LeadField::ORDER.to_vec());
    }

    #[test]
    fn set_never_overwrites() {
        let mut fields = LeadFields::default();
        assert!(fields.set(LeadField::Name, FieldValue::Provided("Ann".into())));
        assert!(!fields.set(LeadField::Name, FieldValue::Provided("Bob".into())));
        assert_eq!(fields.text(LeadField::Name), Some("Ann"));
    }

    #[test]
    fn next_unset_skips_prefilled_fields() {
        let mut fields = LeadFields::default();
        assert_eq!(fields.next_unset(None), Some(LeadField::Name));

        fields.set(LeadField::Email, FieldValue::Provided("a@b.co".into()));
        assert_eq!(fields.next_unset(Some(LeadField::Name)), Some(LeadField::Phone));

        fields.set(LeadField::Phone, FieldValue::Skipped);
        assert_eq!(fields.next_unset(Some(LeadField::Email)), Some(LeadField::Company));
        assert_eq!(fields.next_unset(Some(LeadField::Message)), None);
    }

    #[test]
    fn skipped_fields_submit_as_empty() {
        let mut fields = LeadFields::default();
        fields.set(LeadField::Name, FieldValue::Provided("Jane".into()));
        fields.set(LeadField::Phone, FieldValue::Skipped);

        let lead = fields.to_collected();
        assert_eq!(lead.name, "Jane");
        assert_eq!(lead.phone, "");
        assert_eq!(lead.email, "");
    }

    #[test]
    fn into_submission_carries_context() {
        let lead = CollectedLead {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            ..Default::default()
        };
        let submission = lead.into_submission("acme", "user: hi".into(), "https://acme.test");
        assert_eq!(submission.client_id, "acme");
        assert_eq!(submission.conversation_snippet, "user: hi");
        assert_eq!(submission.source_url, "https://acme.test");
        assert_eq!(submission.email, "jane@x.com");
    }

    #[test]
    fn only_later_fields_are_skippable() {
        assert!(!LeadField::Name.is_skippable());
        assert!(!LeadField::Email.is_skippable());
        assert!(LeadField::Phone.is_skippable());
        assert!(LeadField::Company.is_skippable());
        assert!(LeadField::Message.is_skippable());
    }
}
