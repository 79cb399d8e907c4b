//! Request/response shapes for the chat/lead service.

use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// Contact details the service hands back for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Human-readable follow-up line, or `None` when there is nothing to say
    /// (the service sends `{}` for tenants without contact details).
    pub fn to_message(&self) -> Option<String> {
        let email = self.email.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let phone = self.phone.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (email, phone) {
            (Some(e), Some(p)) => Some(format!(
                "In the meantime, you can reach us at {e} or call {p}."
            )),
            (Some(e), None) => Some(format!("In the meantime, you can reach us at {e}.")),
            (None, Some(p)) => Some(format!("In the meantime, you can call us at {p}.")),
            (None, None) => None,
        }
    }
}

/// Bot behaviour settings configured per tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub bot_name: Option<String>,
    pub welcome_message: Option<String>,
    /// Shown in place of the generic apology when a chat turn fails.
    pub fallback_message: Option<String>,
}

/// Widget settings returned by `GET /api/config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub bot_settings: BotSettings,
    pub contact: ContactInfo,
}

/// Envelope of `GET /api/config`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConfigResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub config: Option<WidgetSettings>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Context block sent alongside a chat turn.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatContext {
    pub conversation_history: Vec<HistoryEntry>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub client_id: String,
    pub context: ChatContext,
}

/// Reply from `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub trigger_lead_collection: bool,
    #[serde(default)]
    pub extracted_email: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub show_contact_button: bool,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/lead`. Skipped fields are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub conversation_snippet: String,
    pub source_url: String,
}

/// Reply from `POST /api/lead`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub error: Option<String>,
}
