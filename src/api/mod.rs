//! Chat/lead service API — wire types and the HTTP client.
//!
//! The service is a black box exposing three JSON endpoints:
//! - `GET /api/config` — widget settings for a tenant
//! - `POST /api/chat` — one chat turn, may signal lead collection
//! - `POST /api/lead` — lead submission

pub mod client;
pub mod types;

pub use client::{HttpLeadApi, LeadApi};
pub use types::{
    BotSettings, ChatContext, ChatRequest, ChatResponse, ContactInfo, LeadResponse,
    LeadSubmission, WidgetSettings,
};
