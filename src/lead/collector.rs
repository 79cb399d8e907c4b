//! LeadCollector — routes user input between the chat service and the lead
//! collection flow, and reports everything the host should display.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, mpsc};

use crate::api::{ChatContext, ChatRequest, ContactInfo, LeadApi, WidgetSettings, client};
use crate::config::WidgetConfig;
use crate::error::{ApiError, Error, Result};
use crate::history::{ConversationHistory, HistoryEntry};
use crate::safety::{limits, sanitize_input, sanitize_submission};

use super::input::extract_email;
use super::model::{CollectedLead, LeadField};
use super::prompts;
use super::session::{LeadAction, LeadSession};
use super::state::LeadStep;

/// Something the host UI should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A bot message for the transcript.
    Message(String),
    /// A request is in flight (`true`) or finished (`false`).
    Typing(bool),
    /// Related questions offered when the service had no direct answer.
    Suggestions(Vec<String>),
    /// The service suggests offering a way to reach a human.
    ShowContactButton,
    /// A lead was accepted by the service.
    LeadSubmitted,
}

/// Lead collection flow controller for one widget instance.
pub struct LeadCollector {
    api: Arc<dyn LeadApi>,
    config: WidgetConfig,
    session: Arc<RwLock<LeadSession>>,
    history: Arc<RwLock<ConversationHistory>>,
    events: mpsc::UnboundedSender<WidgetEvent>,
    settings: RwLock<WidgetSettings>,
    /// Contact details offered by the chat turn that started collection.
    trigger_contact: RwLock<Option<ContactInfo>>,
    /// Held for a whole turn so inputs are processed one at a time.
    turn: Mutex<()>,
}

impl LeadCollector {
    /// Create a controller and the event stream the host renders from.
    pub fn new(
        api: Arc<dyn LeadApi>,
        config: WidgetConfig,
        history: Arc<RwLock<ConversationHistory>>,
    ) -> (Self, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let collector = Self {
            api,
            config,
            session: Arc::new(RwLock::new(LeadSession::new())),
            history,
            events,
            settings: RwLock::new(WidgetSettings::default()),
            trigger_contact: RwLock::new(None),
            turn: Mutex::new(()),
        };
        (collector, rx)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Shared handle to the transcript.
    pub fn history(&self) -> Arc<RwLock<ConversationHistory>> {
        Arc::clone(&self.history)
    }

    /// Fetch the tenant's settings under the request timeout and keep them
    /// for later turns.
    pub async fn load_settings(&self) -> Result<WidgetSettings> {
        let settings = self
            .call(
                client::CONFIG_PATH,
                self.api.fetch_settings(&self.config.client_id),
            )
            .await?;
        *self.settings.write().await = settings.clone();
        Ok(settings)
    }

    /// Whether input is currently being intercepted for lead collection.
    pub async fn is_active(&self) -> bool {
        self.session.read().await.is_active()
    }

    pub async fn current_step(&self) -> LeadStep {
        self.session.read().await.step()
    }

    /// Snapshot of the session (for inspection and tests).
    pub async fn session(&self) -> LeadSession {
        self.session.read().await.clone()
    }

    /// Switch into lead collection, optionally with an email already known.
    pub async fn start_lead_collection(&self, prefilled_email: Option<String>) {
        let mut session = self.session.write().await;
        session.start(prefilled_email.as_deref());
        tracing::info!(
            session_id = %session.id(),
            prefilled_email = session.fields().is_set(LeadField::Email),
            "Lead collection started"
        );
    }

    /// Start lead collection from the host's "contact us" affordance and ask
    /// for the first field.
    pub async fn request_contact(&self) -> Result<()> {
        let _turn = self.turn.lock().await;
        self.start_lead_collection(None).await;
        let prompt = self.session.read().await.current_prompt();
        if let Some(prompt) = prompt {
            self.say(prompt).await?;
        }
        Ok(())
    }

    /// Post a bot message that is not a reply to user input (e.g. a welcome).
    pub async fn announce(&self, text: impl Into<String>) -> Result<()> {
        let _turn = self.turn.lock().await;
        self.say(text.into()).await
    }

    /// Process one user input to completion.
    ///
    /// Service failures are reported to the user as messages and do not
    /// surface here; the only error is the host having dropped its event
    /// receiver.
    pub async fn handle_user_message(&self, text: &str) -> Result<()> {
        let _turn = self.turn.lock().await;

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.history.write().await.push(HistoryEntry::user(text));

        let action = {
            let mut session = self.session.write().await;
            if session.is_active() {
                let action = session.handle_input(text);
                if let LeadAction::Submit(_) = action {
                    // The action owns the lead now; the session must be
                    // inactive before the first await of the submission.
                    session.finish_submission();
                }
                Some(action)
            } else {
                None
            }
        };

        match action {
            None => self.chat_turn(text).await,
            Some(LeadAction::Ignored) => {
                tracing::warn!("Input arrived while a submission was pending; dropping it");
                Ok(())
            }
            Some(LeadAction::Prompt(prompt)) => self.say(prompt).await,
            Some(LeadAction::Invalid { error, prompt }) => {
                tracing::debug!(%error, "Lead input rejected");
                self.say(prompt).await
            }
            Some(LeadAction::Cancelled(ack)) => self.say(ack).await,
            Some(LeadAction::Forward(original)) => self.chat_turn(&original).await,
            Some(LeadAction::Submit(lead)) => self.submit(lead).await,
        }
    }

    /// Send `text` to the chat service as an ordinary turn.
    async fn chat_turn(&self, text: &str) -> Result<()> {
        let message = sanitize_input(text, limits::CHAT_MESSAGE);
        if message.is_empty() {
            tracing::debug!("Nothing left to send after sanitizing");
            return Ok(());
        }

        let request = ChatRequest {
            message,
            client_id: sanitize_input(&self.config.client_id, limits::CLIENT_ID),
            context: ChatContext {
                conversation_history: self.history.read().await.entries().to_vec(),
            },
        };

        self.emit(WidgetEvent::Typing(true))?;
        let result = self
            .call(client::CHAT_PATH, self.api.send_chat(&request))
            .await;
        self.emit(WidgetEvent::Typing(false))?;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                let fallback = self
                    .settings
                    .read()
                    .await
                    .bot_settings
                    .fallback_message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| prompts::CHAT_FAILED.to_string());
                return self.say(fallback).await;
            }
        };

        if !response.response.is_empty() {
            self.say(response.response).await?;
        }
        if !response.suggestions.is_empty() {
            self.emit(WidgetEvent::Suggestions(response.suggestions))?;
        }
        if response.show_contact_button {
            self.emit(WidgetEvent::ShowContactButton)?;
        }
        if response.trigger_lead_collection {
            *self.trigger_contact.write().await = response.contact_info;
            let prefilled = response
                .extracted_email
                .filter(|e| !e.trim().is_empty())
                .or_else(|| extract_email(text));
            self.start_lead_collection(prefilled).await;
        }
        Ok(())
    }

    /// Submit a finished lead and report the outcome. The session has already
    /// been reset by the time this runs.
    async fn submit(&self, lead: CollectedLead) -> Result<()> {
        let session_id = self.session.read().await.id();
        let trigger_contact = self.trigger_contact.write().await.take();
        let snippet = self
            .history
            .read()
            .await
            .snippet(self.config.snippet_entries);
        let submission = sanitize_submission(lead.into_submission(
            &self.config.client_id,
            snippet,
            &self.config.source_url,
        ));

        self.emit(WidgetEvent::Typing(true))?;
        let result = self
            .call(client::LEAD_PATH, self.api.submit_lead(&submission))
            .await;
        self.emit(WidgetEvent::Typing(false))?;

        match result {
            Ok(response) => {
                tracing::info!(%session_id, "Lead submitted");
                let confirmation = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| prompts::SUBMIT_CONFIRMED.to_string());
                self.say(confirmation).await?;
                self.emit(WidgetEvent::LeadSubmitted)?;

                let contact = response
                    .contact_info
                    .and_then(|c| c.to_message())
                    .or_else(|| trigger_contact.and_then(|c| c.to_message()));
                if let Some(contact) = contact {
                    tokio::time::sleep(self.config.contact_info_delay).await;
                    self.say(contact).await?;
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%session_id, error = %e, rejected = e.is_rejection(), "Lead submission failed");
                self.say(prompts::SUBMIT_FAILED).await
            }
        }
    }

    /// Await a service call under the configured timeout.
    async fn call<T, F>(&self, endpoint: &str, request: F) -> std::result::Result<T, ApiError>
    where
        F: Future<Output = std::result::Result<T, ApiError>>,
    {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| ApiError::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout: limit,
                })?,
            None => request.await,
        }
    }

    /// Record a bot message in the transcript and hand it to the host.
    async fn say(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.history.write().await.push(HistoryEntry::bot(text.clone()));
        self.emit(WidgetEvent::Message(text))
    }

    fn emit(&self, event: WidgetEvent) -> Result<()> {
        self.events.send(event).map_err(|_| Error::EventsClosed)
    }
}
