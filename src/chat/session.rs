//! Chat session state machine
//!
//! One exchange at a time: `Idle -> Sending -> (Resolved | Failed) -> Idle`.
//! The state is checked on every send, whatever triggered it, so a second
//! request can never start while one is outstanding.

use crate::chat::transcript::ChatTranscript;
use crate::config::ChatConfig;
use crate::error::{PhoneFinderError, Result};
use crate::models::{ChatResponse, Sender};
use crate::service::ChatService;

use std::fmt;
use std::sync::Arc;

/// Lifecycle state of the chat widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Input and send control enabled
    Idle,
    /// One request outstanding; input and send control disabled
    Sending,
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Sending => write!(f, "sending"),
        }
    }
}

/// How a finished exchange ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Resolved {
        /// Whether the response carried reply text
        replied: bool,
        recommendations: usize,
    },
    /// The error entry was appended instead of a reply
    Failed,
}

/// Ticket for the exchange currently in `Sending`
///
/// Only [`ChatSessionController::begin_send`] creates one, and
/// [`ChatSessionController::complete`] consumes it.
#[derive(Debug)]
#[must_use = "an exchange must be completed to leave the Sending state"]
pub struct PendingExchange {
    message: String,
}

impl PendingExchange {
    /// Trimmed text sent to the assistant
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Drives the chat widget against a [`ChatService`]
pub struct ChatSessionController {
    service: Arc<dyn ChatService>,
    state: ChatState,
    transcript: ChatTranscript,
    draft: String,
    open: bool,
    error_message: String,
}

impl ChatSessionController {
    pub fn new(service: Arc<dyn ChatService>, config: &ChatConfig) -> Self {
        Self {
            service,
            state: ChatState::Idle,
            transcript: ChatTranscript::new(config),
            draft: String::new(),
            open: false,
            error_message: config.error_message.clone(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Whether the input box accepts text
    pub fn input_enabled(&self) -> bool {
        self.state == ChatState::Idle
    }

    /// Whether the send control can be pressed
    pub fn send_enabled(&self) -> bool {
        self.state == ChatState::Idle
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Current text of the input box
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Type into the input box; ignored while it is disabled
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.input_enabled() {
            self.draft = text.into();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the chat box; no-op when already open
    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            tracing::debug!("Chat opened");
        }
    }

    /// Hide the chat box; no-op when already closed
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!("Chat closed");
        }
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Enter `Sending` for `input`
    ///
    /// Blank input is dropped and returns `Ok(None)` with nothing appended.
    /// Otherwise the user's text is appended right away, the typing
    /// indicator is shown and the controls are disabled.
    ///
    /// # Errors
    ///
    /// Returns `PhoneFinderError::RequestInFlight` while another exchange is
    /// pending.
    pub fn begin_send(&mut self, input: &str) -> Result<Option<PendingExchange>> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if self.state == ChatState::Sending {
            tracing::warn!("Chat send rejected: a request is already in flight");
            return Err(PhoneFinderError::RequestInFlight.into());
        }

        self.state = ChatState::Sending;
        self.transcript.append_text(text, Sender::User);
        self.draft.clear();
        self.transcript.show_typing();
        tracing::debug!(state = %self.state, "Chat message queued");

        Ok(Some(PendingExchange {
            message: text.to_string(),
        }))
    }

    /// Leave `Sending` with the service outcome
    pub fn complete(
        &mut self,
        exchange: PendingExchange,
        response: Result<ChatResponse>,
    ) -> ExchangeOutcome {
        self.transcript.hide_typing();

        let outcome = match response {
            Ok(response) => {
                let reply = response.reply_text();
                if let Some(reply) = reply {
                    self.transcript.append_text(reply, Sender::Bot);
                }
                for phone in response.recommendations() {
                    self.transcript.append_phone(phone);
                }
                ExchangeOutcome::Resolved {
                    replied: reply.is_some(),
                    recommendations: response.recommendations().len(),
                }
            }
            Err(e) => {
                tracing::error!(chat_message = exchange.message(), "Chat error: {:#}", e);
                self.transcript.append_text(&self.error_message, Sender::Bot);
                ExchangeOutcome::Failed
            }
        };

        self.state = ChatState::Idle;
        outcome
    }

    /// Send `input` and wait for the assistant
    ///
    /// Returns `Ok(None)` for blank input.
    pub async fn send(&mut self, input: &str) -> Result<Option<ExchangeOutcome>> {
        let Some(exchange) = self.begin_send(input)? else {
            return Ok(None);
        };
        let response = self.service.chat(exchange.message()).await;
        Ok(Some(self.complete(exchange, response)))
    }

    /// Send whatever is in the input box
    pub async fn send_draft(&mut self) -> Result<Option<ExchangeOutcome>> {
        let draft = self.draft.clone();
        self.send(&draft).await
    }
}
