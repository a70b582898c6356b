//! Append-only chat transcript
//!
//! Entries are only ever added. The typing indicator is the one ephemeral
//! element: it sits after the last entry and is shown or hidden by the
//! session controller.

use crate::config::ChatConfig;
use crate::html::{escape, number};
use crate::models::{ChatMessage, PhoneResult, Sender};

/// One transcript item
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    /// Compact recommendation card
    Phone(PhoneResult),
}

impl TranscriptEntry {
    /// The message, if this entry is one
    pub fn as_message(&self) -> Option<&ChatMessage> {
        match self {
            Self::Message(message) => Some(message),
            Self::Phone(_) => None,
        }
    }
}

/// Rendered chat log
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    entries: Vec<TranscriptEntry>,
    typing: bool,
    typing_text: String,
    price_label: String,
    match_label: String,
    reasons_separator: String,
}

impl ChatTranscript {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            entries: Vec::new(),
            typing: false,
            typing_text: config.typing_text.clone(),
            price_label: config.price_label.clone(),
            match_label: config.match_label.clone(),
            reasons_separator: config.reasons_separator.clone(),
        }
    }

    /// Append a text message stamped with the current time
    pub fn append_text(&mut self, text: &str, sender: Sender) {
        self.append_message(ChatMessage::now(text, sender));
    }

    /// Append an already stamped message
    pub fn append_message(&mut self, message: ChatMessage) {
        self.entries.push(TranscriptEntry::Message(message));
    }

    /// Append a recommendation card
    pub fn append_phone(&mut self, phone: &PhoneResult) {
        self.entries.push(TranscriptEntry::Phone(phone.clone()));
    }

    /// Show the typing indicator; returns `false` if it was already shown
    pub fn show_typing(&mut self) -> bool {
        if self.typing {
            return false;
        }
        self.typing = true;
        true
    }

    /// Remove the typing indicator; returns `false` if it was not shown
    pub fn hide_typing(&mut self) -> bool {
        std::mem::replace(&mut self.typing, false)
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.typing
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Last text message, skipping recommendation cards
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.entries.iter().rev().find_map(TranscriptEntry::as_message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// HTML for one entry
    pub fn entry_html(&self, entry: &TranscriptEntry) -> String {
        match entry {
            TranscriptEntry::Message(message) => message_html(message),
            TranscriptEntry::Phone(phone) => self.phone_html(phone),
        }
    }

    fn phone_html(&self, phone: &PhoneResult) -> String {
        let reasons = match &phone.reasons {
            Some(reasons) => format!(
                "<div class=\"reasons\">{}</div>",
                escape(&reasons.join(&self.reasons_separator))
            ),
            None => String::new(),
        };
        format!(
            "<div class=\"phone-card\"><strong>{}</strong><br>{}: {}<br>{}: {}%<br>{}</div>",
            escape(&phone.name),
            escape(&self.price_label),
            escape(&number(phone.price)),
            escape(&self.match_label),
            escape(&number(phone.match_percentage)),
            reasons
        )
    }

    /// HTML for the whole transcript, typing indicator included
    pub fn to_html(&self) -> String {
        let mut html: String = self.entries.iter().map(|e| self.entry_html(e)).collect();
        if self.typing {
            html.push_str(&format!(
                "<div id=\"typing-indicator\" class=\"message bot\"><div class=\"message-text\">{}<span class=\"dots\"> </span></div></div>",
                escape(&self.typing_text)
            ));
        }
        html
    }
}

fn message_html(message: &ChatMessage) -> String {
    format!(
        "<div class=\"message {}\"><div class=\"message-text\">{}</div><div class=\"message-time\">{}</div></div>",
        message.sender,
        escape(&message.text),
        message.sent_at.format("%H:%M")
    )
}
