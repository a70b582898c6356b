//! Embedded assistant chat widget

pub mod session;
pub mod transcript;

pub use session::{ChatSessionController, ChatState, ExchangeOutcome, PendingExchange};
pub use transcript::{ChatTranscript, TranscriptEntry};
