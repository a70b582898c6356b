//! Interactive chat handler
//!
//! Runs a readline loop that feeds each line to the chat session controller
//! and prints the transcript entries the exchange produced.

use crate::chat::{ChatSessionController, ExchangeOutcome, TranscriptEntry};
use crate::config::Config;
use crate::error::Result;
use crate::html::number;
use crate::models::Sender;
use crate::service::ApiClient;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Start interactive chat mode
pub async fn run_chat(config: Config) -> Result<()> {
    tracing::info!("Starting interactive chat");

    let client = Arc::new(ApiClient::new(&config.service)?);
    let mut chat = ChatSessionController::new(client, &config.chat);
    chat.open();

    let mut rl = DefaultEditor::new()?;
    print_welcome_banner();

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if matches!(trimmed, "/quit" | "/exit" | "exit") {
                    break;
                }
                rl.add_history_entry(trimmed)?;

                let before = chat.transcript().len();
                chat.set_draft(trimmed);
                println!("{}", "...".dimmed());

                match chat.send_draft().await? {
                    Some(ExchangeOutcome::Resolved { replied: false, recommendations: 0 }) => {
                        println!("{}", "(empty reply)".dimmed());
                    }
                    Some(_) | None => {}
                }

                // Skip the user's own line, it is already on screen
                for entry in chat.transcript().entries().iter().skip(before + 1) {
                    print_entry(entry, &config);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                break;
            }
        }
    }

    chat.close();
    println!("Goodbye!");
    Ok(())
}

fn print_entry(entry: &TranscriptEntry, config: &Config) {
    match entry {
        TranscriptEntry::Message(message) => {
            let time = message.sent_at.format("%H:%M").to_string();
            match message.sender {
                Sender::Bot => println!("{} {} {}", time.dimmed(), "bot>".green(), message.text),
                Sender::User => println!("{} {} {}", time.dimmed(), "you>".cyan(), message.text),
            }
        }
        TranscriptEntry::Phone(phone) => {
            println!(
                "  {} | {}: {} | {}: {}%",
                phone.name.bold(),
                config.chat.price_label,
                number(phone.price),
                config.chat.match_label,
                number(phone.match_percentage)
            );
            if let Some(reasons) = &phone.reasons {
                println!(
                    "    {}",
                    reasons.join(&config.chat.reasons_separator).dimmed()
                );
            }
        }
    }
}

fn print_welcome_banner() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║              PhoneFinder Assistant - Welcome!                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Ask about phones; type '/quit' to leave\n");
}
