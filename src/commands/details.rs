//! Details view command

use crate::config::{Config, StorageBackend};
use crate::details::DetailsView;
use crate::error::Result;
use colored::Colorize;

/// Print the phone handed off by `select`
pub fn show_details(config: &Config, html: bool) -> Result<()> {
    let store = super::open_store(config)?;

    let Some(view) = DetailsView::load(&store) else {
        println!("{}", "No phone selected.".yellow());
        if config.storage.backend == StorageBackend::Memory {
            println!(
                "Selections only survive between commands with {}.",
                "--storage-path <DIR>".cyan()
            );
        }
        return Ok(());
    };

    if html {
        println!("{}", view.to_html());
    } else {
        println!("\n{}\n", view.to_text());
    }
    Ok(())
}
