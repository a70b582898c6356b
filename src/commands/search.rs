//! Search and select commands

use crate::cli::FilterArgs;
use crate::config::Config;
use crate::details::DETAILS_PAGE;
use crate::error::Result;
use crate::html::number;
use crate::models::PhoneResult;
use crate::search::{FilterStateController, NumericField};
use crate::service::ApiClient;
use colored::Colorize;
use prettytable::{format, row, Table};
use std::sync::Arc;

/// Load the page, apply `filters` to its controls and search
async fn run_search(
    config: &Config,
    filters: &FilterArgs,
) -> Result<Option<FilterStateController>> {
    let client = Arc::new(ApiClient::new(&config.service)?);
    let store = super::open_store(config)?;
    let mut controller = FilterStateController::new(client, store);

    controller.load_page().await;
    apply_filters(&mut controller, filters);

    match controller.search().await? {
        Some(_) => Ok(Some(controller)),
        None => {
            println!(
                "{}",
                "Price range unavailable; search was not submitted.".yellow()
            );
            Ok(None)
        }
    }
}

/// Copy CLI flags onto the page controls
pub fn apply_filters(controller: &mut FilterStateController, filters: &FilterArgs) {
    if let Some(brand) = &filters.brand {
        if !controller.form().brand_options.iter().any(|b| b == brand) {
            tracing::warn!(brand = %brand, "Brand is not in the catalog list");
        }
        controller.select_brand(brand.clone());
    }

    controller.set_field(NumericField::MinBattery, filters.min_battery.clone());
    controller.set_field(NumericField::MinRam, filters.min_ram.clone());
    controller.set_field(NumericField::MinCamera, filters.min_camera.clone());

    if let Some([low, high]) = controller.range().get() {
        let low = filters.min_price.unwrap_or(low);
        let high = filters.max_price.unwrap_or(high);
        controller.range_mut().set([low, high]);
    }
}

/// Run a search and print the results
pub async fn search(config: &Config, filters: &FilterArgs, html: bool) -> Result<()> {
    let Some(controller) = run_search(config, filters).await? else {
        return Ok(());
    };

    if html {
        println!("{}", controller.view().to_html());
    } else {
        println!("Price: {}", controller.range().label());
        print_results_table(controller.current_results());
    }
    Ok(())
}

/// Run a search and hand result `index` to the details view
pub async fn select(config: &Config, filters: &FilterArgs, index: usize) -> Result<()> {
    let Some(controller) = run_search(config, filters).await? else {
        return Ok(());
    };

    match controller.select(index)? {
        Some(phone) => {
            println!(
                "Selected {} for {}",
                phone.name.green(),
                DETAILS_PAGE.cyan()
            );
            println!("Use {} to view it.", "phonefinder details".cyan());
        }
        None => println!(
            "{}",
            format!(
                "No result at position {} ({} results).",
                index,
                controller.current_results().len()
            )
            .yellow()
        ),
    }
    Ok(())
}

fn print_results_table(results: &[PhoneResult]) {
    if results.is_empty() {
        println!("{}", crate::search::render::NO_RESULTS_TEXT.yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "#", "Name", "Brand", "Price", "Battery", "Camera", "RAM", "Match"
    ]);

    for (index, phone) in results.iter().enumerate() {
        table.add_row(row![
            index,
            phone.name,
            phone.brand,
            format!("${}", number(phone.price)),
            format!("{} mAh", number(phone.battery)),
            format!("{} MP", number(phone.camera_mp)),
            format!("{} MB", number(phone.ram)),
            format!("{}%", number(phone.match_percentage))
        ]);
    }

    println!();
    table.printstd();
    println!();
}
