//! Verified provider listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use legalconnect_core::service::directory::filter_providers;

use crate::http::extractors::query::ProviderListQuery;
use crate::state::AppState;

pub async fn list_providers(
    state: &AppState,
    query: ProviderListQuery,
    json: bool,
) -> Result<()> {
    let query = query
        .into_directory_query()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let verified = state.directory_service.list_verified().await?;
    let providers = filter_providers(&verified, &query);

    if json {
        println!("{}", serde_json::to_string_pretty(&providers)?);
        return Ok(());
    }

    if providers.is_empty() {
        println!();
        println!("  {} No verified providers match.", style("ℹ").blue());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Type").fg(Color::Cyan),
            Cell::new("City").fg(Color::Cyan),
            Cell::new("Rating").fg(Color::Cyan),
            Cell::new("Experience").fg(Color::Cyan),
            Cell::new("Available").fg(Color::Cyan),
        ]);

    for provider in &providers {
        let available = if provider.is_available {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(provider.id),
            Cell::new(&provider.business_name),
            Cell::new(provider.provider_type),
            Cell::new(format!("{}, {}", provider.city, provider.state)),
            Cell::new(format!("{:.1} ({})", provider.rating, provider.total_reviews)),
            Cell::new(format!("{} yrs", provider.experience_years)),
            available,
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {} of {} verified providers",
        style(providers.len()).bold(),
        verified.len()
    );
    println!();
    Ok(())
}
