//! Admin moderation commands.
//!
//! The acting admin is named with `--admin <email>` and must already hold
//! the admin role.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use legalconnect_core::repository::user::UserRepository;
use legalconnect_types::id::ProviderId;
use legalconnect_types::provider::Provider;
use legalconnect_types::user::User;

use crate::cli::AdminCommand;
use crate::state::AppState;

pub async fn run(state: &AppState, command: AdminCommand, json: bool) -> Result<()> {
    match command {
        AdminCommand::Verify {
            provider_id,
            admin,
            reason,
        } => {
            let admin = resolve_admin(state, &admin).await?;
            let id = parse_provider_id(&provider_id)?;
            let provider = state
                .admin_service
                .verify_provider(&admin, &id, reason)
                .await?;
            print_provider(&provider, "verified", json)
        }
        AdminCommand::Reject {
            provider_id,
            admin,
            reason,
        } => {
            let admin = resolve_admin(state, &admin).await?;
            let id = parse_provider_id(&provider_id)?;
            let provider = state
                .admin_service
                .reject_provider(&admin, &id, reason)
                .await?;
            print_provider(&provider, "rejected", json)
        }
        AdminCommand::Suspend { provider_id, admin } => {
            let admin = resolve_admin(state, &admin).await?;
            let id = parse_provider_id(&provider_id)?;
            let provider = state
                .admin_service
                .set_availability(&admin, &id, false)
                .await?;
            print_provider(&provider, "suspended", json)
        }
        AdminCommand::Activate { provider_id, admin } => {
            let admin = resolve_admin(state, &admin).await?;
            let id = parse_provider_id(&provider_id)?;
            let provider = state
                .admin_service
                .set_availability(&admin, &id, true)
                .await?;
            print_provider(&provider, "activated", json)
        }
        AdminCommand::Audit { admin, limit } => {
            let admin = resolve_admin(state, &admin).await?;
            audit(state, &admin, limit, json).await
        }
    }
}

async fn resolve_admin(state: &AppState, email: &str) -> Result<User> {
    let email = email.trim().to_lowercase();
    let Some(user) = state.users.get_by_email(&email).await? else {
        bail!("no account for '{email}'. Log in once through the web app first.");
    };
    if !user.is_admin() {
        bail!("'{email}' is not an admin");
    }
    Ok(user)
}

fn parse_provider_id(raw: &str) -> Result<ProviderId> {
    raw.parse()
        .map_err(|e| anyhow::anyhow!("invalid provider id '{raw}': {e}"))
}

fn print_provider(provider: &Provider, verb: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(provider)?);
        return Ok(());
    }
    println!();
    println!(
        "  {} {} {}",
        style("✓").green().bold(),
        style(&provider.business_name).cyan(),
        verb
    );
    println!(
        "  {}",
        style(format!(
            "status: {}, listed: {}",
            provider.verification_status, provider.is_available
        ))
        .dim()
    );
    println!();
    Ok(())
}

async fn audit(state: &AppState, admin: &User, limit: i64, json: bool) -> Result<()> {
    let entries = state.admin_service.audit_log(admin, Some(limit)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!("  {} Audit log is empty.", style("ℹ").blue());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("When").fg(Color::Cyan),
            Cell::new("Admin").fg(Color::Cyan),
            Cell::new("Action").fg(Color::Cyan),
            Cell::new("Target").fg(Color::Cyan),
            Cell::new("Details").fg(Color::Cyan),
        ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&entry.admin_email),
            Cell::new(entry.action),
            Cell::new(&entry.target_name),
            Cell::new(&entry.details),
        ]);
    }
    println!();
    println!("{table}");
    println!();
    Ok(())
}
