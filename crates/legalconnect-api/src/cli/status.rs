//! Marketplace status command.

use anyhow::Result;
use console::style;

use legalconnect_core::repository::provider::ProviderRepository;
use legalconnect_core::repository::review::ReviewRepository;
use legalconnect_core::repository::service_request::ServiceRequestRepository;
use legalconnect_core::service::admin::AdminStats;
use legalconnect_infra::sqlite::provider::SqliteProviderRepository;
use legalconnect_infra::sqlite::review::SqliteReviewRepository;
use legalconnect_infra::sqlite::service_request::SqliteServiceRequestRepository;

use crate::state::AppState;

/// Display provider, request and review counts plus the active configuration.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let providers = SqliteProviderRepository::new(state.db_pool.clone())
        .list(None)
        .await?;
    let requests = SqliteServiceRequestRepository::new(state.db_pool.clone())
        .list(None)
        .await?;
    let reviews = SqliteReviewRepository::new(state.db_pool.clone())
        .list(None)
        .await?;
    let stats = AdminStats::compute(&providers, &requests, &reviews);
    let llm = state.chat_service.model_name();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "upload_dir": state.upload_dir.display().to_string(),
            "llm": llm,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} LegalConnect v{}",
        style("⚖").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Providers ──").dim());
    println!("  Total:    {}", style(stats.total_providers).bold());
    println!("  Verified: {}", style(stats.verified_providers).green());
    if stats.pending_providers > 0 {
        println!("  Pending:  {}", style(stats.pending_providers).yellow());
    }
    println!();

    println!("  {}", style("── Requests ──").dim());
    println!("  Total:     {}", style(stats.total_requests).bold());
    println!("  Active:    {}", style(stats.active_requests).cyan());
    println!("  Completed: {}", style(stats.completed_requests).green());
    println!("  Reviews:   {}", stats.total_reviews);
    println!();

    println!("  {}", style("── Config ──").dim());
    println!("  Data:    {}", style(state.data_dir.display()).dim());
    println!("  Uploads: {}", style(state.upload_dir.display()).dim());
    println!("  Model:   {llm}");
    println!();

    Ok(())
}
