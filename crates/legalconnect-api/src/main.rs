//! LegalConnect CLI and REST API entry point.
//!
//! Binary name: `lconn`
//!
//! Parses CLI arguments, installs tracing, initializes the database and
//! services, then dispatches to a command handler or starts the API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use legalconnect_observe::tracing_setup::{
    LogFormat, TracingOptions, filter_for_verbosity, init_tracing, otel_requested,
    shutdown_tracing,
};

use cli::{Cli, Commands};
use http::extractors::query::ProviderListQuery;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        enable_otel: otel_requested(),
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "lconn", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;
    let result = run(cli, state).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} LegalConnect API listening on {}",
                    console::style("⚖").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "server started");

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Providers {
            search,
            city,
            provider_type,
            specialization,
        } => {
            let query = ProviderListQuery {
                search,
                city,
                provider_type,
                specialization,
            };
            cli::providers::list_providers(&state, query, cli.json).await?;
        }

        Commands::Chat { question } => {
            cli::chat::chat(&state, question, cli.json).await?;
        }

        Commands::Admin { command } => {
            cli::admin::run(&state, command, cli.json).await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that signal source is ignored and the
/// server keeps running until the other one fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
