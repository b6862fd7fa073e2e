// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `breakdesk serve`: wires adapters into the gateway and runs it until a
//! shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use breakdesk_agent::{load_system_instruction, DialogueDriver};
use breakdesk_config::{secrets, BreakdeskConfig, Secrets};
use breakdesk_core::{BreakdeskError, CompletionProvider, ImageHost, ReportNotifier};
use breakdesk_gateway::{start_server, AppState, ServerConfig};
use breakdesk_imgbb::ImgbbHost;
use breakdesk_openai::OpenAiProvider;
use breakdesk_report::{ReportLog, ReportService, WebhookNotifier};
use tracing::{info, warn};

/// Builds gateway state from config and resolved secrets.
///
/// The completion key is required. Without an image-host key uploads are
/// refused; without a webhook URL reports are only logged.
pub async fn build_state(
    config: &BreakdeskConfig,
    resolved: Secrets,
) -> Result<AppState, BreakdeskError> {
    let api_key = resolved.openai_api_key.ok_or_else(|| {
        BreakdeskError::Config(format!(
            "{} is not set (secret store, environment, or [openai] api_key)",
            secrets::OPENAI_API_KEY
        ))
    })?;
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::new(config, &api_key)?);

    let image_host: Option<Arc<dyn ImageHost>> = match resolved.imgbb_api_key {
        Some(key) => Some(Arc::new(ImgbbHost::new(config, key))),
        None => {
            warn!("{} is not set, photo upload disabled", secrets::IMGBB_API_KEY);
            None
        }
    };

    let notifier: Option<Arc<dyn ReportNotifier>> = match resolved.webhook_url {
        Some(url) => Some(Arc::new(WebhookNotifier::new(url)?)),
        None => {
            info!("{} is not set, webhook delivery disabled", secrets::WEBHOOK_URL);
            None
        }
    };

    let reports = ReportService::new(ReportLog::new(&config.report.log_path), notifier);
    info!(path = %config.report.log_path, "report log configured");

    let instruction = load_system_instruction(&config.agent).await;
    let driver = DialogueDriver::new(provider, config.agent.model.clone(), instruction);

    Ok(AppState::new(
        Arc::new(driver),
        Arc::new(reports),
        image_host,
    ))
}

/// Runs the server until SIGINT or SIGTERM.
pub async fn run_serve(config: BreakdeskConfig) -> Result<(), BreakdeskError> {
    init_tracing(&config.agent.log_level);

    let resolved = secrets::resolve_from_env(&config)?;
    let state = build_state(&config, resolved).await?;

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        max_body_bytes: config.server.max_upload_bytes,
        session_idle: Duration::from_secs(config.server.session_idle_secs),
    };
    start_server(&server_config, state, shutdown_signal()).await?;

    info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("breakdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
