use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use verifier_core::{Kind, NotificationView};
use verifier_engine::{ContextId, ContextRouter, PageAgentHandle, RelayHandle};
use verifier_logging::{verifier_debug, verifier_error, verifier_info};

use super::cli::Cli;
use super::config::AppConfig;
use super::editor::DocumentEditor;
use super::logging;
use super::surface::TerminalSurface;

/// The app hosts a single simulated page.
const PAGE_CONTEXT: ContextId = 1;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    config.validate()?;
    logging::initialize(config.log_destination, config.level_filter()?, &config.log_file);
    verifier_info!("Verifying {:?} against {}", cli.document, config.endpoint);

    let verifier = config.build_verifier()?;
    let router = Arc::new(ContextRouter::new());
    let relay = RelayHandle::new(Arc::new(verifier), router.clone());

    // The page side gets its own single-threaded event loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start the page runtime")?;
    let outcome = runtime.block_on(run_page(&cli, &config, relay, router))?;

    Ok(exit_code(&outcome.kind))
}

async fn run_page(
    cli: &Cli,
    config: &AppConfig,
    relay: RelayHandle,
    router: Arc<ContextRouter>,
) -> anyhow::Result<NotificationView> {
    let (surface, mut outcomes) = TerminalSurface::new();
    let editor = DocumentEditor::new(
        cli.document.clone(),
        Duration::from_millis(cli.mount_delay_ms),
    );
    let (agent, task) = PageAgentHandle::spawn(
        PAGE_CONTEXT,
        config.poll_settings(),
        Arc::new(editor),
        Arc::new(relay),
        Arc::new(surface),
    );
    router.register(agent.clone());

    let disposition = agent.observe(cli.trigger.event());
    verifier_debug!("Trigger disposition: {:?}", disposition);

    let outcome = outcomes.recv().await;

    router.unregister(PAGE_CONTEXT);
    agent.shutdown();
    if let Err(err) = task.await {
        verifier_error!("Page agent task failed: {}", err);
    }

    outcome.ok_or_else(|| anyhow!("page agent stopped before reporting an outcome"))
}

fn exit_code(kind: &Kind) -> ExitCode {
    match kind {
        Kind::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
