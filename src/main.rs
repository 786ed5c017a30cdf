#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use astrid::cli::Cli;
use astrid::config::{Config, Credentials};
use astrid::driver::RunDriver;
use astrid::remote::{OpenAiRunClient, RunClient, default_manifest_path, ensure_assistant};
use astrid::session::SessionLoop;
use astrid::tools::{ToolInvoker, build_registry};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "shutting down");
            ExitCode::from(1)
        }
    }
}

async fn run() -> astrid::error::Result<()> {
    // Read the .env file before anything looks at credentials.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(secs) = cli.poll_interval {
        config.run.poll_interval_secs = secs;
    }
    if let Some(secs) = cli.task_timeout {
        config.run.task_timeout_secs = secs;
    }
    let credentials = Credentials::from_env()?;

    let registry = Arc::new(build_registry(&config.tools.enabled, &credentials)?);

    let openai = OpenAiRunClient::new(credentials.api_key.clone());
    let assistant_id = ensure_assistant(
        &openai,
        &config.assistant,
        credentials.assistant_id.as_deref(),
        &registry,
        &default_manifest_path(),
    )
    .await?;

    let client: Arc<dyn RunClient> = Arc::new(openai);
    let driver = RunDriver::new(
        Arc::clone(&client),
        ToolInvoker::new(registry),
        assistant_id,
        config.run.poll_interval(),
        config.run.task_timeout(),
    );

    SessionLoop::new(client, driver).run(cli.message).await
}
