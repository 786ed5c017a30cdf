use crate::driver::RunDriver;
use crate::error::{AstridError, RunError};
use crate::remote::traits::RunClient;
use anyhow::Context;
use console::style;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// Owns the conversation thread for its whole lifetime.
///
/// Reads tasks from the user, hands each one to the [`RunDriver`], and
/// renders the reply. The thread is created once at the start and deleted
/// exactly once at the end — on graceful exit, on fatal errors, and on
/// Ctrl-C alike.
pub struct SessionLoop {
    client: Arc<dyn RunClient>,
    driver: RunDriver,
}

impl SessionLoop {
    pub fn new(client: Arc<dyn RunClient>, driver: RunDriver) -> Self {
        Self { client, driver }
    }

    /// Run the session to completion, shutting down on Ctrl-C.
    ///
    /// With `single_message` set, exactly one task is processed and every
    /// error propagates to the caller; interactively, abnormal run endings
    /// are reported and the session keeps going.
    pub async fn run(&self, single_message: Option<String>) -> crate::error::Result<()> {
        self.run_until(single_message, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(error = %err, "failed to listen for the shutdown signal");
            }
        })
        .await
    }

    /// Like [`run`](Self::run), but shuts down when `shutdown` resolves.
    pub async fn run_until<F>(
        &self,
        single_message: Option<String>,
        shutdown: F,
    ) -> crate::error::Result<()>
    where
        F: Future<Output = ()>,
    {
        let thread = self.client.create_thread().await?;
        info!(thread_id = %thread.id, "thread created");

        let result = tokio::select! {
            result = self.process_tasks(&thread.id, single_message) => result,
            () = shutdown => {
                warn!("interrupted, shutting down");
                Ok(())
            }
        };

        // Scoped-resource guarantee: the remote thread never outlives the
        // session, whatever happened above.
        match self.client.delete_thread(&thread.id).await {
            Ok(()) => info!(thread_id = %thread.id, "thread deleted"),
            Err(err) => warn!(thread_id = %thread.id, error = %err, "failed to delete thread"),
        }

        result
    }

    async fn process_tasks(
        &self,
        thread_id: &str,
        single_message: Option<String>,
    ) -> crate::error::Result<()> {
        if let Some(task) = single_message {
            let parts = self.driver.run_task(thread_id, &task).await?;
            render_reply(&mut std::io::stdout(), &parts).context("writing reply")?;
            return Ok(());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!(
            "{}",
            style("What task would you like me to do?").bold()
        );

        loop {
            let Some(line) = lines.next_line().await.context("reading stdin")? else {
                break;
            };
            let task = line.trim();
            if task.is_empty() {
                break;
            }

            match self.driver.run_task(thread_id, task).await {
                Ok(parts) => {
                    render_reply(&mut std::io::stdout(), &parts).context("writing reply")?;
                }
                Err(AstridError::Run(
                    err @ (RunError::TerminatedAbnormally { .. } | RunError::TimedOut { .. }),
                )) => {
                    // Survivable: the run produced no reply, but the thread
                    // is intact and the next task can proceed.
                    error!(%err, "run did not produce a reply");
                    eprintln!("{} {err}", style("run failed:").red().bold());
                }
                // Unsupported action kinds and transport failures are not
                // survivable; propagate and let cleanup run.
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

/// Write the reply header and text parts. Only called when a run actually
/// produced a reply; failed runs must not emit the header.
fn render_reply(out: &mut impl Write, parts: &[String]) -> std::io::Result<()> {
    writeln!(out, "{}", style("Reply:").bold())?;
    for part in parts {
        writeln!(out, "{part}")?;
    }
    Ok(())
}
