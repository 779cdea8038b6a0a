//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Wait for a shutdown signal, then stop accepting connections and give
/// in-flight requests `grace` to finish.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(
        signal,
        grace_seconds = grace.map(|grace| grace.as_secs()),
        "shutting down"
    );

    handle.stop_graceful(grace);

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?;

    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| "ctrl_c").map_err(ShutdownSignalError::CtrlC),
        _ = terminate.recv() => Ok("terminate"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map(|()| "ctrl_c")
        .map_err(ShutdownSignalError::CtrlC)
}
