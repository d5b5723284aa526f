use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolve on SIGINT/SIGTERM (Ctrl+C elsewhere).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Future for `axum::serve(..).with_graceful_shutdown`: completes when either
/// an OS signal arrives or `cancel` is triggered, and cancels the token.
pub async fn shutdown_signal(cancel: CancellationToken) {
    tokio::select! {
        res = wait_for_shutdown() => {
            match res {
                Ok(()) => tracing::info!("shutdown signal received"),
                Err(e) => tracing::warn!(error = %e, "failed to listen for shutdown signals"),
            }
            cancel.cancel();
        }
        _ = cancel.cancelled() => {
            tracing::info!("shutdown requested");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_token_ends_shutdown_future() {
        let token = CancellationToken::new();
        let waiter = tokio::spawn(shutdown_signal(token.clone()));
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
