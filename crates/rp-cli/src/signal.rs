//! Interrupt wiring

use tokio_util::sync::CancellationToken;

/// Cancel the returned token on Ctrl+C, or SIGTERM on Unix
pub fn spawn_interrupt_listener() -> CancellationToken {
    let interrupt = CancellationToken::new();
    let trigger = interrupt.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::warn!("cannot listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            result = ctrl_c => {
                if let Err(e) = result {
                    tracing::warn!("cannot listen for Ctrl+C: {}", e);
                    return;
                }
                tracing::debug!("received Ctrl+C");
            }
            _ = terminate => {
                tracing::debug!("received SIGTERM");
            }
        }

        trigger.cancel();
    });

    interrupt
}
