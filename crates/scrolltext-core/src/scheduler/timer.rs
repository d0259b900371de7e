use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

/// Call `on_expire` once after `duration`, unless shutdown comes first.
pub async fn run_timer<F>(duration: Duration, mut shutdown: watch::Receiver<bool>, on_expire: F)
where
    F: FnOnce(),
{
    tokio::select! {
        _ = tokio::time::sleep(duration) => on_expire(),
        _ = shutdown.changed() => debug!("Duration timer cancelled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_duration() {
        let fired = Arc::new(AtomicBool::new(false));
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let flag = fired.clone();
        let task = tokio::spawn(run_timer(Duration::from_secs(5), shutdown_rx, move || {
            flag.store(true, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(!fired.load(Ordering::SeqCst));

        task.await.unwrap();
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let flag = fired.clone();
        let task = tokio::spawn(run_timer(Duration::from_secs(5), shutdown_rx, move || {
            flag.store(true, Ordering::SeqCst);
        }));

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
        assert!(!fired.load(Ordering::SeqCst));
    }
}
