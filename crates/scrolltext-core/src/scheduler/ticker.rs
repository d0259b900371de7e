use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Call `on_tick` every `period` until shutdown is signalled.
///
/// The first call happens one period after start. Ticks that fall behind are
/// delayed rather than bursted.
pub async fn run_ticker<F>(period: Duration, mut shutdown: watch::Receiver<bool>, mut on_tick: F)
where
    F: FnMut(),
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Skip the first tick (fires immediately)
    interval.tick().await;

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = interval.tick() => on_tick(),
        }
    }

    debug!("Ticker stopped");
}
