//! Background sweep of expired tokens.

use crate::ports::ConfirmationTokenApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Sweep `store` every `interval`, forever.
pub async fn sweep_task(store: Arc<dyn ConfirmationTokenApi>, interval: Duration) {
    let mut sweep_interval = tokio::time::interval(interval);
    sweep_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        sweep_interval.tick().await;
        let removed = store.sweep().await;
        if removed > 0 {
            debug!(removed = removed, "[lx-03] Swept expired confirmation tokens");
        }
    }
}

/// Spawn [`sweep_task`] on the current runtime. Abort the handle to stop it.
pub fn spawn_sweeper(store: Arc<dyn ConfirmationTokenApi>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(sweep_task(store, interval))
}
