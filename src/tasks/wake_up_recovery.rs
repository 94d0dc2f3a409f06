//! Wake-up recovery background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::engine::TimerEngine;

/// Default time between store resyncs
pub const DEFAULT_RESYNC_PERIOD: Duration = Duration::from_secs(1);

/// Background task that periodically resyncs the engine with the store.
///
/// Catches another process starting, pausing, resuming or resetting the timer,
/// and a countdown that ran out while this host was suspended.
pub async fn wake_up_recovery_task(engine: Arc<TimerEngine>, period: Duration) {
    info!("Starting wake-up recovery task every {:?}", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        engine.resync();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        engine::DEFAULT_CADENCE,
        render::{RecordingRenderer, Screen},
        storage::MemoryStore,
        utils::ManualClock,
    };

    const T0: i64 = 1_700_000_000_000;

    fn engine_on(store: &MemoryStore, clock: &ManualClock, renderer: &RecordingRenderer) -> TimerEngine {
        TimerEngine::new(
            Arc::new(store.clone()),
            Arc::new(clock.clone()),
            Arc::new(renderer.clone()),
            DEFAULT_CADENCE,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn picks_up_resume_made_elsewhere() {
        let clock = ManualClock::new(T0);
        let store = MemoryStore::new();
        let renderer = RecordingRenderer::new();
        let watcher = Arc::new(engine_on(&store, &clock, &renderer));
        let other = engine_on(&store, &clock, &RecordingRenderer::new());

        other.start(60_000, None);
        other.pause();
        watcher.restore();
        assert!(!watcher.is_polling());

        let task = tokio::spawn(wake_up_recovery_task(Arc::clone(&watcher), Duration::from_secs(1)));
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(!watcher.is_polling());

        clock.advance(30_000);
        other.resume();
        tokio::time::sleep(Duration::from_millis(1_000)).await;

        assert!(watcher.is_polling());
        assert_eq!(renderer.last_screen(), Some(Screen::Running));
        assert_eq!(renderer.last_display().as_deref(), Some("01:00"));
        task.abort();
    }
}
