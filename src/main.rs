//! countdown-ring - a countdown timer that survives restarts
//!
//! This is the main entry point for the countdown-ring application.

use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::broadcast::{self, error::RecvError}};
use tracing::{debug, info, warn};

use countdown_ring::{
    api::create_router,
    config::{Command, Config},
    engine::{TimerEngine, TimerEvent},
    render::{ChannelRenderer, RenderAdapter, TerminalRenderer},
    state::{AppState, TimerStatus},
    storage::{FileStore, KeyValueStore},
    tasks::wake_up_recovery_task,
    utils::{shutdown_signal, Clock, SystemClock},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the countdown line on stdout stays intact
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_ring={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let state_dir = config.state_dir();
    debug!("Using state directory {}", state_dir.display());
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(state_dir));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match &config.command {
        Command::Serve { port, host } => {
            serve(&config, store, clock, host.clone(), *port).await?;
        }
        Command::Start { duration, detach } => {
            let duration_ms = duration.total_ms()?;
            let (renderer, engine) = terminal_engine(&config, store, clock);
            let events = engine.subscribe();
            engine.start(duration_ms, None);
            if *detach {
                renderer.end_line();
                println!("Countdown running in the background");
            } else {
                follow(&engine, events, config.resync_period()).await?;
                renderer.end_line();
            }
        }
        Command::Pause => {
            let (renderer, engine) = terminal_engine(&config, store, clock);
            let before = engine.snapshot();
            engine.pause();
            renderer.end_line();
            if before.status != TimerStatus::Running {
                println!("No running timer to pause ({})", before.summary());
            }
        }
        Command::Resume { detach } => {
            let (renderer, engine) = terminal_engine(&config, store, clock);
            let before = engine.snapshot();
            if before.status != TimerStatus::Paused {
                println!("No paused timer to resume ({})", before.summary());
                return Ok(());
            }
            let events = engine.subscribe();
            engine.resume();
            if !*detach {
                follow(&engine, events, config.resync_period()).await?;
            }
            renderer.end_line();
        }
        Command::Reset => {
            let (renderer, engine) = terminal_engine(&config, store, clock);
            engine.reset();
            renderer.end_line();
        }
        Command::Status { json } => {
            let (_, engine) = terminal_engine(&config, store, clock);
            let snapshot = engine.snapshot();
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", snapshot.summary());
            }
        }
        Command::Watch => {
            let (renderer, engine) = terminal_engine(&config, store, clock);
            let events = engine.subscribe();
            engine.restore();
            follow(&engine, events, config.resync_period()).await?;
            renderer.end_line();
        }
    }

    Ok(())
}

/// Engine drawing to this terminal
fn terminal_engine(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
) -> (Arc<TerminalRenderer>, Arc<TimerEngine>) {
    let renderer = Arc::new(TerminalRenderer::stdout());
    let engine = Arc::new(TimerEngine::new(
        store,
        clock,
        Arc::clone(&renderer) as Arc<dyn RenderAdapter>,
        config.cadence(),
    ));
    (renderer, engine)
}

/// Keep the process alive until the countdown finishes or a signal arrives.
/// The stored timer is left untouched on interruption.
async fn follow(
    engine: &Arc<TimerEngine>,
    mut events: broadcast::Receiver<TimerEvent>,
    resync: Duration,
) -> anyhow::Result<()> {
    let recovery = tokio::spawn(wake_up_recovery_task(Arc::clone(engine), resync));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(TimerEvent::Finished) => break Ok(()),
                Ok(TimerEvent::Reset) => {
                    debug!("Countdown was reset, stopped following");
                    break Ok(());
                }
                Ok(event) => debug!("Timer event: {:?}", event),
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} timer events", skipped),
                Err(RecvError::Closed) => break Ok(()),
            },
            signal = &mut shutdown => {
                match &signal {
                    Ok(signal) => debug!("Stopped following after signal {}", signal),
                    Err(e) => warn!("Signal handling failed: {}", e),
                }
                break signal.map(|_| ()).map_err(anyhow::Error::from);
            }
        }
    };

    recovery.abort();
    result
}

async fn serve(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    info!("Starting countdown-ring server v{}", env!("CARGO_PKG_VERSION"));

    let (renderer, frame_rx) = ChannelRenderer::new();
    let engine = Arc::new(TimerEngine::new(store, clock, Arc::new(renderer), config.cadence()));
    engine.restore();

    // Follow changes made by CLI invocations sharing the state directory
    let recovery = tokio::spawn(wake_up_recovery_task(Arc::clone(&engine), config.resync_period()));

    let state = Arc::new(AppState::new(engine, frame_rx, port, host.clone()));
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start  - Start a countdown");
    info!("  POST /timer/pause  - Pause the countdown");
    info!("  POST /timer/resume - Resume the countdown");
    info!("  POST /timer/reset  - Cancel the countdown");
    info!("  GET  /timer        - Current timer status");
    info!("  GET  /health       - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    recovery.abort();
    info!("Server shutdown complete");
    Ok(())
}
