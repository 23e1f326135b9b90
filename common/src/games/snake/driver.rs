use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::games::{RandomSource, SessionBroadcaster};
use crate::log;
use super::events::{SessionCommand, SessionEvent};
use super::session::SnakeSession;
use super::snapshot::SessionSnapshot;

/// Drives a session from wall time and queued input until `Quit` arrives or the
/// command channel closes. Returns the last snapshot.
pub async fn run_session<R>(
    session: Arc<Mutex<SnakeSession<R>>>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    broadcaster: impl SessionBroadcaster,
    frame: Duration,
) -> SessionSnapshot
where
    R: RandomSource + Send + 'static,
{
    let mut frames = interval(frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    let mut last_snapshot = session.lock().await.snapshot();
    broadcaster.broadcast_state(last_snapshot.clone()).await;

    loop {
        let events = tokio::select! {
            _ = frames.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_frame);
                last_frame = now;

                let mut session = session.lock().await;
                match session.advance(dt) {
                    Ok(events) => events,
                    Err(e) => {
                        log!("Tick failed: {}", e);
                        e.into_events()
                    }
                }
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    log!("Command channel closed, stopping session");
                    break;
                };
                if command == SessionCommand::Quit {
                    log!("Quit requested");
                    break;
                }

                let mut session = session.lock().await;
                match session.handle_command(command) {
                    Ok(events) => events,
                    Err(e) => {
                        log!("Command {:?} failed: {}", command, e);
                        e.into_events()
                    }
                }
            }
        };

        publish(&broadcaster, events).await;

        let snapshot = session.lock().await.snapshot();
        if snapshot != last_snapshot {
            broadcaster.broadcast_state(snapshot.clone()).await;
            last_snapshot = snapshot;
        }
    }

    last_snapshot
}

async fn publish(broadcaster: &impl SessionBroadcaster, events: Vec<SessionEvent>) {
    for event in events {
        broadcaster.broadcast_event(event).await;
    }
}
