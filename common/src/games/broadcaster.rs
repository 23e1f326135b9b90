use std::future::Future;

use super::snake::{SessionEvent, SessionSnapshot};

/// Presentation side of a running session: renderers take snapshots, audio takes events.
pub trait SessionBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: SessionSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_event(&self, event: SessionEvent) -> impl Future<Output = ()> + Send;
}
