//! Event bus between background services and the publish loop.
//!
//! Design principles:
//! - Broadcast channel (tokio) - all subscribers receive every event
//! - Non-blocking sends; events are dropped when nobody listens yet
//! - Lagging receivers skip old events (only the latest state matters)

use std::sync::OnceLock;
use tokio::sync::broadcast::{self, Receiver, Sender};
use trackpost_core::{NormalizedDocument, PlaybackState};

/// Broadcast channel capacity.
/// 64 is enough for burst handling without memory bloat.
pub const CHANNEL_CAPACITY: usize = 64;

/// One normalized media-state change, ready to publish.
#[derive(Clone, Debug)]
pub struct MediaUpdate {
    /// Simplified state, or `None` when publication must be suppressed.
    pub state: Option<PlaybackState>,
    pub document: NormalizedDocument,
    /// Short name of the player the update came from.
    pub source_name: String,
}

/// All events crossing from background services to the publish loop.
#[derive(Clone, Debug)]
pub enum BridgeEvent {
    Media(Box<MediaUpdate>), // Boxed to keep the enum size small
    SourcesChanged {
        active: Option<String>,
        sources: Vec<String>,
    },
    /// The observer lost the session entirely; nothing may be
    /// published until it comes back.
    ObserverDown,
}

// Static broadcast sender - subscribers get their own receiver via subscribe()
static SENDER: OnceLock<Sender<BridgeEvent>> = OnceLock::new();

fn get_sender() -> &'static Sender<BridgeEvent> {
    SENDER.get_or_init(|| {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        tx
    })
}

/// Send an event to the publish loop. Non-blocking.
#[inline]
pub fn send(event: BridgeEvent) {
    let _ = get_sender().send(event);
}

/// Send a media update to the publish loop.
#[inline]
pub fn send_media(update: MediaUpdate) {
    send(BridgeEvent::Media(Box::new(update)));
}

/// Subscribe to the event bus. Returns a new receiver that will
/// receive all future events.
pub fn subscribe() -> Receiver<BridgeEvent> {
    get_sender().subscribe()
}
