//! MPRIS observer implementation
//!
//! Single D-Bus connection; property-change signals are used as a
//! TRIGGER only. When triggered, all properties are fetched fresh and
//! handed over as one immutable snapshot. Simple, reliable, no
//! incremental message parsing.

use crate::error::MprisError;
use crate::metadata::{bag_from_metadata, transport_from_status};
use crate::sources::{PlayerSource, SourcePreference};
use futures_util::StreamExt;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use trackpost_core::{AttributeBag, RawTransportState};
use zbus::Connection;
use zbus::zvariant::OwnedValue;

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Delay before re-discovering players after a session ended.
const RECONNECT_DELAY: Duration = Duration::from_millis(500);
/// Poll interval while no player is present.
const DISCOVERY_POLL: Duration = Duration::from_secs(2);
/// Liveness probe interval for the connected player.
const LIVENESS_PROBE: Duration = Duration::from_secs(5);

/// D-Bus proxy for the MPRIS player interface
#[zbus::proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MprisPlayer {
    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;

    #[zbus(property)]
    fn playback_status(&self) -> zbus::Result<String>;
}

/// D-Bus proxy for the MPRIS root interface
#[zbus::proxy(
    interface = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MprisRoot {
    #[zbus(property)]
    fn identity(&self) -> zbus::Result<String>;
}

/// One observer delivery: an immutable metadata snapshot plus the raw
/// transport state of the active player.
#[derive(Clone, Debug)]
pub struct MediaSnapshot {
    pub attributes: AttributeBag,
    /// Raw transport state, absent when the player reported something
    /// unrecognized.
    pub transport: Option<RawTransportState>,
    /// Short name, e.g. "spotify"
    pub source_name: String,
    /// Full D-Bus name, e.g. "org.mpris.MediaPlayer2.spotify"
    pub source_bus_name: String,
}

/// MPRIS session observer
pub struct MprisClient;

impl MprisClient {
    /// Connect to the session bus and start observing.
    ///
    /// `on_update` is invoked with a fresh snapshot on every
    /// media-state change; `on_sources_changed` whenever the set of
    /// players or the active selection changes.
    pub async fn start<F, G>(
        preference: SourcePreference,
        on_update: F,
        on_sources_changed: G,
    ) -> Result<(), MprisError>
    where
        F: Fn(MediaSnapshot) + Send + Sync + 'static,
        G: Fn(Vec<PlayerSource>, Option<String>) + Send + Sync + 'static,
    {
        let connection = Connection::session().await?;

        let sources = discover_sources(&connection).await?;
        let active_bus = preference
            .select_source(&sources)
            .map(|s| s.bus_name.clone());

        on_sources_changed(sources, active_bus.clone());

        let on_update = Arc::new(on_update);
        let on_sources_changed = Arc::new(on_sources_changed);

        tokio::spawn(async move {
            run_loop(
                connection,
                active_bus,
                preference,
                on_update,
                on_sources_changed,
            )
            .await;
        });

        Ok(())
    }
}

/// Main observer loop: follow the active player, rediscover when it
/// goes away.
async fn run_loop<F, G>(
    connection: Connection,
    mut active_bus: Option<String>,
    preference: SourcePreference,
    on_update: Arc<F>,
    on_sources_changed: Arc<G>,
) where
    F: Fn(MediaSnapshot) + Send + Sync + 'static,
    G: Fn(Vec<PlayerSource>, Option<String>) + Send + Sync + 'static,
{
    loop {
        let current_bus = active_bus.clone();

        if let Some(bus_name) = current_bus {
            info!("Observing player: {}", bus_name);

            match run_player_session(&connection, &bus_name, &on_update).await {
                Ok(()) => info!("Player session ended normally"),
                Err(e) => warn!("Player session error: {}", e),
            }

            // Player disconnected - try to find a replacement
            tokio::time::sleep(RECONNECT_DELAY).await;
            if let Ok(sources) = discover_sources(&connection).await {
                active_bus = preference
                    .select_source(&sources)
                    .map(|s| s.bus_name.clone());
                on_sources_changed(sources, active_bus.clone());
            }
        } else {
            // No player - wait and poll
            tokio::time::sleep(DISCOVERY_POLL).await;
            if let Ok(sources) = discover_sources(&connection).await {
                active_bus = preference
                    .select_source(&sources)
                    .map(|s| s.bus_name.clone());
                if active_bus.is_some() {
                    on_sources_changed(sources, active_bus.clone());
                }
            }
        }
    }
}

/// Observe one specific player until it stops responding.
async fn run_player_session<F>(
    connection: &Connection,
    bus_name: &str,
    on_update: &Arc<F>,
) -> Result<(), MprisError>
where
    F: Fn(MediaSnapshot) + Send + Sync + 'static,
{
    let proxy = MprisPlayerProxy::builder(connection)
        .destination(bus_name)?
        .build()
        .await?;

    // Property change signals, generated by zbus from #[zbus(property)]
    let mut status_stream = proxy.receive_playback_status_changed().await;
    let mut metadata_stream = proxy.receive_metadata_changed().await;

    // Initial state
    fetch_and_send(bus_name, &proxy, on_update).await;

    loop {
        tokio::select! {
            Some(_) = status_stream.next() => {
                debug!("PlaybackStatus changed signal received");
                fetch_and_send(bus_name, &proxy, on_update).await;
            }

            Some(_) = metadata_stream.next() => {
                debug!("Metadata changed signal received");
                fetch_and_send(bus_name, &proxy, on_update).await;
            }

            // Check periodically that the player still exists
            _ = tokio::time::sleep(LIVENESS_PROBE) => {
                if proxy.playback_status().await.is_err() {
                    warn!("Player {} no longer responding", bus_name);
                    return Err(MprisError::Disconnected);
                }
            }
        }
    }
}

/// Fetch all properties fresh and deliver one snapshot.
async fn fetch_and_send<F>(bus_name: &str, proxy: &MprisPlayerProxy<'_>, on_update: &Arc<F>)
where
    F: Fn(MediaSnapshot) + Send + Sync + 'static,
{
    let metadata = proxy.metadata().await.unwrap_or_default();
    let status = proxy.playback_status().await.ok();

    debug!(
        "Fetched state: status={:?}, {} metadata keys",
        status,
        metadata.len()
    );

    on_update(MediaSnapshot {
        attributes: bag_from_metadata(&metadata),
        transport: status.as_deref().and_then(transport_from_status),
        source_name: PlayerSource::extract_short_name(bus_name),
        source_bus_name: bus_name.to_string(),
    });
}

/// Discover all MPRIS players on the session bus.
async fn discover_sources(connection: &Connection) -> Result<Vec<PlayerSource>, MprisError> {
    let dbus_proxy = zbus::fdo::DBusProxy::new(connection).await?;
    let names = dbus_proxy.list_names().await?;

    let mut sources = Vec::new();

    for name in names.iter().filter(|n| n.starts_with(MPRIS_PREFIX)) {
        let bus_name = name.to_string();
        let short_name = PlayerSource::extract_short_name(&bus_name);

        // The identity is best-effort; fall back to the short name
        let identity = match MprisRootProxy::builder(connection)
            .destination(bus_name.as_str())?
            .build()
            .await
        {
            Ok(proxy) => proxy
                .identity()
                .await
                .unwrap_or_else(|_| short_name.clone()),
            Err(_) => short_name.clone(),
        };

        sources.push(PlayerSource {
            bus_name,
            identity,
            short_name,
        });
    }

    // Deterministic selection across discovery rounds
    sources.sort_by(|a, b| a.short_name.cmp(&b.short_name));

    Ok(sources)
}
