//! Media session monitoring service.
//!
//! Runs the MPRIS observer on a dedicated thread and feeds every
//! snapshot through the normalization engine onto the event bus.

use crate::config::BridgeConfig;
use crate::event_bus::{self, BridgeEvent, MediaUpdate};
use log::{error, info, warn};
use std::time::Duration;
use trackpost_core::{PlaybackState, normalize};
use trackpost_mpris::{MediaSnapshot, MprisClient, PlayerSource, SourcePreference};

pub fn start(config: BridgeConfig) {
    std::thread::Builder::new()
        .name("media-monitor".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime for media monitor: {}", e);
                    return;
                }
            };
            rt.block_on(run_media_loop(config));
        })
        .expect("Failed to spawn media-monitor thread");
}

async fn run_media_loop(config: BridgeConfig) {
    info!("Starting MPRIS observer");

    let preference = SourcePreference::new(config.favorite_player.clone());
    let normalizer = config.normalizer.clone();

    let on_update = move |snapshot: MediaSnapshot| {
        let state = PlaybackState::from_transport(snapshot.transport);
        let document = normalize(&normalizer, &snapshot.attributes);
        event_bus::send_media(MediaUpdate {
            state,
            document,
            source_name: snapshot.source_name,
        });
    };

    let on_sources_changed = |sources: Vec<PlayerSource>, active: Option<String>| {
        event_bus::send(BridgeEvent::SourcesChanged {
            active,
            sources: sources.into_iter().map(|s| s.short_name).collect(),
        });
    };

    loop {
        match MprisClient::start(
            preference.clone(),
            on_update.clone(),
            on_sources_changed,
        )
        .await
        {
            Ok(()) => {
                info!("MPRIS observer started");

                // The observer loop runs in its own spawned task
                loop {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
            }
            Err(e) => {
                warn!("Failed to start MPRIS observer: {}. Retrying in 2s...", e);
                event_bus::send(BridgeEvent::ObserverDown);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
