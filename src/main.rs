//! trackpost - republishes the active media session for automation hubs.
//!
//! Observes MPRIS players on the D-Bus session bus, normalizes their
//! metadata through the engine, and publishes a simplified playback
//! state plus one JSON metadata document per declared sensor.

mod config;
mod discovery;
mod event_bus;
mod publish;
mod services;

use config::BridgeConfig;
use event_bus::BridgeEvent;
use log::{debug, info, warn};
use publish::{LinePublisher, Publisher};
use tokio::sync::broadcast::error::RecvError;
use trackpost_core::SensorKind;

fn main() {
    env_logger::init();

    let config_path = BridgeConfig::default_path();
    let config = BridgeConfig::load(&config_path);
    info!(
        "Loaded config from {} (device {})",
        config_path.display(),
        config.device_id
    );

    let mut publisher = LinePublisher::stdout();

    // Announce the sensors before any state flows
    for sensor in SensorKind::ALL {
        let topic = discovery::configuration_topic(&config, sensor);
        let payload = discovery::configuration_payload(&config, sensor);
        if let Err(e) = publisher.publish(&topic, &payload) {
            warn!("Failed to publish discovery for {}: {}", sensor.name(), e);
        }
    }

    // Subscribe before the service starts so no update is missed
    let mut rx = event_bus::subscribe();
    services::media::start(config.clone());

    let state_topic = config.sensor_topic(SensorKind::PlaybackState);
    let title_topic = config.sensor_topic(SensorKind::MediaTitle);

    // Change detection: consecutive identical outputs are not republished
    let mut last_state: Option<String> = None;
    let mut last_document: Option<String> = None;

    loop {
        let event = match rx.blocking_recv() {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Publish loop lagged, skipped {} events", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        match event {
            BridgeEvent::Media(update) => {
                if let Some(state) = update.state {
                    let value = state.as_str().to_string();
                    if last_state.as_ref() != Some(&value) {
                        match publisher.publish(&state_topic, &value) {
                            Ok(()) => last_state = Some(value),
                            Err(e) => warn!("Failed to publish state: {}", e),
                        }
                    }
                }

                let document = update.document.as_str();
                if last_document.as_deref() != Some(document) {
                    match publisher.publish(&title_topic, document) {
                        Ok(()) => {
                            debug!("Published metadata from {}", update.source_name);
                            last_document = Some(document.to_string());
                        }
                        Err(e) => warn!("Failed to publish metadata: {}", e),
                    }
                }
            }
            BridgeEvent::SourcesChanged { active, sources } => {
                info!("Players: [{}], active: {:?}", sources.join(", "), active);
            }
            BridgeEvent::ObserverDown => {
                // Session gone entirely; publish nothing until it returns
                info!("Media session observer down");
            }
        }
    }
}
