//! Hub discovery configuration payloads.
//!
//! Follows the Home Assistant MQTT discovery convention: one retained
//! configuration document per sensor, published once at startup.

use crate::config::{BridgeConfig, DEVICE_NAME};
use serde_json::json;
use trackpost_core::SensorKind;

/// Topic the hub watches for one sensor's configuration.
pub fn configuration_topic(config: &BridgeConfig, sensor: SensorKind) -> String {
    format!(
        "homeassistant/sensor/{}/config",
        unique_id(config.device_id, sensor)
    )
}

fn unique_id(device_id: u32, sensor: SensorKind) -> String {
    format!("{}_{}_{}", DEVICE_NAME, device_id, sensor.topic_suffix())
}

/// Build one sensor's discovery configuration payload.
pub fn configuration_payload(config: &BridgeConfig, sensor: SensorKind) -> String {
    let state_topic = config.sensor_topic(sensor);
    // The title sensor reads the `title` sub-field of the normalized
    // document; every other sensor publishes its whole value.
    let value_template = if sensor.extracts_title_field() {
        "{{value_json.title}}"
    } else {
        "{{value}}"
    };

    json!({
        "name": sensor.name(),
        "unique_id": unique_id(config.device_id, sensor),
        "icon": sensor.icon(),
        "state_topic": state_topic,
        "value_template": value_template,
        "json_attributes_template": "{{value_json|to_json}}",
        "json_attributes_topic": state_topic,
        "device": {
            "name": format!("{} {}", DEVICE_NAME, config.device_id),
            "manufacturer": std::env::consts::OS,
            "model": std::env::consts::ARCH,
            "identifiers": [format!("{}_{}", DEVICE_NAME, config.device_id)],
        },
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_sensor_extracts_the_title_field() {
        let config = BridgeConfig::default();
        let payload = configuration_payload(&config, SensorKind::MediaTitle);
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["name"], "Media Title");
        assert_eq!(json["value_template"], "{{value_json.title}}");
        assert_eq!(json["state_topic"], "trackpost/1/title");
        assert_eq!(json["json_attributes_topic"], "trackpost/1/title");
    }

    #[test]
    fn state_sensor_publishes_its_whole_value() {
        let config = BridgeConfig::default();
        let payload = configuration_payload(&config, SensorKind::PlaybackState);
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["name"], "Media State");
        assert_eq!(json["value_template"], "{{value}}");
        assert_eq!(json["state_topic"], "trackpost/1/state");
    }

    #[test]
    fn identifiers_embed_the_device_id() {
        let config = BridgeConfig {
            device_id: 4,
            ..BridgeConfig::default()
        };
        let payload = configuration_payload(&config, SensorKind::MediaTitle);
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["unique_id"], "trackpost_4_title");
        assert_eq!(json["device"]["name"], "trackpost 4");
        assert_eq!(json["device"]["identifiers"][0], "trackpost_4");
        assert_eq!(
            configuration_topic(&config, SensorKind::MediaTitle),
            "homeassistant/sensor/trackpost_4_title/config"
        );
    }
}
