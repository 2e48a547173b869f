//! Conversion from MPRIS D-Bus data to engine inputs.

use std::collections::HashMap;
use std::ops::Deref;
use trackpost_core::{AttributeBag, AttributeValue, Rating, RawTransportState};
use zbus::zvariant::{OwnedValue, Value};

/// Keys carrying a 0.0..=1.0 rating fraction on MPRIS players.
const RATING_KEYS: [&str; 2] = ["xesam:userRating", "xesam:autoRating"];

/// `mpris:length` arrives in microseconds; the engine's duration math
/// is millisecond-based, so it is converted at this boundary.
const LENGTH_KEY: &str = "mpris:length";

/// Map the MPRIS `PlaybackStatus` string to a raw transport code.
/// Anything unrecognized maps to an absent state so publication is
/// suppressed rather than guessed.
pub fn transport_from_status(status: &str) -> Option<RawTransportState> {
    match status {
        "Playing" => Some(RawTransportState::Playing),
        "Paused" => Some(RawTransportState::Paused),
        "Stopped" => Some(RawTransportState::Stopped),
        _ => None,
    }
}

/// Convert one `Metadata` property map into an attribute bag, keeping
/// the player's key namespacing intact. Keys are inserted in sorted
/// order: the D-Bus map has no stable ordering of its own, and the
/// engine's output must not churn between identical fetches.
pub fn bag_from_metadata(metadata: &HashMap<String, OwnedValue>) -> AttributeBag {
    let mut keys: Vec<&String> = metadata.keys().collect();
    keys.sort();

    let mut bag = AttributeBag::new();
    for key in keys {
        bag.insert(key.clone(), attribute_from_value(key, &metadata[key]));
    }
    bag
}

fn attribute_from_value(key: &str, value: &OwnedValue) -> AttributeValue {
    match value.deref() {
        Value::Str(s) => AttributeValue::text(s.as_str()),
        Value::ObjectPath(p) => AttributeValue::text(p.as_str()),
        Value::Bool(b) => AttributeValue::text(b.to_string()),
        Value::F64(f) => float_attribute(key, *f),
        Value::I64(n) => number_attribute(key, *n),
        Value::U64(n) => number_attribute(key, *n as i64),
        Value::I32(n) => number_attribute(key, *n as i64),
        Value::U32(n) => number_attribute(key, *n as i64),
        Value::Array(items) => array_attribute(items),
        _ => AttributeValue::default(),
    }
}

fn number_attribute(key: &str, value: i64) -> AttributeValue {
    if key == LENGTH_KEY {
        AttributeValue::number(value / 1000)
    } else {
        AttributeValue::number(value)
    }
}

fn float_attribute(key: &str, value: f64) -> AttributeValue {
    if RATING_KEYS.contains(&key) {
        AttributeValue::rating(Rating::Percentage {
            percent: (value * 100.0).round(),
        })
    } else {
        AttributeValue::text(value.to_string())
    }
}

fn array_attribute(items: &zbus::zvariant::Array) -> AttributeValue {
    let mut texts = Vec::new();
    let mut bytes = Vec::new();
    for item in items.iter() {
        match item {
            Value::Str(s) => texts.push(s.to_string()),
            Value::U8(b) => bytes.push(*b),
            _ => {}
        }
    }
    if !texts.is_empty() {
        AttributeValue::text(texts.join(", "))
    } else if !bytes.is_empty() {
        // binary artwork payload; the engine filters it out
        AttributeValue::image(bytes)
    } else {
        AttributeValue::default()
    }
}
