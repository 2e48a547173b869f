//! The normalization pipeline: key normalization, value resolution,
//! title policy and document assembly.

use crate::bag::{Accessor, AttributeBag, AttributeValue, RESOLUTION_ORDER};
use crate::document::{DocumentBuilder, NormalizedDocument};
use crate::sanitize::sanitize_description;
use log::debug;
use serde::{Deserialize, Serialize};

/// Pipeline tuning, hoisted out of the code so the app config and
/// tests can vary it. The defaults match observed producer behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Prefixes stripped from the trailing key segment.
    pub strip_prefixes: Vec<String>,
    /// Normalized keys that carry a bare media identifier.
    pub identifier_keys: Vec<String>,
    /// Normalized keys that carry a millisecond duration.
    pub duration_keys: Vec<String>,
    /// Upper bound for the sanitized description, ellipsis included.
    pub max_description_len: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_prefixes: vec!["metadata_key_".to_string(), "display_".to_string()],
            identifier_keys: vec!["media_id".to_string(), "trackid".to_string()],
            duration_keys: vec!["duration".to_string(), "length".to_string()],
            max_description_len: 80,
        }
    }
}

/// Lower-case `raw` and keep the trailing segment after the last
/// namespace separator.
fn short_key(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.rfind(['.', ':']) {
        Some(pos) => lower[pos + 1..].to_string(),
        None => lower,
    }
}

/// Outcome of resolving one attribute.
enum Resolved {
    Value(String),
    /// A duration key resolves to its millisecond value plus the
    /// derived `duration_minsecs` pair, fused into the same fragment.
    Duration { millis: String, minsecs: String },
}

impl NormalizerConfig {
    /// Normalize a raw namespaced key to its published short form.
    /// Idempotent; app-specific keys keep their trailing segment.
    pub fn normalize_key(&self, raw: &str) -> String {
        let mut key = short_key(raw);
        for prefix in &self.strip_prefixes {
            if let Some(stripped) = key.strip_prefix(prefix.as_str()) {
                key = stripped.to_string();
            }
        }
        key
    }

    fn is_duration_key(&self, normalized: &str) -> bool {
        self.duration_keys.iter().any(|k| k == normalized)
    }

    fn is_identifier_key(&self, normalized: &str) -> bool {
        self.identifier_keys.iter().any(|k| k == normalized)
    }

    /// A bag with no keys, or only a stuck media identifier, carries
    /// no usable information and short-circuits to the placeholder.
    fn is_degenerate(&self, bag: &AttributeBag) -> bool {
        match bag.len() {
            0 => true,
            1 => bag
                .iter()
                .next()
                .is_some_and(|(key, _)| self.is_identifier_key(&self.normalize_key(key))),
            _ => false,
        }
    }

    /// Resolve one attribute to its canonical string form, walking the
    /// accessors in [`RESOLUTION_ORDER`]. Falls back to the empty
    /// string when no representation exists.
    fn resolve_value(&self, normalized_key: &str, value: &AttributeValue) -> Resolved {
        for accessor in RESOLUTION_ORDER {
            match accessor {
                Accessor::Text => {
                    if let Some(text) = value.as_text() {
                        if !text.is_empty() {
                            return Resolved::Value(text.to_string());
                        }
                    }
                }
                Accessor::Rating => {
                    if let Some(rating) = value.as_rating() {
                        return Resolved::Value(rating.decode());
                    }
                }
                Accessor::RichText => {
                    if let Some(text) = value.as_rich_text() {
                        if !text.is_empty() {
                            return Resolved::Value(text.to_string());
                        }
                    }
                }
                Accessor::Number => {
                    if let Some(number) = value.as_number() {
                        // zero is the "absent" sentinel, never a real
                        // zero-length duration
                        if number != 0 {
                            if self.is_duration_key(normalized_key) {
                                return Resolved::Duration {
                                    millis: number.to_string(),
                                    minsecs: minsecs(number),
                                };
                            }
                            return Resolved::Value(number.to_string());
                        }
                    }
                }
            }
        }
        Resolved::Value(String::new())
    }

    /// Effective title: explicit title field, else display title, else
    /// the sanitized description standing in, else empty.
    fn effective_title(&self, bag: &AttributeBag, description: Option<&str>) -> String {
        for candidate in ["title", "display_title"] {
            for (raw_key, value) in bag.iter() {
                if value.as_image().is_some() || short_key(raw_key) != candidate {
                    continue;
                }
                if let Resolved::Value(text) = self.resolve_value(candidate, value) {
                    if !text.is_empty() {
                        return text;
                    }
                }
            }
        }
        description.unwrap_or_default().to_string()
    }
}

/// `mm:ss` derived from a millisecond duration, two digits each.
fn minsecs(millis: i64) -> String {
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1_000;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Normalize one attribute-bag snapshot into the published document.
///
/// Pure: the output is a function of the input bag (in its iteration
/// order) and the config, nothing else.
pub fn normalize(config: &NormalizerConfig, bag: &AttributeBag) -> NormalizedDocument {
    if config.is_degenerate(bag) {
        debug!("degenerate attribute bag ({} keys), using placeholder", bag.len());
        return NormalizedDocument::placeholder();
    }

    let description = bag
        .iter()
        .find(|(key, _)| config.normalize_key(key) == "description")
        .and_then(|(_, value)| value.as_text().or_else(|| value.as_rich_text()))
        .and_then(|text| sanitize_description(text, config.max_description_len));

    let mut builder = DocumentBuilder::new();
    builder.push("title", config.effective_title(bag, description.as_deref()));
    if let Some(desc) = &description {
        builder.push("meta_description", desc.clone());
    }

    for (raw_key, value) in bag.iter() {
        // binary payloads are too big for the bus and are dropped
        // entirely, whatever else the key exposes
        if value.as_image().is_some() {
            debug!("dropping binary value for key {}", raw_key);
            continue;
        }
        let key = config.normalize_key(raw_key);
        match config.resolve_value(&key, value) {
            Resolved::Value(text) => builder.push(key, text),
            Resolved::Duration { millis, minsecs } => {
                builder.push(key, millis);
                builder.push("duration_minsecs", minsecs);
            }
        }
    }

    builder.finish()
}
