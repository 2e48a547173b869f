//! trackpost-core: attribute-bag normalization engine for media
//! session metadata.
//!
//! Two pure transformation paths:
//! - Transport state mapping (raw session state -> published state)
//! - Attribute normalization (metadata snapshot -> one JSON document)
//!
//! Everything in this crate is synchronous, total and side-effect
//! free; one call consumes one snapshot and returns immediately.

pub mod bag;
pub mod document;
pub mod normalize;
pub mod rating;
pub mod sanitize;
pub mod sensor;
pub mod state;

pub use bag::{Accessor, AttributeBag, AttributeValue, RESOLUTION_ORDER};
pub use document::{DocumentBuilder, NormalizedDocument};
pub use normalize::{NormalizerConfig, normalize};
pub use rating::{Rating, StarScale};
pub use sanitize::sanitize_description;
pub use sensor::SensorKind;
pub use state::{PlaybackState, RawTransportState};
