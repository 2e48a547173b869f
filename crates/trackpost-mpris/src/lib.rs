//! trackpost-mpris - MPRIS session observer
//!
//! Watches the active MPRIS player on the D-Bus session bus and
//! delivers one immutable metadata snapshot per media-state change:
//! - Single D-Bus connection, property signals as triggers only
//! - Full metadata map conversion (app-specific keys survive)
//! - Multi-player discovery with a favorite preference

pub mod client;
pub mod error;
pub mod metadata;
pub mod sources;

pub use client::{MediaSnapshot, MprisClient};
pub use error::MprisError;
pub use metadata::{bag_from_metadata, transport_from_status};
pub use sources::{PlayerSource, SourcePreference};
