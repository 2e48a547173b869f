//! Error types for trackpost-mpris

/// MPRIS observer errors
#[derive(Debug, thiserror::Error)]
pub enum MprisError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("D-Bus fdo error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    #[error("Player disconnected")]
    Disconnected,
}
