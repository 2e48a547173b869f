//! Transport state mapping.

use std::fmt;

/// Raw transport codes as delivered by the session observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTransportState {
    None,
    Stopped,
    Paused,
    Playing,
    FastForwarding,
    Rewinding,
    Buffering,
    Error,
    Connecting,
    SkippingToPrevious,
    SkippingToNext,
    SkippingToQueueItem,
}

/// Simplified playback state published downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }

    /// Map a raw transport state to the published form, or `None` when
    /// the raw state is absent or transient and must not be reported.
    /// Buffering is deliberately not treated as playing: some players
    /// pre-buffer content before the user requests playback, which
    /// would produce false positives downstream.
    pub fn from_transport(raw: Option<RawTransportState>) -> Option<Self> {
        match raw? {
            RawTransportState::None | RawTransportState::Stopped | RawTransportState::Error => {
                Some(PlaybackState::Idle)
            }
            RawTransportState::Playing => Some(PlaybackState::Playing),
            RawTransportState::Paused => Some(PlaybackState::Paused),
            _ => None,
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
