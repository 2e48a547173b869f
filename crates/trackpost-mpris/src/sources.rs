//! Player discovery metadata and source selection.

use serde::{Deserialize, Serialize};

/// A discovered MPRIS player
#[derive(Clone, Debug)]
pub struct PlayerSource {
    /// Full D-Bus name, e.g. "org.mpris.MediaPlayer2.spotify"
    pub bus_name: String,
    /// Identity reported by the player, e.g. "Spotify"
    pub identity: String,
    /// Short name extracted from the bus name, e.g. "spotify"
    pub short_name: String,
}

impl PlayerSource {
    /// Extract short name from full bus name
    /// "org.mpris.MediaPlayer2.spotify" -> "spotify"
    /// "org.mpris.MediaPlayer2.firefox.instance_1_234" -> "firefox"
    pub fn extract_short_name(bus_name: &str) -> String {
        bus_name
            .strip_prefix("org.mpris.MediaPlayer2.")
            .unwrap_or(bus_name)
            .split('.')
            .next()
            .unwrap_or(bus_name)
            .to_string()
    }
}

/// Which player to bridge when several are present. Persistence is
/// owned by the application config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourcePreference {
    /// Short name of the preferred player (e.g. "spotify")
    pub favorite: Option<String>,
}

impl SourcePreference {
    pub fn new(favorite: Option<String>) -> Self {
        Self { favorite }
    }

    /// Select the best source from the available list: the favorite if
    /// present, else the first one.
    pub fn select_source<'a>(&self, sources: &'a [PlayerSource]) -> Option<&'a PlayerSource> {
        if let Some(fav) = &self.favorite {
            if let Some(src) = sources.iter().find(|s| &s.short_name == fav) {
                return Some(src);
            }
        }
        sources.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(short_name: &str) -> PlayerSource {
        PlayerSource {
            bus_name: format!("org.mpris.MediaPlayer2.{}", short_name),
            identity: short_name.to_string(),
            short_name: short_name.to_string(),
        }
    }

    #[test]
    fn short_name_extraction() {
        assert_eq!(
            PlayerSource::extract_short_name("org.mpris.MediaPlayer2.spotify"),
            "spotify"
        );
        assert_eq!(
            PlayerSource::extract_short_name("org.mpris.MediaPlayer2.firefox.instance_1_234"),
            "firefox"
        );
        assert_eq!(PlayerSource::extract_short_name("weird"), "weird");
    }

    #[test]
    fn favorite_wins_when_available() {
        let sources = [source("firefox"), source("spotify")];
        let preference = SourcePreference::new(Some("spotify".to_string()));
        assert_eq!(
            preference.select_source(&sources).unwrap().short_name,
            "spotify"
        );
    }

    #[test]
    fn falls_back_to_first_source() {
        let sources = [source("firefox"), source("spotify")];
        let preference = SourcePreference::new(Some("vlc".to_string()));
        assert_eq!(
            preference.select_source(&sources).unwrap().short_name,
            "firefox"
        );
        assert!(preference.select_source(&[]).is_none());
    }
}
