//! Rating decoding.
//!
//! Sessions report ratings in several styles (stars, heart, thumbs,
//! percentage) plus an "is rated" flag. Decoding is total: every
//! combination maps to exactly one published string.

/// Star-rating scale. The code doubles as the maximum star count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarScale {
    Three,
    Four,
    Five,
}

impl StarScale {
    pub fn code(self) -> u8 {
        match self {
            StarScale::Three => 3,
            StarScale::Four => 4,
            StarScale::Five => 5,
        }
    }
}

/// A media item rating.
#[derive(Clone, Debug, PartialEq)]
pub enum Rating {
    /// The session's "is rated" flag was off.
    Unrated,
    /// Rated, but with no declared rating style.
    NotRated,
    /// Rated on a 3/4/5-star scale. The star value may be fractional.
    Stars { scale: StarScale, stars: f64 },
    Heart { liked: bool },
    Thumbs { up: bool },
    Percentage { percent: f64 },
    /// Rated with a style this engine does not recognize.
    Other,
}

impl Rating {
    /// Decode to the published string form.
    ///
    /// Star values lose trailing fractional zeros: 4.0 prints as "4",
    /// 4.5 stays "4.5".
    pub fn decode(&self) -> String {
        match self {
            Rating::Unrated => "unrated".to_string(),
            Rating::NotRated => "not_rated".to_string(),
            Rating::Stars { scale, stars } => format!("{} / {}", stars, scale.code()),
            Rating::Heart { liked: true } => "liked".to_string(),
            Rating::Heart { liked: false } => "unliked".to_string(),
            Rating::Thumbs { up: true } => "thumb-up".to_string(),
            Rating::Thumbs { up: false } => "thumb-down".to_string(),
            Rating::Percentage { percent } => format!("{}%", percent),
            Rating::Other => "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_table_is_total() {
        assert_eq!(Rating::Unrated.decode(), "unrated");
        assert_eq!(Rating::NotRated.decode(), "not_rated");
        assert_eq!(Rating::Heart { liked: true }.decode(), "liked");
        assert_eq!(Rating::Heart { liked: false }.decode(), "unliked");
        assert_eq!(Rating::Thumbs { up: true }.decode(), "thumb-up");
        assert_eq!(Rating::Thumbs { up: false }.decode(), "thumb-down");
        assert_eq!(Rating::Percentage { percent: 85.0 }.decode(), "85%");
        assert_eq!(Rating::Other.decode(), "unknown");
    }

    #[test]
    fn star_values_lose_trailing_zeros() {
        assert_eq!(
            Rating::Stars {
                scale: StarScale::Five,
                stars: 4.0
            }
            .decode(),
            "4 / 5"
        );
        assert_eq!(
            Rating::Stars {
                scale: StarScale::Five,
                stars: 4.5
            }
            .decode(),
            "4.5 / 5"
        );
        assert_eq!(
            Rating::Stars {
                scale: StarScale::Three,
                stars: 2.0
            }
            .decode(),
            "2 / 3"
        );
        assert_eq!(
            Rating::Stars {
                scale: StarScale::Four,
                stars: 0.5
            }
            .decode(),
            "0.5 / 4"
        );
    }
}
