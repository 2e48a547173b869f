//! Output boundary: the message-bus publisher.
//!
//! Topic addressing conventions live in the config; connection
//! lifecycle, retention and QoS are owned by the implementation
//! behind the trait. A broker-backed publisher plugs in here without
//! touching the engine.

use std::io::{self, Write};

/// Publisher errors.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Message-bus transport abstraction.
pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError>;
}

/// Line-oriented publisher: one `topic <TAB> payload` record per
/// publish, flushed immediately. Suitable for piping into an external
/// broker client.
pub struct LinePublisher<W: Write> {
    out: W,
}

impl LinePublisher<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LinePublisher<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Publisher for LinePublisher<W> {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        writeln!(self.out, "{}\t{}", topic, payload)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_tab_separated_lines() {
        let mut publisher = LinePublisher::new(Vec::new());
        publisher
            .publish("trackpost/1/state", "playing")
            .unwrap();
        publisher
            .publish("trackpost/1/title", "{\"title\":\"Song\"}")
            .unwrap();

        let written = String::from_utf8(publisher.out).unwrap();
        assert_eq!(
            written,
            "trackpost/1/state\tplaying\ntrackpost/1/title\t{\"title\":\"Song\"}\n"
        );
    }
}
