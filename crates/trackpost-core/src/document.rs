//! Normalized document assembly.
//!
//! One ordered builder, one centralized escaper. Well-formedness is
//! guaranteed by construction: every key and value passes through the
//! same escaping path, so no input can break the object syntax.

use std::fmt::{self, Write};

/// The serialized output artifact: always a valid JSON object string
/// mapping normalized keys to string values. Created fresh per call,
/// never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedDocument(String);

impl NormalizedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Minimal document published while a session has no usable
    /// metadata yet.
    pub fn placeholder() -> Self {
        let mut builder = DocumentBuilder::new();
        builder.push("title", "");
        builder.finish()
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered key/value pair accumulator.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    pairs: Vec<(String, String)>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. A key already present is ignored: when two raw
    /// keys collapse to the same normalized key, the first one wins.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.contains(&key) {
            return;
        }
        self.pairs.push((key, value.into()));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Serialize into the final document. Emission order is the push
    /// order.
    pub fn finish(self) -> NormalizedDocument {
        let mut out = String::with_capacity(self.pairs.len() * 24 + 2);
        out.push('{');
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            escape_into(&mut out, key);
            out.push(':');
            escape_into(&mut out, value);
        }
        out.push('}');
        NormalizedDocument(out)
    }
}

/// Write `text` as a quoted JSON string, escaping the quoting and
/// control characters.
fn escape_into(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // remaining control characters get the \u form
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
