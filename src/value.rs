//! State Value Module
//!
//! Conversion between Rust primitives and the store's string representation,
//! including the fail-soft sentinel for each type.

/// A primitive value that can live in the external store.
///
/// Implementations define the wire encoding, the decoding rules, and the
/// sentinel returned by fail-soft reads when the key is missing, the store is
/// unreachable, or the stored bytes do not decode as `Self`.
pub trait StateValue: Clone + Send + Sync + 'static {
    /// Fail-soft default returned in place of a read or decode error.
    fn sentinel() -> Self;

    /// Wire representation written to the store.
    fn encode(&self) -> String;

    /// Parses the wire representation; `None` when the bytes do not decode.
    fn decode(raw: &str) -> Option<Self>;
}

impl StateValue for String {
    fn sentinel() -> Self {
        String::new()
    }

    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl StateValue for i64 {
    fn sentinel() -> Self {
        -1
    }

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl StateValue for f64 {
    fn sentinel() -> Self {
        -1.0
    }

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl StateValue for bool {
    fn sentinel() -> Self {
        false
    }

    /// Booleans are stored as `1` / `0`, matching what the store's other
    /// clients conventionally write.
    fn encode(&self) -> String {
        (if *self { "1" } else { "0" }).to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
            "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
            _ => None,
        }
    }
}
