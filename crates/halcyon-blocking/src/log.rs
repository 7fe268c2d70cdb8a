//! Content blocking log
//!
//! The tracking protection engine records, per page load, which origins
//! touched cookies and with what outcome. The log reaches us as a JSON
//! object mapping origin URLs to ordered `[stateBitmask, wasBlocked]` pairs;
//! it is decoded fresh every time the view opens.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::state::BlockingState;
use crate::Result;

/// One recorded observation for an origin.
///
/// `was_blocked` tells us whether the resource was actually blocked, which
/// it may not have been in case of an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(u32, bool)")]
pub struct LogEvent {
    pub state: BlockingState,
    pub was_blocked: bool,
}

impl LogEvent {
    pub fn new(bits: u32, was_blocked: bool) -> Self {
        Self {
            state: BlockingState::new(bits),
            was_blocked,
        }
    }
}

impl From<(u32, bool)> for LogEvent {
    fn from((bits, was_blocked): (u32, bool)) -> Self {
        Self::new(bits, was_blocked)
    }
}

/// All observations for one origin, in observation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingLogEntry {
    pub origin: String,
    pub events: Vec<LogEvent>,
}

/// The decoded per-page log.
///
/// Entries keep the insertion order of the JSON object's keys; the
/// classifier's output lists follow this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockingLog {
    entries: Vec<BlockingLogEntry>,
}

impl BlockingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the raw JSON log handed over by the page's runtime.
    /// Malformed JSON is not recovered here; the caller surfaces it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let log = serde_json::from_str(raw)?;
        Ok(log)
    }

    pub fn push(&mut self, origin: impl Into<String>, events: Vec<LogEvent>) {
        self.entries.push(BlockingLogEntry {
            origin: origin.into(),
            events,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockingLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for BlockingLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LogVisitor;

        impl<'de> Visitor<'de> for LogVisitor {
            type Value = BlockingLog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from origin to a list of [state, blocked] pairs")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<BlockingLogEntry> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((origin, events)) = map.next_entry::<String, Vec<LogEvent>>()? {
                    // A duplicated key keeps its first position but the last
                    // value, the way JSON object parsing resolves duplicates.
                    if let Some(existing) = entries.iter_mut().find(|e| e.origin == origin) {
                        existing.events = events;
                    } else {
                        entries.push(BlockingLogEntry { origin, events });
                    }
                }
                Ok(BlockingLog { entries })
            }
        }

        deserializer.deserialize_map(LogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockingError;

    #[test]
    fn test_decode_preserves_key_order() {
        let raw = r#"{
            "https://c.example": [[32768, false]],
            "https://a.example": [[32768, false]],
            "https://b.example": [[32768, true]]
        }"#;

        let log = BlockingLog::from_json(raw).unwrap();
        let origins: Vec<&str> = log.iter().map(|e| e.origin.as_str()).collect();
        assert_eq!(
            origins,
            ["https://c.example", "https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_decode_events() {
        let raw = r#"{"https://tracker.example": [[32768, false], [1073741824, true]]}"#;

        let log = BlockingLog::from_json(raw).unwrap();
        assert_eq!(log.len(), 1);
        let entry = log.iter().next().unwrap();
        assert_eq!(entry.events.len(), 2);
        assert!(entry.events[0].state.cookies_detected());
        assert!(!entry.events[0].was_blocked);
        assert!(entry.events[1].state.cookies_blocked());
        assert!(entry.events[1].was_blocked);
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let raw = r#"{
            "https://tracker.example": [[32768, false]],
            "https://other.example": [[32768, false]],
            "https://tracker.example": [[32768, true]]
        }"#;

        let log = BlockingLog::from_json(raw).unwrap();
        assert_eq!(log.len(), 2);
        let entry = log.iter().next().unwrap();
        assert_eq!(entry.origin, "https://tracker.example");
        assert_eq!(entry.events, [LogEvent::new(32768, true)]);
    }

    #[test]
    fn test_malformed_json_propagates() {
        let err = BlockingLog::from_json("{not json").unwrap_err();
        assert!(matches!(err, BlockingError::Log(_)));

        // A log must be a map, not an array.
        let err = BlockingLog::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, BlockingError::Log(_)));
    }
}
