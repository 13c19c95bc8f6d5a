//! Observability events for tabledb
//!
//! Typed names for everything the engine reports. Events are explicit
//! so call sites cannot drift into ad-hoc strings.

use std::fmt;

/// Observable events in the table engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Table lifecycle
    /// Table contents loaded through its adapter
    TableInitialized,
    /// Table registered with a catalog
    TableRegistered,
    /// Registration skipped: name already present (no-op)
    DuplicateTable,
    /// Table removed from a catalog
    TableRemoved,

    // Derived structures
    /// Named index built over the record store
    IndexCreated,

    // Conversions
    /// Duplicate key skipped while building a map view
    DuplicateKey,

    // Adapter round-trips
    /// Records externalized through the adapter
    SerializeComplete,
    /// Records loaded from the adapter
    DeserializeComplete,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TableInitialized => "TABLE_INITIALIZED",
            Event::TableRegistered => "TABLE_REGISTERED",
            Event::DuplicateTable => "DUPLICATE_TABLE",
            Event::TableRemoved => "TABLE_REMOVED",
            Event::IndexCreated => "INDEX_CREATED",
            Event::DuplicateKey => "DUPLICATE_KEY",
            Event::SerializeComplete => "SERIALIZE_COMPLETE",
            Event::DeserializeComplete => "DESERIALIZE_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::TableInitialized,
            Event::TableRegistered,
            Event::DuplicateTable,
            Event::TableRemoved,
            Event::IndexCreated,
            Event::DuplicateKey,
            Event::SerializeComplete,
            Event::DeserializeComplete,
        ];

        for event in events {
            let name = event.as_str();
            assert!(!name.is_empty());
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Event::DuplicateTable.to_string(), "DUPLICATE_TABLE");
    }
}
