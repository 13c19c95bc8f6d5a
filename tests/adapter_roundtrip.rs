//! Adapter Round-Trip Tests
//!
//! Tests for the persistence contract:
//! - Serialize then deserialize restores equal record values
//! - A shared adapter moves records between tables
//! - Missing backing files load as empty snapshots
//! - Sheet parsing reports the failing line

use serde::{Deserialize, Serialize};
use tabledb::adapter::{shared, AdapterError, FieldMap, JsonFileAdapter, MemoryAdapter, SheetAdapter};
use tabledb::table::Table;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Player {
    name: String,
    score: i64,
}

fn player(name: &str, score: i64) -> Player {
    Player {
        name: name.to_string(),
        score,
    }
}

fn seeded_table() -> Table<Player> {
    let mut table = Table::named("players");
    table.add_record(player("Alice", 100));
    table.add_record(player("Bob", 250));
    table
}

fn player_fields() -> FieldMap<Player> {
    FieldMap::<Player>::new()
        .column(
            "name",
            |p| p.name.clone(),
            |p, cell| {
                p.name = cell.to_string();
                Ok(())
            },
        )
        .column(
            "score",
            |p| p.score.to_string(),
            |p, cell| {
                p.score = cell.parse().map_err(|_| format!("'{cell}' is not an integer"))?;
                Ok(())
            },
        )
}

// =============================================================================
// Shared Adapter
// =============================================================================

/// One adapter handle carries a snapshot from one table to another.
#[test]
fn test_shared_adapter_moves_snapshot() {
    let handle = shared(MemoryAdapter::new());

    let source = seeded_table().with_adapter(handle.clone());
    source.serialize().unwrap();

    let mut sink: Table<Player> = Table::named("players").with_adapter(handle);
    sink.initialize().unwrap();

    assert_eq!(sink.records(), source.records());
}

/// Deserialize replaces contents wholesale, not additively.
#[test]
fn test_deserialize_replaces_not_appends() {
    let adapter = MemoryAdapter::with_records(vec![player("Alice", 100)]);
    let mut table = seeded_table().with_adapter(shared(adapter));

    table.deserialize().unwrap();

    assert_eq!(table.records(), &[player("Alice", 100)]);
}

/// Indexes built before a load are rebuilt against the loaded records.
#[test]
fn test_initialize_resets_indexes() {
    let adapter = MemoryAdapter::with_records(vec![player("Dana", 40)]);
    let mut table = seeded_table().with_adapter(shared(adapter));
    table.create_index(|p: &Player| p.name.clone(), "name");

    table.initialize().unwrap();

    let hits = table.get_by_index_named("name", |p: &Player| p.name.clone(), "Dana");
    assert_eq!(hits.len(), 1);
    let hits = table.get_by_index_named("name", |p: &Player| p.name.clone(), "Alice");
    assert!(hits.is_empty());
}

// =============================================================================
// JSON File Adapter
// =============================================================================

#[test]
fn test_json_file_roundtrip_restores_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");

    let source = seeded_table().with_adapter(shared(JsonFileAdapter::new(&path)));
    source.serialize().unwrap();

    let mut restored: Table<Player> =
        Table::named("players").with_adapter(shared(JsonFileAdapter::new(&path)));
    restored.initialize().unwrap();

    assert_eq!(restored.records(), source.records());
}

#[test]
fn test_json_missing_file_initializes_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_written.json");

    let mut table: Table<Player> =
        Table::named("players").with_adapter(shared(JsonFileAdapter::new(&path)));
    table.initialize().unwrap();

    assert!(table.is_empty());
}

// =============================================================================
// Sheet Adapter
// =============================================================================

#[test]
fn test_sheet_roundtrip_restores_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.tsv");

    let source = seeded_table().with_adapter(shared(SheetAdapter::new(&path, player_fields())));
    source.serialize().unwrap();

    let mut restored: Table<Player> =
        Table::named("players").with_adapter(shared(SheetAdapter::new(&path, player_fields())));
    restored.initialize().unwrap();

    assert_eq!(restored.records(), source.records());
}

#[test]
fn test_sheet_parse_failure_names_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.tsv");
    std::fs::write(&path, "name\tscore\nAlice\t100\nBob\toops\n").unwrap();

    let mut table: Table<Player> =
        Table::named("players").with_adapter(shared(SheetAdapter::new(&path, player_fields())));

    match table.initialize() {
        Err(AdapterError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}
