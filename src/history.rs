//! Append-only history of completed games, persisted as one JSON value.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{deck::GameMode, error::GameError, game::GameCompleted};

/// Records shown per page in the history view.
pub const PAGE_SIZE: usize = 10;

/// One completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "gameMode")]
    pub game_mode: GameMode,
    #[serde(rename = "date")]
    pub completed_at: DateTime<Utc>,
}

impl From<GameCompleted> for HistoryRecord {
    fn from(event: GameCompleted) -> Self {
        Self {
            game_mode: event.mode,
            completed_at: event.completed_at,
        }
    }
}

/// Storage for the single serialized history value.
pub trait HistoryStore {
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, GameError>;
    fn write(&mut self, payload: &str) -> Result<(), GameError>;
}

/// History kept in one file, rewritten in full on each write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GameError::StorageRead(err)),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), GameError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(GameError::StorageWrite)?;
            }
        }

        // Write beside the target then rename so a failed write never
        // truncates existing history.
        let tmp = self.path.with_extension("json.tmp");
        let written = write_file(&tmp, payload).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(GameError::StorageWrite(err));
        }
        Ok(())
    }
}

fn write_file(path: &Path, payload: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(payload.as_bytes())?;
    file.sync_all()
}

/// In-process store, used when no file should be touched.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), GameError> {
        self.value = Some(payload.to_string());
        Ok(())
    }
}

pub struct HistoryRecorder {
    store: Box<dyn HistoryStore>,
}

impl HistoryRecorder {
    pub fn new(store: impl HistoryStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Load the persisted history. Missing, unreadable or corrupt storage
    /// yields an empty list; malformed entries are dropped.
    pub fn load(&self) -> Vec<HistoryRecord> {
        match self.store.read() {
            Ok(Some(payload)) => parse_history(&payload),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("history unavailable, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    /// Append `record` and persist the full list. Returns the new list.
    ///
    /// A corrupt stored value is replaced, but a store that cannot be read
    /// at all is an error so existing history is never overwritten blind.
    pub fn append(&mut self, record: HistoryRecord) -> Result<Vec<HistoryRecord>, GameError> {
        let mut history = match self.store.read()? {
            Some(payload) => parse_history(&payload),
            None => Vec::new(),
        };
        history.push(record);

        let payload = serde_json::to_string(&history)?;
        if let Err(err) = self.store.write(&payload) {
            error!("failed to persist history: {}", err);
            return Err(err);
        }

        info!(records = history.len(), "history saved");
        Ok(history)
    }
}

/// Parse a stored history value, keeping only well-formed entries.
pub fn parse_history(payload: &str) -> Vec<HistoryRecord> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("history is not a JSON list, starting empty: {}", err);
            return Vec::new();
        }
    };

    let total = entries.len();
    let records: Vec<HistoryRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        warn!(
            dropped = total - records.len(),
            kept = records.len(),
            "malformed history entries dropped"
        );
    }

    records
}

/// Aggregated counts over the history list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub total_games: usize,
    pub by_mode: [usize; 3],
    pub last_completed: Option<DateTime<Utc>>,
}

impl HistorySummary {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let mut summary = Self {
            total_games: records.len(),
            ..Self::default()
        };

        for record in records {
            if let Some(slot) = GameMode::ALL.iter().position(|&m| m == record.game_mode) {
                summary.by_mode[slot] += 1;
            }
            summary.last_completed = summary.last_completed.max(Some(record.completed_at));
        }

        summary
    }

    pub fn games_in_mode(&self, mode: GameMode) -> usize {
        GameMode::ALL
            .iter()
            .position(|&m| m == mode)
            .map(|slot| self.by_mode[slot])
            .unwrap_or(0)
    }
}

/// Number of pages needed to show `len` records; at least one.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Records on `page` (0-indexed).
pub fn page(records: &[HistoryRecord], page: usize) -> &[HistoryRecord] {
    let start = page * PAGE_SIZE;
    if start >= records.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(records.len());
    &records[start..end]
}

/// Write the plain-text history listing used by `--print-history`.
pub fn write_history(out: &mut impl Write, records: &[HistoryRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "no games played yet");
    }

    for record in records {
        writeln!(
            out,
            "Mode: {:>2}, Date: {}",
            u32::from(record.game_mode),
            record.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )?;
    }

    let summary = HistorySummary::from_records(records);
    writeln!(out, "total: {}", summary.total_games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(mode: GameMode, minute: u32) -> HistoryRecord {
        HistoryRecord {
            game_mode: mode,
            completed_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap(),
        }
    }

    struct UnreadableStore;

    impl HistoryStore for UnreadableStore {
        fn read(&self) -> Result<Option<String>, GameError> {
            Err(GameError::StorageRead(io::Error::other("disk gone")))
        }

        fn write(&mut self, _payload: &str) -> Result<(), GameError> {
            panic!("must not overwrite unreadable history");
        }
    }

    struct FullDiskStore;

    impl HistoryStore for FullDiskStore {
        fn read(&self) -> Result<Option<String>, GameError> {
            Ok(None)
        }

        fn write(&mut self, _payload: &str) -> Result<(), GameError> {
            Err(GameError::StorageWrite(io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_load_empty_store() {
        let recorder = HistoryRecorder::new(MemoryStore::new());
        assert!(recorder.load().is_empty());
    }

    #[test]
    fn test_append_then_load_preserves_order() {
        let mut recorder = HistoryRecorder::new(MemoryStore::new());

        recorder.append(record(GameMode::Four, 1)).unwrap();
        recorder.append(record(GameMode::Sixteen, 2)).unwrap();
        let returned = recorder.append(record(GameMode::ThirtyTwo, 3)).unwrap();

        let loaded = recorder.load();
        assert_eq!(loaded, returned);
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0], record(GameMode::Four, 1));
        assert_eq!(loaded.last(), Some(&record(GameMode::ThirtyTwo, 3)));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(record(GameMode::Sixteen, 5)).unwrap();
        assert_eq!(json["gameMode"], 16);
        assert!(json["date"].as_str().unwrap().starts_with("2025-03-01T12:05:00"));
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let recorder = HistoryRecorder::new(MemoryStore::with_value("{not json"));
        assert!(recorder.load().is_empty());

        let recorder = HistoryRecorder::new(MemoryStore::with_value(r#"{"gameMode": 4}"#));
        assert!(recorder.load().is_empty());
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let payload = r#"[
            {"gameMode": 4, "date": "2025-03-01T12:00:00Z"},
            {"gameMode": 7, "date": "2025-03-01T12:01:00Z"},
            {"gameMode": 16, "date": "01/03/2025 12:02:00"},
            {"date": "2025-03-01T12:03:00Z"},
            "garbage",
            {"gameMode": 32, "date": "2025-03-01T13:04:00+01:00"}
        ]"#;

        let records = parse_history(payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record(GameMode::Four, 0));
        assert_eq!(records[1], record(GameMode::ThirtyTwo, 4));
    }

    #[test]
    fn test_append_repairs_corrupt_history() {
        let mut recorder = HistoryRecorder::new(MemoryStore::with_value("null"));
        let history = recorder.append(record(GameMode::Four, 9)).unwrap();
        assert_eq!(history, vec![record(GameMode::Four, 9)]);
    }

    #[test]
    fn test_unreadable_store() {
        let mut recorder = HistoryRecorder::new(UnreadableStore);

        assert!(recorder.load().is_empty());
        let err = recorder.append(record(GameMode::Four, 0)).unwrap_err();
        assert!(matches!(err, GameError::StorageRead(_)));
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut recorder = HistoryRecorder::new(FullDiskStore);

        let err = recorder.append(record(GameMode::Four, 0)).unwrap_err();
        assert!(matches!(err, GameError::StorageWrite(_)));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut recorder = HistoryRecorder::new(JsonFileStore::new(&path));
        assert!(recorder.load().is_empty());

        recorder.append(record(GameMode::Sixteen, 10)).unwrap();
        recorder.append(record(GameMode::Four, 11)).unwrap();

        let reopened = HistoryRecorder::new(JsonFileStore::new(&path));
        let loaded = reopened.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1], record(GameMode::Four, 11));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_failed_file_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = JsonFileStore::new(&path);
        let err = store.write("[]").unwrap_err();

        assert!(matches!(err, GameError::StorageWrite(_)));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_summary_counts_modes() {
        let records = vec![
            record(GameMode::Four, 1),
            record(GameMode::Four, 3),
            record(GameMode::ThirtyTwo, 2),
        ];

        let summary = HistorySummary::from_records(&records);
        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.games_in_mode(GameMode::Four), 2);
        assert_eq!(summary.games_in_mode(GameMode::Sixteen), 0);
        assert_eq!(summary.games_in_mode(GameMode::ThirtyTwo), 1);
        assert_eq!(summary.last_completed, Some(record(GameMode::Four, 3).completed_at));
    }

    #[test]
    fn test_pagination() {
        let records: Vec<_> = (0..23).map(|m| record(GameMode::Four, m)).collect();

        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(records.len()), 3);
        assert_eq!(page(&records, 0).len(), 10);
        assert_eq!(page(&records, 2).len(), 3);
        assert!(page(&records, 3).is_empty());
    }

    #[test]
    fn test_write_history_listing() {
        let mut out = Vec::new();
        write_history(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "no games played yet\n");

        let records = vec![record(GameMode::Four, 1), record(GameMode::ThirtyTwo, 2)];
        let mut out = Vec::new();
        write_history(&mut out, &records).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Mode:  4, Date: "));
        assert!(lines[1].starts_with("Mode: 32, Date: "));
        assert_eq!(lines[2], "total: 2");
    }
}
