/// Top-eight score table with pluggable persistence.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const CAPACITY: usize = 8;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Serialization(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub level: u32,
    /// Seconds since the Unix epoch.
    pub recorded_at: u64,
}

// ── Backends ─────────────────────────────────────────────────────────────────

pub trait ScoreBackend: Send {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError>;
    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), StoreError>;
}

/// RON list on disk. A missing file reads as an empty table.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreBackend for FileBackend {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        ron::from_str(&text).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let text = ron::ser::to_string_pretty(&records, pretty)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    records: Vec<ScoreRecord>,
}

impl ScoreBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        self.records = records.to_vec();
        Ok(())
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

pub struct HighScoreStore {
    records: Vec<ScoreRecord>,
    backend: Box<dyn ScoreBackend>,
}

impl fmt::Debug for HighScoreStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighScoreStore")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl HighScoreStore {
    /// Load from `backend`. Unreadable data is logged and treated as empty.
    pub fn open(backend: Box<dyn ScoreBackend>) -> Self {
        let mut records = match backend.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not read high scores, starting empty");
                Vec::new()
            }
        };
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(CAPACITY);
        HighScoreStore { records, backend }
    }

    pub fn in_memory() -> Self {
        HighScoreStore::open(Box::new(MemoryBackend::default()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        HighScoreStore::open(Box::new(FileBackend::new(path)))
    }

    /// Insert and persist. Returns `true` if the score made the table.
    /// Ties keep the older record ahead.
    pub fn add_score(&mut self, score: u32, level: u32) -> bool {
        let record = ScoreRecord {
            score,
            level,
            recorded_at: unix_seconds(),
        };
        let pos = self.records.partition_point(|r| r.score >= score);
        if pos >= CAPACITY {
            return false;
        }
        self.records.insert(pos, record);
        self.records.truncate(CAPACITY);
        info!(score, level, rank = pos + 1, "high score recorded");
        self.persist();
        true
    }

    /// Would `score` make the table right now?
    pub fn qualifies(&self, score: u32) -> bool {
        self.records.len() < CAPACITY
            || self.records.last().map_or(true, |lowest| score > lowest.score)
    }

    pub fn list(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn best(&self) -> u32 {
        self.records.first().map_or(0, |r| r.score)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.backend.save(&self.records) {
            warn!(error = %e, "could not save high scores");
        }
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
