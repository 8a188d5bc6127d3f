//! The persisted progress record and the stores it lives in.
//!
//! Loading never fails: missing or unreadable payloads fall back to defaults.
//! Saving is best-effort and only logs on failure.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::stage::{character, Difficulty, CHARACTERS, STAGES, STAGE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSaveRecord")]
pub struct SaveRecord {
    /// Distance accumulated across every run; drives character unlocks.
    pub lifetime_distance: u64,
    /// Best final score per stage, indexed like [`STAGES`].
    pub high_scores: [u32; STAGE_COUNT],
    /// Ids of stages cleared at least once.
    pub cleared_stages: BTreeSet<u8>,
    pub selected_character: String,
    /// Stage ids whose badge has been earned.
    pub badges: BTreeSet<u8>,
    pub coins: u64,
    pub last_difficulty: usize,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            lifetime_distance: 0,
            high_scores: [0; STAGE_COUNT],
            cleared_stages: BTreeSet::new(),
            selected_character: default_character(),
            badges: BTreeSet::new(),
            coins: 0,
            last_difficulty: Difficulty::default().index(),
        }
    }
}

/// The payload as written to disk, before validation.
#[derive(Debug, Deserialize)]
struct RawSaveRecord {
    #[serde(default)]
    lifetime_distance: u64,
    #[serde(default = "default_high_scores")]
    high_scores: Vec<u32>,
    #[serde(default)]
    cleared_stages: BTreeSet<u8>,
    #[serde(default = "default_character")]
    selected_character: String,
    #[serde(default)]
    badges: BTreeSet<u8>,
    #[serde(default)]
    coins: u64,
    #[serde(default)]
    last_difficulty: Option<usize>,
}

fn default_high_scores() -> Vec<u32> {
    vec![0; STAGE_COUNT]
}

fn default_character() -> String {
    CHARACTERS[0].id.to_string()
}

fn is_stage_id(id: &u8) -> bool {
    STAGES.iter().any(|s| s.id == *id)
}

impl TryFrom<RawSaveRecord> for SaveRecord {
    type Error = PersistenceError;

    fn try_from(raw: RawSaveRecord) -> Result<Self, Self::Error> {
        let found = raw.high_scores.len();
        let high_scores: [u32; STAGE_COUNT] = raw
            .high_scores
            .try_into()
            .map_err(|_| PersistenceError::ShapeMismatch {
                expected: STAGE_COUNT,
                found,
            })?;

        // Unknown ids are dropped rather than rejected
        let selected_character = if character(&raw.selected_character).is_some() {
            raw.selected_character
        } else {
            default_character()
        };
        let last_difficulty = raw
            .last_difficulty
            .filter(|&i| i < Difficulty::ALL.len())
            .unwrap_or_else(|| Difficulty::default().index());

        Ok(Self {
            lifetime_distance: raw.lifetime_distance,
            high_scores,
            cleared_stages: raw.cleared_stages.into_iter().filter(is_stage_id).collect(),
            selected_character,
            badges: raw.badges.into_iter().filter(is_stage_id).collect(),
            coins: raw.coins,
            last_difficulty,
        })
    }
}

impl SaveRecord {
    /// Stage `index` is playable once the stage before it has been cleared. The first is always open.
    pub fn is_unlocked(&self, index: usize) -> bool {
        match index {
            0 => true,
            i if i < STAGE_COUNT => self.cleared_stages.contains(&STAGES[i - 1].id),
            _ => false,
        }
    }

    pub fn is_cleared(&self, index: usize) -> bool {
        STAGES.get(index).is_some_and(|s| self.cleared_stages.contains(&s.id))
    }

    pub fn best_score(&self, index: usize) -> u32 {
        self.high_scores.get(index).copied().unwrap_or(0)
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_index(self.last_difficulty)
    }

    /// Records the final score if it beats the stage's best. Returns whether it did.
    pub fn submit_score(&mut self, index: usize, score: u32) -> bool {
        match self.high_scores.get_mut(index) {
            Some(best) if score > *best => {
                *best = score;
                true
            }
            _ => false,
        }
    }

    /// Adds a finished run's distance and coins to the lifetime totals.
    pub fn accumulate(&mut self, distance: f32, coins: u32) {
        self.lifetime_distance = self.lifetime_distance.saturating_add(distance.max(0.0).floor() as u64);
        self.coins = self.coins.saturating_add(u64::from(coins));
    }

    /// Applies a stage clear: unlocks the next stage, awards the badge and submits the score.
    ///
    /// # Returns
    /// Whether the score was a new best.
    pub fn record_clear(&mut self, index: usize, score: u32, distance: f32, coins: u32) -> bool {
        if let Some(stage) = STAGES.get(index) {
            self.cleared_stages.insert(stage.id);
            self.badges.insert(stage.id);
        }
        self.accumulate(distance, coins);
        self.submit_score(index, score)
    }

    /// Applies a game over. Progress and unlocks are untouched.
    pub fn record_game_over(&mut self, index: usize, score: u32, distance: f32, coins: u32) -> bool {
        self.accumulate(distance, coins);
        self.submit_score(index, score)
    }
}

/// A place to keep the serialized save record.
pub trait SaveStore {
    /// Reads the raw payload. `Ok(None)` means nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, payload: &str) -> Result<(), PersistenceError>;

    /// Loads the record, falling back to defaults on any failure.
    fn load(&self) -> SaveRecord {
        let payload = match self.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No save record found, starting fresh");
                return SaveRecord::default();
            }
            Err(error) => {
                warn!(%error, "Failed to read save record, using defaults");
                return SaveRecord::default();
            }
        };

        match serde_json::from_str::<SaveRecord>(&payload) {
            Ok(record) => record,
            Err(error) => {
                warn!(%error, "Discarding unreadable save record");
                SaveRecord::default()
            }
        }
    }

    /// Persists the record. Failures are logged and otherwise ignored.
    fn save(&mut self, record: &SaveRecord) {
        let result = serde_json::to_string(record)
            .map_err(PersistenceError::from)
            .and_then(|payload| self.write(&payload));
        match result {
            Ok(()) => debug!(lifetime_distance = record.lifetime_distance, "Save record written"),
            Err(error) => warn!(%error, "Failed to write save record"),
        }
    }
}

/// Stores the record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), PersistenceError> {
        // Write beside the target and rename so a crash never leaves half a record
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// Keeps the payload in memory. Used by the headless runner and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub payload: Option<String>,
    /// Makes every write fail, to exercise best-effort saving.
    pub fail_writes: bool,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(std::io::Error::other("writes disabled").into());
        }
        self.payload = Some(payload.to_string());
        self.writes += 1;
        Ok(())
    }
}
