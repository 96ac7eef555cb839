//! Stake Clicker save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current snapshot format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest snapshot that can still be read.
//!   Only bump it for breaking changes (a field changes meaning or goes away).
//!
//! Snapshots at or above `MIN_COMPATIBLE_VERSION` load with missing fields
//! filled from defaults. Derived values (`click_power`, `per_second`) are
//! never stored; the engine recomputes them on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog;
use super::state::{GameState, Milestones};

/// Snapshot format version. Bump when adding fields.
pub const SAVE_VERSION: u32 = 1;

/// Oldest readable version. Bump only on breaking changes.
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage key.
pub const STORAGE_KEY: &str = "stake_clicker_save";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("storage is not available")]
    Unavailable,
    #[error("could not serialize save: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("could not parse save: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("save version {saved} is older than the minimum supported {min}")]
    Incompatible { saved: u32, min: u32 },
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Where game snapshots live between sessions.
///
/// Failures are reported, never fatal: callers keep playing on in-memory state.
pub trait Persistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<GameState>, SaveError>;
    fn save(&mut self, state: &GameState) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// On-disk envelope.
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    balance: f64,
    total_earned: f64,
    total_clicks: u64,
    total_spent: f64,
    start_time_ms: f64,
    play_time: f64,
    upgrades: BTreeMap<String, u32>,
    /// Ids of unlocked achievements.
    achievements: Vec<String>,
    next_milestone: f64,
    player_name: String,
    wallet_address: Option<String>,
    last_submission_ms: Option<f64>,
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            balance: state.balance,
            total_earned: state.total_earned,
            total_clicks: state.total_clicks,
            total_spent: state.total_spent,
            start_time_ms: state.start_time_ms,
            play_time: state.play_time,
            upgrades: state
                .upgrades
                .iter()
                .filter(|&(_, &count)| count > 0)
                .map(|(id, &count)| (id.clone(), count))
                .collect(),
            achievements: state
                .achievements
                .iter()
                .filter(|&(_, &unlocked)| unlocked)
                .map(|(id, _)| id.clone())
                .collect(),
            next_milestone: state.next_milestone(),
            player_name: state.player_name.clone(),
            wallet_address: state.wallet_address.clone(),
            last_submission_ms: state.last_submission_ms,
        },
    }
}

/// Non-finite or negative numbers from a tampered snapshot become 0.
fn sanitize(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

/// Rebuild a state from a snapshot. Ids no longer in the catalog are dropped.
fn apply_save(save: GameSave) -> GameState {
    let mut state = GameState::new(sanitize(save.start_time_ms));
    state.balance = sanitize(save.balance);
    state.total_earned = sanitize(save.total_earned);
    state.total_clicks = save.total_clicks;
    state.total_spent = sanitize(save.total_spent);
    state.play_time = sanitize(save.play_time);

    state.upgrades = save
        .upgrades
        .into_iter()
        .filter(|(id, count)| *count > 0 && catalog::find_upgrade(id).is_some())
        .collect();
    state.achievements = save
        .achievements
        .into_iter()
        .filter(|id| catalog::find_achievement(id).is_some())
        .map(|id| (id, true))
        .collect();

    state.milestones = Milestones::restore(save.next_milestone);
    state.player_name = save.player_name;
    state.wallet_address = save.wallet_address.filter(|a| !a.is_empty());
    state.last_submission_ms = save.last_submission_ms.filter(|t| t.is_finite());
    state
}

/// Serialize a state to the versioned JSON snapshot.
pub fn encode(state: &GameState) -> Result<String, SaveError> {
    serde_json::to_string(&extract_save(state)).map_err(SaveError::Serialize)
}

/// Parse a versioned JSON snapshot.
pub fn decode(json: &str) -> Result<GameState, SaveError> {
    let data: SaveData = serde_json::from_str(json).map_err(SaveError::Parse)?;
    if data.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::Incompatible {
            saved: data.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    if data.version < SAVE_VERSION {
        crate::console::log(&format!(
            "migrating save (saved={}, current={})",
            data.version, SAVE_VERSION
        ));
    }
    Ok(apply_save(data.game))
}

/// Keeps the snapshot in memory. Used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Option<String>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw snapshot, as if written by an earlier session.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            fail_saves: false,
        }
    }

    /// Make every following `save` fail (simulates a full or blocked storage).
    pub fn set_failing(&mut self, failing: bool) {
        self.fail_saves = failing;
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl Persistence for MemoryStore {
    fn load(&mut self) -> Result<Option<GameState>, SaveError> {
        match &self.json {
            Some(json) => decode(json).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        if self.fail_saves {
            return Err(SaveError::Backend("memory store is read-only".into()));
        }
        self.json = Some(encode(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.json = None;
        Ok(())
    }
}

/// Browser localStorage under [`STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SaveError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Persistence for LocalStorage {
    fn load(&mut self) -> Result<Option<GameState>, SaveError> {
        let storage = Self::storage()?;
        let json = match storage.get_item(STORAGE_KEY) {
            Ok(Some(j)) => j,
            Ok(None) => return Ok(None),
            Err(e) => return Err(SaveError::Backend(format!("{e:?}"))),
        };
        match decode(&json) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // Corrupt or too old: drop it so the next session starts clean.
                let _ = storage.remove_item(STORAGE_KEY);
                Err(e)
            }
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        let json = encode(state)?;
        Self::storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| SaveError::Backend(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| SaveError::Backend(format!("{e:?}")))
    }
}
