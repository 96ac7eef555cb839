//! Game economy engine: the single owner of `GameState`.

pub mod catalog;
pub mod logic;
pub mod save;
pub mod state;

mod simulator;

use std::collections::BTreeMap;

use thiserror::Error;

use catalog::AchievementDef;
use state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("unknown upgrade `{0}`")]
    InvalidUpgrade(String),
}

/// Holds the authoritative `GameState` and exposes every legal transition on it.
///
/// Other components only ever see `&GameState` through [`Engine::state`].
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
}

impl Engine {
    pub fn new(now_ms: f64) -> Self {
        Self {
            state: GameState::new(now_ms),
        }
    }

    /// Adopt a rehydrated snapshot. Derived values and milestones are
    /// recomputed rather than trusted.
    pub fn from_snapshot(mut state: GameState) -> Self {
        logic::recalculate(&mut state);
        logic::advance_milestones(&mut state);
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn click(&mut self) {
        logic::click(&mut self.state);
    }

    pub fn tick(&mut self, delta_seconds: f64) {
        logic::tick(&mut self.state, delta_seconds);
    }

    pub fn sync_play_time(&mut self, now_ms: f64) {
        logic::sync_play_time(&mut self.state, now_ms);
    }

    /// `Ok(false)` means the purchase was declined for lack of funds.
    pub fn purchase_upgrade(&mut self, upgrade_id: &str) -> Result<bool, EconomyError> {
        logic::purchase_upgrade(&mut self.state, upgrade_id)
    }

    pub fn evaluate_achievements(&mut self) -> Vec<&'static AchievementDef> {
        logic::evaluate_achievements(&mut self.state)
    }

    /// Throw away all progress and start over at `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.state = GameState::new(now_ms);
    }

    pub fn add_bonus(&mut self, amount: f64) {
        logic::add_bonus(&mut self.state, amount);
    }

    pub fn set_player_name(&mut self, name: &str) {
        logic::set_player_name(&mut self.state, name);
    }

    pub fn set_wallet(&mut self, address: Option<String>) {
        logic::set_wallet(&mut self.state, address);
    }

    pub fn record_submission(&mut self, now_ms: f64) {
        self.state.last_submission_ms = Some(now_ms);
    }

    pub fn cost_of(&self, upgrade_id: &str) -> Result<f64, EconomyError> {
        logic::cost_of(&self.state, upgrade_id)
    }

    pub fn can_afford(&self, upgrade_id: &str) -> Result<bool, EconomyError> {
        Ok(self.state.balance >= self.cost_of(upgrade_id)?)
    }

    pub fn milestone_progress(&self) -> f64 {
        logic::milestone_progress(&self.state)
    }

    pub fn click_power_of(upgrades: &BTreeMap<String, u32>) -> f64 {
        logic::click_power_of(upgrades)
    }

    pub fn per_second_of(upgrades: &BTreeMap<String, u32>) -> f64 {
        logic::per_second_of(upgrades)
    }
}
