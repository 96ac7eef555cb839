/// Stake Clicker game state definitions.

use std::collections::BTreeMap;

use super::catalog::MILESTONE_SEED;

/// Name used on the leaderboard until the player picks one.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous Staker";

/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 20;

/// Ever-growing ascending sequence of lifetime-earnings thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct Milestones {
    thresholds: Vec<f64>,
    /// Index into `thresholds` of the current target.
    index: usize,
}

impl Milestones {
    pub fn new() -> Self {
        Self {
            thresholds: MILESTONE_SEED.to_vec(),
            index: 0,
        }
    }

    /// Rebuild the sequence so that `next` is the current target.
    /// A value that is not on the sequence snaps up to the next threshold.
    pub fn restore(next: f64) -> Self {
        let mut m = Self::new();
        if !next.is_finite() {
            return m;
        }
        while m.last() < next {
            m.extend();
        }
        m.index = m
            .thresholds
            .iter()
            .position(|&t| t >= next)
            .unwrap_or(m.thresholds.len() - 1);
        m
    }

    /// The threshold currently being worked towards.
    pub fn next(&self) -> f64 {
        self.thresholds[self.index]
    }

    /// Every threshold generated so far.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Move to the following threshold, appending `last × 10` once the
    /// predefined ones run out.
    pub fn advance(&mut self) {
        if self.index + 1 >= self.thresholds.len() {
            self.extend();
        }
        self.index += 1;
    }

    fn last(&self) -> f64 {
        self.thresholds[self.thresholds.len() - 1]
    }

    fn extend(&mut self) {
        let next = self.last() * 10.0;
        self.thresholds.push(next);
    }
}

impl Default for Milestones {
    fn default() -> Self {
        Self::new()
    }
}

/// Full state of one staking session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Spendable stCSPR.
    pub balance: f64,
    /// Lifetime earnings (spending never reduces it).
    pub total_earned: f64,
    /// Manual clicks.
    pub total_clicks: u64,
    /// Sum of all upgrade costs paid.
    pub total_spent: f64,
    /// stCSPR per click. Derived from `upgrades`.
    pub click_power: f64,
    /// Passive stCSPR per second. Derived from `upgrades`.
    pub per_second: f64,
    /// Session start (ms since epoch).
    pub start_time_ms: f64,
    /// Seconds since `start_time_ms`.
    pub play_time: f64,
    /// Owned count per upgrade id.
    pub upgrades: BTreeMap<String, u32>,
    /// Unlock flag per achievement id.
    pub achievements: BTreeMap<String, bool>,
    pub milestones: Milestones,
    pub player_name: String,
    pub wallet_address: Option<String>,
    /// When the last score submission succeeded (ms since epoch).
    pub last_submission_ms: Option<f64>,
}

impl GameState {
    pub fn new(now_ms: f64) -> Self {
        Self {
            balance: 0.0,
            total_earned: 0.0,
            total_clicks: 0,
            total_spent: 0.0,
            click_power: 1.0,
            per_second: 0.0,
            start_time_ms: now_ms,
            play_time: 0.0,
            upgrades: BTreeMap::new(),
            achievements: BTreeMap::new(),
            milestones: Milestones::new(),
            player_name: String::new(),
            wallet_address: None,
            last_submission_ms: None,
        }
    }

    /// Owned count of an upgrade (0 if never bought).
    pub fn owned(&self, upgrade_id: &str) -> u32 {
        self.upgrades.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, achievement_id: &str) -> bool {
        self.achievements.get(achievement_id).copied().unwrap_or(false)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.values().filter(|&&v| v).count()
    }

    pub fn next_milestone(&self) -> f64 {
        self.milestones.next()
    }

    pub fn wallet_connected(&self) -> bool {
        self.wallet_address.is_some()
    }

    /// Name shown on the leaderboard.
    pub fn display_name(&self) -> &str {
        if self.player_name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            &self.player_name
        }
    }
}
