//! Leaderboard score projection and the plausibility rules the leaderboard
//! contract enforces.

use serde::Serialize;
use thiserror::Error;

use crate::economy::state::GameState;

use super::ContractConfig;

/// Highest average stCSPR per click the leaderboard accepts.
pub const MAX_PER_CLICK: u64 = 10_000;

/// One second of play required per this many stCSPR earned.
pub const MIN_PLAY_TIME_RATIO: u64 = 100;

/// Why a score would be reverted by the leaderboard contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreRejection {
    #[error("{per_click} stCSPR per click exceeds the limit of {max}", max = MAX_PER_CLICK)]
    InvalidRatio { per_click: u64 },
    #[error("{play_time}s of play is too short to earn this much (needs {required}s)")]
    ImpossiblePlayTime { play_time: u64, required: u64 },
}

/// Read-only projection of a game state submitted to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub wallet_address: String,
    pub total_earned: u64,
    pub total_clicks: u64,
    /// Whole seconds.
    pub play_time: u64,
    /// Unix seconds.
    pub timestamp: u64,
}

impl ScoreSubmission {
    pub fn from_state(state: &GameState, wallet_address: &str, now_ms: f64) -> Self {
        Self {
            player_name: state.display_name().to_string(),
            wallet_address: wallet_address.to_string(),
            total_earned: state.total_earned.max(0.0).floor() as u64,
            total_clicks: state.total_clicks,
            play_time: state.play_time.max(0.0).floor() as u64,
            timestamp: (now_ms.max(0.0) / 1000.0).floor() as u64,
        }
    }

    /// Same checks the contract runs before storing a score.
    pub fn check_plausibility(&self) -> Result<(), ScoreRejection> {
        if self.total_clicks > 0 {
            let per_click = self.total_earned / self.total_clicks;
            if per_click > MAX_PER_CLICK {
                return Err(ScoreRejection::InvalidRatio { per_click });
            }
        }
        if self.play_time > 0 && self.total_earned > 0 {
            let required = self.total_earned / MIN_PLAY_TIME_RATIO;
            if self.play_time < required {
                return Err(ScoreRejection::ImpossiblePlayTime {
                    play_time: self.play_time,
                    required,
                });
            }
        }
        Ok(())
    }

    /// Deploy parameters handed to the wallet for signing and sending.
    pub fn deploy_params(&self, config: &ContractConfig, contract_hash: &str) -> DeployParams {
        DeployParams {
            contract_hash: contract_hash.to_string(),
            entry_point: config.entry_point.clone(),
            runtime_args: self.clone(),
            payment_amount: config.payment_amount.clone(),
            chain_name: config.chain_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployParams {
    pub contract_hash: String,
    pub entry_point: String,
    pub runtime_args: ScoreSubmission,
    pub payment_amount: String,
    pub chain_name: String,
}
