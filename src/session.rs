//! A running game: the engine plus its clock, persistence and wallet glue.
//!
//! The host drives a [`Session`] with [`Session::frame`] from its animation
//! loop and forwards player input through [`Session::handle`].

use thiserror::Error;

use crate::console;
use crate::economy::catalog::AchievementDef;
use crate::economy::save::Persistence;
use crate::economy::state::GameState;
use crate::economy::{EconomyError, Engine};
use crate::time::SessionClock;
use crate::wallet::{Receipt, ScoreRejection, ScoreSubmission, WalletAccount, WalletAdapter, WalletError};

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Economy ticks per real second.
    pub ticks_per_sec: u32,
    /// Ticks between automatic saves (300 = 30 s at 10 ticks/s).
    pub autosave_interval_ticks: u64,
    /// Minimum gap between two score submissions.
    pub min_submit_interval_ms: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec: 10,
            autosave_interval_ticks: 300,
            min_submit_interval_ms: 300_000.0,
        }
    }
}

/// Player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Click,
    Buy(String),
    /// Golden ghost and similar one-off rewards.
    Bonus(f64),
    Rename(String),
    Reset,
}

#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action took effect. Lists achievements it unlocked.
    Applied { unlocked: Vec<&'static AchievementDef> },
    /// A purchase the balance could not cover. Nothing changed.
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("connect a wallet before submitting a score")]
    WalletNotConnected,
    #[error("score was submitted recently; retry in {retry_in_ms} ms")]
    Throttled { retry_in_ms: u64 },
    #[error("score would be rejected: {0}")]
    Implausible(#[from] ScoreRejection),
}

pub struct Session<P: Persistence> {
    engine: Engine,
    persistence: P,
    clock: SessionClock,
    config: SessionConfig,
    ticks_since_save: u64,
}

impl<P: Persistence> Session<P> {
    /// Restore the saved game from `persistence`, or start a fresh one.
    pub fn start(mut persistence: P, config: SessionConfig, now_ms: f64) -> Self {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let mut engine = match persistence.load() {
            Ok(Some(mut state)) => {
                // Snapshots without a start time resume from their play time.
                if !(state.start_time_ms > 0.0) {
                    state.start_time_ms = now_ms - state.play_time * 1000.0;
                }
                console::log(&format!(
                    "loaded save: {:.0} earned, {} clicks",
                    state.total_earned, state.total_clicks
                ));
                Engine::from_snapshot(state)
            }
            Ok(None) => Engine::new(now_ms),
            Err(e) => {
                console::warn(&format!("failed to load save, starting fresh: {e}"));
                Engine::new(now_ms)
            }
        };
        engine.sync_play_time(now_ms);

        Self {
            engine,
            clock: SessionClock::new(config.ticks_per_sec),
            persistence,
            config,
            ticks_since_save: 0,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Advance to `now_ms`, crediting production for the whole gap since the
    /// previous frame. Returns achievements unlocked during the frame.
    pub fn frame(&mut self, now_ms: f64) -> Vec<&'static AchievementDef> {
        let step = self.clock.update(now_ms);
        if !(step.seconds > 0.0) {
            return Vec::new();
        }

        self.engine.tick(step.seconds);
        self.engine.sync_play_time(now_ms);
        let unlocked = self.engine.evaluate_achievements();

        self.ticks_since_save += step.ticks as u64;
        if self.ticks_since_save >= self.config.autosave_interval_ticks {
            self.ticks_since_save = 0;
            self.save();
        }
        unlocked
    }

    /// Apply one player action.
    pub fn handle(&mut self, action: Action, now_ms: f64) -> Result<ActionOutcome, EconomyError> {
        match action {
            Action::Click => self.engine.click(),
            Action::Buy(id) => {
                if !self.engine.purchase_upgrade(&id)? {
                    return Ok(ActionOutcome::Declined);
                }
                self.save();
            }
            Action::Bonus(amount) => self.engine.add_bonus(amount),
            Action::Rename(name) => {
                self.engine.set_player_name(&name);
                self.save();
            }
            Action::Reset => {
                self.reset(now_ms);
                return Ok(ActionOutcome::Applied { unlocked: Vec::new() });
            }
        }
        let unlocked = self.engine.evaluate_achievements();
        Ok(ActionOutcome::Applied { unlocked })
    }

    fn reset(&mut self, now_ms: f64) {
        if let Err(e) = self.persistence.clear() {
            console::warn(&format!("failed to clear save: {e}"));
        }
        self.engine.reset(now_ms);
        self.clock.restart();
        self.ticks_since_save = 0;
        console::log("game reset");
    }

    /// Connect `wallet` and remember its account.
    pub async fn connect_wallet<W: WalletAdapter>(
        &mut self,
        wallet: &mut W,
    ) -> Result<WalletAccount, WalletError> {
        match wallet.connect().await {
            Ok(account) => {
                self.engine.set_wallet(Some(account.public_key.clone()));
                self.save();
                Ok(account)
            }
            Err(e) => {
                console::warn(&format!("wallet connection failed: {e}"));
                Err(e)
            }
        }
    }

    pub fn disconnect_wallet<W: WalletAdapter>(&mut self, wallet: &mut W) {
        wallet.disconnect();
        self.engine.set_wallet(None);
        self.save();
    }

    /// Snapshot the score for submission, if the leaderboard would take it.
    pub fn score_submission(&self, now_ms: f64) -> Result<ScoreSubmission, SubmitError> {
        let state = self.engine.state();
        let address = state
            .wallet_address
            .as_deref()
            .ok_or(SubmitError::WalletNotConnected)?;

        if let Some(last) = state.last_submission_ms {
            let elapsed = now_ms - last;
            if elapsed < self.config.min_submit_interval_ms {
                let remaining = (self.config.min_submit_interval_ms - elapsed).ceil();
                return Err(SubmitError::Throttled {
                    retry_in_ms: remaining as u64,
                });
            }
        }

        let submission = ScoreSubmission::from_state(state, address, now_ms);
        submission.check_plausibility()?;
        Ok(submission)
    }

    /// Record the wallet's answer to a submission.
    pub fn finish_submission(
        &mut self,
        result: Result<Receipt, WalletError>,
        now_ms: f64,
    ) -> Result<Receipt, WalletError> {
        match &result {
            Ok(receipt) => {
                console::log(&format!("score submitted: {}", receipt.deploy_hash));
                self.engine.record_submission(now_ms);
                self.save();
            }
            Err(e) => console::warn(&format!("score submission failed: {e}")),
        }
        result
    }

    /// Persist the current state. Failures are logged and play goes on.
    pub fn save(&mut self) -> bool {
        match self.persistence.save(self.engine.state()) {
            Ok(()) => true,
            Err(e) => {
                console::warn(&format!("failed to save: {e}"));
                false
            }
        }
    }
}
