//! Simulated wallet used when no extension is installed, and in tests.
//!
//! Signatures and deploy hashes are SHA-256 digests, so everything is
//! deterministic for a given seed.

use sha2::{Digest, Sha256};

use super::{Receipt, ScoreSubmission, WalletAccount, WalletAdapter, WalletError};

/// A row of the demo leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub address: String,
    pub score: u64,
}

pub struct DemoWallet {
    rng_state: u64,
    account: Option<WalletAccount>,
    /// Accepted submissions: (address, name, total earned). One per address.
    scores: Vec<(String, String, u64)>,
}

impl DemoWallet {
    pub fn new(seed: u32) -> Self {
        Self {
            rng_state: seed as u64,
            account: None,
            scores: vec![
                ("0x1234...5678".into(), "CasperWhale".into(), 15_234_567),
                ("0x9876...5432".into(), "StakeMaster".into(), 9_876_543),
                ("0x5432...1098".into(), "ValidatorKing".into(), 5_432_109),
                ("0x3210...9876".into(), "ClickPro".into(), 3_210_987),
                ("0x1098...7654".into(), "CasperFan".into(), 1_098_765),
            ],
        }
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        self.account.as_ref()
    }

    /// Top `limit` scores, best first.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut rows: Vec<&(String, String, u64)> = self.scores.iter().collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        rows.into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (address, name, score))| LeaderboardEntry {
                rank: i + 1,
                name: name.clone(),
                address: address.clone(),
                score: *score,
            })
            .collect()
    }

    /// Recorded score for an address, if any.
    pub fn player_score(&self, address: &str) -> Option<u64> {
        self.scores
            .iter()
            .find(|(a, _, _)| a == address)
            .map(|(_, _, s)| *s)
    }

    fn next_random(&mut self) -> u32 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.rng_state >> 32) as u32
    }

    fn digest(parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl WalletAdapter for DemoWallet {
    async fn connect(&mut self) -> Result<WalletAccount, WalletError> {
        if let Some(account) = &self.account {
            return Ok(account.clone());
        }
        let account = WalletAccount {
            public_key: format!("demo_{:08x}", self.next_random()),
        };
        self.account = Some(account.clone());
        Ok(account)
    }

    async fn sign(&mut self, payload: &str) -> Result<String, WalletError> {
        let account = self.account.as_ref().ok_or(WalletError::NotConnected)?;
        Ok(Self::digest(&[&account.public_key, payload]))
    }

    async fn submit(&mut self, score: &ScoreSubmission) -> Result<Receipt, WalletError> {
        let account = self.account.as_ref().ok_or(WalletError::NotConnected)?;
        if score.wallet_address != account.public_key {
            return Err(WalletError::Rejected(
                "score belongs to a different account".into(),
            ));
        }
        score.check_plausibility()?;

        let body = serde_json::to_string(score).map_err(|e| WalletError::Js(e.to_string()))?;
        let deploy_hash = Self::digest(&[&account.public_key, &body]);

        // Latest submission replaces the previous one for this address.
        let address = account.public_key.clone();
        self.scores.retain(|(a, _, _)| *a != address);
        self.scores
            .push((address, score.player_name.clone(), score.total_earned));

        Ok(Receipt { deploy_hash })
    }

    fn disconnect(&mut self) {
        self.account = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::ScoreRejection;
    use pollster::block_on;

    fn submission(address: &str, earned: u64) -> ScoreSubmission {
        ScoreSubmission {
            player_name: "Alice".into(),
            wallet_address: address.into(),
            total_earned: earned,
            total_clicks: 10_000,
            play_time: 200_000,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn connect_is_deterministic_per_seed() {
        let a = block_on(DemoWallet::new(42).connect()).unwrap();
        let b = block_on(DemoWallet::new(42).connect()).unwrap();
        let c = block_on(DemoWallet::new(43).connect()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.public_key.len(), "demo_".len() + 8);
    }

    #[test]
    fn reconnect_keeps_account() {
        let mut w = DemoWallet::new(1);
        let first = block_on(w.connect()).unwrap();
        let second = block_on(w.connect()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sign_requires_connection() {
        let mut w = DemoWallet::new(1);
        assert_eq!(block_on(w.sign("x")), Err(WalletError::NotConnected));
        block_on(w.connect()).unwrap();
        let sig = block_on(w.sign("x")).unwrap();
        assert_eq!(sig, block_on(w.sign("x")).unwrap());
        assert_ne!(sig, block_on(w.sign("y")).unwrap());
    }

    #[test]
    fn submit_records_and_ranks() {
        let mut w = DemoWallet::new(5);
        let account = block_on(w.connect()).unwrap();
        let receipt = block_on(w.submit(&submission(&account.public_key, 10_000_000))).unwrap();
        assert_eq!(receipt.deploy_hash.len(), 64);
        assert_eq!(w.player_score(&account.public_key), Some(10_000_000));

        let board = w.leaderboard(3);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].name, "CasperWhale");
        assert_eq!(board[1].address, account.public_key);
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn resubmission_replaces_score() {
        let mut w = DemoWallet::new(5);
        let account = block_on(w.connect()).unwrap();
        block_on(w.submit(&submission(&account.public_key, 500))).unwrap();
        block_on(w.submit(&submission(&account.public_key, 2_000))).unwrap();
        assert_eq!(w.player_score(&account.public_key), Some(2_000));
        assert_eq!(w.leaderboard(100).len(), 6);
    }

    #[test]
    fn submit_rejects_foreign_or_implausible_scores() {
        let mut w = DemoWallet::new(5);
        assert_eq!(
            block_on(w.submit(&submission("someone", 1))),
            Err(WalletError::NotConnected)
        );
        let account = block_on(w.connect()).unwrap();
        assert!(matches!(
            block_on(w.submit(&submission("someone", 1))),
            Err(WalletError::Rejected(_))
        ));
        let mut cheat = submission(&account.public_key, 10_000_000);
        cheat.play_time = 1;
        assert!(matches!(
            block_on(w.submit(&cheat)),
            Err(WalletError::Implausible(ScoreRejection::ImpossiblePlayTime { .. }))
        ));
    }

    #[test]
    fn disconnect_forgets_account() {
        let mut w = DemoWallet::new(5);
        block_on(w.connect()).unwrap();
        w.disconnect();
        assert!(w.account().is_none());
    }

    #[test]
    fn seeded_leaderboard_is_sorted() {
        let board = DemoWallet::new(1).leaderboard(5);
        assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(board[4].name, "CasperFan");
    }
}
