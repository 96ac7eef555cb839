//! Static game data: upgrade table, achievement table, milestone seed.

use super::state::GameState;

/// Upgrade type, as shown in the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    Generator,
    Click,
    Production,
}

/// What owning one unit of an upgrade does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Flat stCSPR/sec added per owned unit.
    Generator { production: f64 },
    /// Click power factor, raised to the owned count.
    Click { multiplier: f64 },
    /// Global production factor, raised to the owned count.
    Production { multiplier: f64 },
}

#[derive(Debug)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub effect: UpgradeEffect,
}

impl UpgradeDef {
    pub fn kind(&self) -> UpgradeKind {
        match self.effect {
            UpgradeEffect::Generator { .. } => UpgradeKind::Generator,
            UpgradeEffect::Click { .. } => UpgradeKind::Click,
            UpgradeEffect::Production { .. } => UpgradeKind::Production,
        }
    }
}

const fn generator(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    base_cost: f64,
    production: f64,
) -> UpgradeDef {
    UpgradeDef {
        id,
        name,
        icon,
        description,
        base_cost,
        cost_multiplier: 1.15,
        effect: UpgradeEffect::Generator { production },
    }
}

static UPGRADES: &[UpgradeDef] = &[
    // ── Validators (passive production) ─────────────────────────
    generator("validator1", "Basic Validator", "🖥️", "+0.1 stCSPR/sec", 20.0, 0.1),
    generator("validator2", "Enhanced Validator", "💻", "+0.5 stCSPR/sec", 150.0, 0.5),
    generator("validator3", "Super Validator", "🖥️", "+2 stCSPR/sec", 1_500.0, 2.0),
    generator("validator4", "Mega Validator", "🚀", "+8 stCSPR/sec", 15_000.0, 8.0),
    generator("validator5", "Ultra Validator", "⚡", "+30 stCSPR/sec", 150_000.0, 30.0),
    generator("validator6", "Quantum Validator", "🌌", "+100 stCSPR/sec", 750_000.0, 100.0),
    generator("validator7", "Infinity Engine", "♾️", "+500 stCSPR/sec", 5_000_000.0, 500.0),
    // ── Click multipliers ───────────────────────────────────────
    UpgradeDef {
        id: "multiplier1",
        name: "Click Booster",
        icon: "👆",
        description: "+50% click power",
        base_cost: 100.0,
        cost_multiplier: 2.0,
        effect: UpgradeEffect::Click { multiplier: 1.5 },
    },
    UpgradeDef {
        id: "multiplier2",
        name: "Super Clicker",
        icon: "💪",
        description: "x2 click power",
        base_cost: 1_000.0,
        cost_multiplier: 3.0,
        effect: UpgradeEffect::Click { multiplier: 2.0 },
    },
    UpgradeDef {
        id: "multiplier3",
        name: "Mega Clicker",
        icon: "💥",
        description: "x3 click power",
        base_cost: 10_000.0,
        cost_multiplier: 4.0,
        effect: UpgradeEffect::Click { multiplier: 3.0 },
    },
    UpgradeDef {
        id: "multiplier4",
        name: "Golden Touch",
        icon: "✨",
        description: "x5 click power",
        base_cost: 50_000.0,
        cost_multiplier: 5.0,
        effect: UpgradeEffect::Click { multiplier: 5.0 },
    },
    UpgradeDef {
        id: "multiplier5",
        name: "God Mode",
        icon: "👑",
        description: "x10 click power",
        base_cost: 500_000.0,
        cost_multiplier: 6.0,
        effect: UpgradeEffect::Click { multiplier: 10.0 },
    },
    // ── Production multipliers ──────────────────────────────────
    UpgradeDef {
        id: "autostaker",
        name: "Auto-Staker",
        icon: "🤖",
        description: "+50% all production",
        base_cost: 20_000.0,
        cost_multiplier: 2.5,
        effect: UpgradeEffect::Production { multiplier: 1.5 },
    },
    UpgradeDef {
        id: "turbomode",
        name: "Turbo Mode",
        icon: "🔥",
        description: "x2 all production",
        base_cost: 100_000.0,
        cost_multiplier: 3.0,
        effect: UpgradeEffect::Production { multiplier: 2.0 },
    },
    UpgradeDef {
        id: "hyperproduction",
        name: "Hyper Production",
        icon: "⚛️",
        description: "x2.5 all production",
        base_cost: 1_000_000.0,
        cost_multiplier: 4.0,
        effect: UpgradeEffect::Production { multiplier: 2.5 },
    },
];

/// All upgrades in shop order.
pub fn upgrades() -> &'static [UpgradeDef] {
    UPGRADES
}

pub fn find_upgrade(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|u| u.id == id)
}

/// A one-way unlockable flag gated by a pure predicate.
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub check: fn(&GameState) -> bool,
}

impl std::fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementDef").field("id", &self.id).finish()
    }
}

static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_click",
        name: "First Stake",
        icon: "🎉",
        description: "Make your first click",
        check: |s| s.total_clicks >= 1,
    },
    AchievementDef {
        id: "clicker",
        name: "Active Staker",
        icon: "👆",
        description: "Click 100 times",
        check: |s| s.total_clicks >= 100,
    },
    AchievementDef {
        id: "veteran_clicker",
        name: "Veteran Staker",
        icon: "💪",
        description: "Click 1,000 times",
        check: |s| s.total_clicks >= 1_000,
    },
    AchievementDef {
        id: "ultimate_clicker",
        name: "Ultimate Clicker",
        icon: "🔥",
        description: "Click 10,000 times",
        check: |s| s.total_clicks >= 10_000,
    },
    AchievementDef {
        id: "first_hundred",
        name: "Hundred Club",
        icon: "💯",
        description: "Earn 100 stCSPR",
        check: |s| s.total_earned >= 100.0,
    },
    AchievementDef {
        id: "first_thousand",
        name: "Thousand Club",
        icon: "🎖️",
        description: "Earn 1,000 stCSPR",
        check: |s| s.total_earned >= 1_000.0,
    },
    AchievementDef {
        id: "millionaire",
        name: "stCSPR Millionaire",
        icon: "💰",
        description: "Earn 1,000,000 stCSPR",
        check: |s| s.total_earned >= 1_000_000.0,
    },
    AchievementDef {
        id: "billionaire",
        name: "Billionaire",
        icon: "💎",
        description: "Earn 1,000,000,000 stCSPR",
        check: |s| s.total_earned >= 1_000_000_000.0,
    },
    AchievementDef {
        id: "first_validator",
        name: "Validator Owner",
        icon: "🖥️",
        description: "Buy your first validator",
        check: |s| s.upgrades.values().any(|&count| count > 0),
    },
    AchievementDef {
        id: "passive_income",
        name: "Passive Income",
        icon: "💸",
        description: "Earn 100 stCSPR/sec",
        check: |s| s.per_second >= 100.0,
    },
    AchievementDef {
        id: "automation_king",
        name: "Automation King",
        icon: "👑",
        description: "Earn 1,000 stCSPR/sec",
        check: |s| s.per_second >= 1_000.0,
    },
    AchievementDef {
        id: "dedication",
        name: "Dedicated Staker",
        icon: "⏰",
        description: "Play for 10 minutes",
        check: |s| s.play_time >= 600.0,
    },
    AchievementDef {
        id: "night_owl",
        name: "Night Owl",
        icon: "🦉",
        description: "Play for 1 hour",
        check: |s| s.play_time >= 3_600.0,
    },
    AchievementDef {
        id: "wallet_connect",
        name: "Connected",
        icon: "🔗",
        description: "Connect your Casper wallet",
        check: |s| s.wallet_connected(),
    },
];

/// All achievements in evaluation order.
pub fn achievements() -> &'static [AchievementDef] {
    ACHIEVEMENTS
}

pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Predefined milestone thresholds. Past the last one the sequence keeps
/// growing by x10.
pub const MILESTONE_SEED: [f64; 10] = [
    100.0,
    500.0,
    1_000.0,
    5_000.0,
    10_000.0,
    50_000.0,
    100_000.0,
    500_000.0,
    1_000_000.0,
    10_000_000.0,
];
