//! Stake Clicker economy: pure functions over `GameState`.

use std::collections::BTreeMap;

use super::catalog::{self, AchievementDef, UpgradeDef, UpgradeEffect};
use super::state::{GameState, MAX_PLAYER_NAME_CHARS};
use super::EconomyError;

/// Cost of the next unit when `count` are already owned.
pub fn upgrade_cost(upgrade: &UpgradeDef, count: u32) -> f64 {
    (upgrade.base_cost * upgrade.cost_multiplier.powi(count as i32)).floor()
}

/// Cost of the next unit of `upgrade_id` for this state.
pub fn cost_of(state: &GameState, upgrade_id: &str) -> Result<f64, EconomyError> {
    let upgrade = catalog::find_upgrade(upgrade_id)
        .ok_or_else(|| EconomyError::InvalidUpgrade(upgrade_id.to_string()))?;
    Ok(upgrade_cost(upgrade, state.owned(upgrade_id)))
}

/// Click power for a set of owned upgrades: 1 × Π multiplier^count.
pub fn click_power_of(upgrades: &BTreeMap<String, u32>) -> f64 {
    catalog::upgrades()
        .iter()
        .filter_map(|u| match u.effect {
            UpgradeEffect::Click { multiplier } => {
                let count = upgrades.get(u.id).copied().unwrap_or(0);
                Some(multiplier.powi(count as i32))
            }
            _ => None,
        })
        .product()
}

/// Passive production for a set of owned upgrades.
pub fn per_second_of(upgrades: &BTreeMap<String, u32>) -> f64 {
    let mut base = 0.0;
    let mut multiplier = 1.0;
    for u in catalog::upgrades() {
        let count = upgrades.get(u.id).copied().unwrap_or(0);
        match u.effect {
            UpgradeEffect::Generator { production } => base += production * count as f64,
            UpgradeEffect::Production { multiplier: m } => multiplier *= m.powi(count as i32),
            UpgradeEffect::Click { .. } => {}
        }
    }
    base * multiplier
}

/// Recompute click power and production from the whole upgrade table.
pub fn recalculate(state: &mut GameState) {
    state.click_power = click_power_of(&state.upgrades);
    state.per_second = per_second_of(&state.upgrades);
}

/// Credit earnings to balance and lifetime total, then move milestones.
/// Gains that would overflow to infinity are dropped.
fn earn(state: &mut GameState, amount: f64) {
    let total = state.total_earned + amount;
    let balance = state.balance + amount;
    if !total.is_finite() || !balance.is_finite() {
        return;
    }
    state.balance = balance;
    state.total_earned = total;
    advance_milestones(state);
}

/// Manual click: add click power to balance.
pub fn click(state: &mut GameState) {
    let power = state.click_power;
    earn(state, power);
    state.total_clicks += 1;
}

/// Advance the economy by `delta_seconds` of real time.
pub fn tick(state: &mut GameState, delta_seconds: f64) {
    if !(delta_seconds > 0.0) || !delta_seconds.is_finite() {
        return;
    }
    if state.per_second > 0.0 {
        let earned = state.per_second * delta_seconds;
        earn(state, earned);
    }
    let play_time = state.play_time + delta_seconds;
    if play_time.is_finite() {
        state.play_time = play_time;
    }
}

/// Bring play time up to the wall clock. Never moves it backwards.
pub fn sync_play_time(state: &mut GameState, now_ms: f64) {
    let elapsed = (now_ms - state.start_time_ms) / 1000.0;
    if elapsed > state.play_time {
        state.play_time = elapsed;
    }
}

/// One-off reward credited like earnings. Non-positive amounts are ignored.
pub fn add_bonus(state: &mut GameState, amount: f64) {
    if amount > 0.0 && amount.is_finite() {
        earn(state, amount);
    }
}

/// Try to buy one unit of an upgrade.
///
/// Returns `Ok(false)` when the balance is too low; the state is then
/// left untouched.
pub fn purchase_upgrade(state: &mut GameState, upgrade_id: &str) -> Result<bool, EconomyError> {
    let upgrade = catalog::find_upgrade(upgrade_id)
        .ok_or_else(|| EconomyError::InvalidUpgrade(upgrade_id.to_string()))?;

    let count = state.owned(upgrade.id);
    let cost = upgrade_cost(upgrade, count);
    if state.balance < cost {
        return Ok(false);
    }

    state.balance -= cost;
    state.total_spent += cost;
    state.upgrades.insert(upgrade.id.to_string(), count + 1);
    recalculate(state);
    Ok(true)
}

/// Unlock every achievement whose predicate now holds.
/// Returns the newly unlocked ones in table order.
pub fn evaluate_achievements(state: &mut GameState) -> Vec<&'static AchievementDef> {
    let snapshot: &GameState = state;
    let newly: Vec<&'static AchievementDef> = catalog::achievements()
        .iter()
        .filter(|a| !snapshot.is_unlocked(a.id) && (a.check)(snapshot))
        .collect();
    for a in &newly {
        state.achievements.insert(a.id.to_string(), true);
    }
    newly
}

/// Move `next_milestone` past `total_earned`.
pub fn advance_milestones(state: &mut GameState) {
    while state.milestones.next().is_finite() && state.total_earned >= state.milestones.next() {
        state.milestones.advance();
    }
}

/// Progress towards the next milestone, 0.0..=1.0.
pub fn milestone_progress(state: &GameState) -> f64 {
    let next = state.milestones.next();
    if next <= 0.0 {
        return 1.0;
    }
    (state.total_earned / next).clamp(0.0, 1.0)
}

/// Trimmed, at most `MAX_PLAYER_NAME_CHARS` characters. Empty means "use the default".
pub fn set_player_name(state: &mut GameState, name: &str) {
    state.player_name = name.trim().chars().take(MAX_PLAYER_NAME_CHARS).collect();
}

pub fn set_wallet(state: &mut GameState, address: Option<String>) {
    state.wallet_address = address.filter(|a| !a.is_empty());
}

/// Format a number with K/M/B/T suffixes (e.g. 1234567 → "1.23M").
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if n < 1_000.0 {
        format!("{}", n.floor() as u64)
    } else if n < 1_000_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else if n < 1_000_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n < 1_000_000_000_000.0 {
        format!("{:.2}B", n / 1_000_000_000.0)
    } else {
        format!("{:.2}T", n / 1_000_000_000_000.0)
    }
}

/// Format seconds as "42s", "3m 7s" or "2h 15m".
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    if total < 60 {
        format!("{}s", total)
    } else if total < 3_600 {
        format!("{}m {}s", total / 60, total % 60)
    } else {
        format!("{}h {}m", total / 3_600, (total % 3_600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(0.0)
    }

    fn owned(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
    }

    #[test]
    fn click_adds_click_power() {
        let mut state = fresh();
        click(&mut state);
        assert_eq!(state.balance, 1.0);
        assert_eq!(state.total_earned, 1.0);
        assert_eq!(state.total_clicks, 1);
        assert_eq!(state.click_power, 1.0);
    }

    #[test]
    fn click_respects_click_power() {
        let mut state = fresh();
        state.click_power = 7.5;
        click(&mut state);
        assert!((state.balance - 7.5).abs() < 1e-9);
    }

    #[test]
    fn click_does_not_unlock_achievements() {
        let mut state = fresh();
        click(&mut state);
        assert!(state.achievements.is_empty());
    }

    #[test]
    fn buy_first_validator() {
        let mut state = fresh();
        state.balance = 20.0;
        assert_eq!(purchase_upgrade(&mut state, "validator1"), Ok(true));
        assert_eq!(state.balance, 0.0);
        assert_eq!(state.total_spent, 20.0);
        assert_eq!(state.owned("validator1"), 1);
        assert!((state.per_second - 0.1).abs() < 1e-12);
        assert_eq!(cost_of(&state, "validator1"), Ok(23.0));
    }

    #[test]
    fn buy_declined_without_funds() {
        let mut state = fresh();
        state.balance = 19.0;
        let before = state.clone();
        assert_eq!(purchase_upgrade(&mut state, "validator1"), Ok(false));
        assert_eq!(state, before);
    }

    #[test]
    fn buy_unknown_upgrade_fails() {
        let mut state = fresh();
        state.balance = 1e12;
        let before = state.clone();
        assert_eq!(
            purchase_upgrade(&mut state, "nope"),
            Err(EconomyError::InvalidUpgrade("nope".into()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn cost_of_unknown_upgrade_fails() {
        assert!(cost_of(&fresh(), "validator0").is_err());
    }

    #[test]
    fn buy_click_upgrade_multiplies_click_power() {
        let mut state = fresh();
        state.balance = 300.0;
        assert_eq!(purchase_upgrade(&mut state, "multiplier1"), Ok(true));
        assert!((state.click_power - 1.5).abs() < 1e-12);
        // second unit costs 100 × 2
        assert_eq!(cost_of(&state, "multiplier1"), Ok(200.0));
        assert_eq!(purchase_upgrade(&mut state, "multiplier1"), Ok(true));
        assert!((state.click_power - 2.25).abs() < 1e-12);
        assert_eq!(state.balance, 0.0);
    }

    #[test]
    fn click_power_of_empty_is_one() {
        assert_eq!(click_power_of(&BTreeMap::new()), 1.0);
    }

    #[test]
    fn per_second_of_empty_is_zero() {
        assert_eq!(per_second_of(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn click_power_stacks_multiplicatively() {
        let ups = owned(&[("multiplier1", 2), ("multiplier2", 1), ("validator1", 50)]);
        assert!((click_power_of(&ups) - 1.5 * 1.5 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn production_multiplier_applies_to_sum() {
        let ups = owned(&[("validator1", 10), ("validator2", 2), ("autostaker", 1), ("turbomode", 2)]);
        let expected = (10.0 * 0.1 + 2.0 * 0.5) * 1.5 * 4.0;
        assert!((per_second_of(&ups) - expected).abs() < 1e-9);
    }

    #[test]
    fn production_multiplier_without_generators_is_zero() {
        let ups = owned(&[("hyperproduction", 3)]);
        assert_eq!(per_second_of(&ups), 0.0);
    }

    #[test]
    fn unknown_ids_in_owned_map_are_ignored() {
        let ups = owned(&[("ghost", 9), ("validator3", 1)]);
        assert!((per_second_of(&ups) - 2.0).abs() < 1e-12);
        assert_eq!(click_power_of(&ups), 1.0);
    }

    #[test]
    fn tick_produces() {
        let mut state = fresh();
        state.per_second = 10.0;
        tick(&mut state, 5.0);
        assert!((state.balance - 50.0).abs() < 1e-9);
        assert!((state.total_earned - 50.0).abs() < 1e-9);
        assert!((state.play_time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn tick_without_production_only_advances_time() {
        let mut state = fresh();
        tick(&mut state, 2.5);
        assert_eq!(state.balance, 0.0);
        assert_eq!(state.play_time, 2.5);
    }

    #[test]
    fn tick_zero_or_negative_does_nothing() {
        let mut state = fresh();
        state.per_second = 3.0;
        let before = state.clone();
        tick(&mut state, 0.0);
        tick(&mut state, -4.0);
        tick(&mut state, f64::NAN);
        assert_eq!(state, before);
    }

    #[test]
    fn tick_overflowing_production_is_dropped() {
        let mut state = fresh();
        state.upgrades.insert("validator4".into(), 1);
        recalculate(&mut state);
        tick(&mut state, f64::MAX);
        assert_eq!(state.balance, 0.0);
        assert_eq!(state.total_earned, 0.0);
        assert_eq!(state.next_milestone(), 100.0);

        let before = state.clone();
        tick(&mut state, f64::INFINITY);
        assert_eq!(state, before);
    }

    #[test]
    fn earnings_stop_short_of_infinity() {
        let mut state = fresh();
        add_bonus(&mut state, f64::MAX);
        assert_eq!(state.total_earned, f64::MAX);
        assert!(state.next_milestone().is_infinite());
        add_bonus(&mut state, f64::MAX);
        assert_eq!(state.balance, f64::MAX);
        assert!(state.total_earned.is_finite());
    }

    #[test]
    fn sync_play_time_follows_wall_clock() {
        let mut state = GameState::new(10_000.0);
        sync_play_time(&mut state, 12_500.0);
        assert!((state.play_time - 2.5).abs() < 1e-9);
    }

    #[test]
    fn sync_play_time_never_goes_back() {
        let mut state = GameState::new(10_000.0);
        state.play_time = 30.0;
        sync_play_time(&mut state, 12_000.0);
        assert_eq!(state.play_time, 30.0);
    }

    #[test]
    fn first_click_achievement_once() {
        let mut state = fresh();
        assert!(evaluate_achievements(&mut state).is_empty());
        click(&mut state);
        let ids: Vec<&str> = evaluate_achievements(&mut state).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_click"]);
        assert!(evaluate_achievements(&mut state).is_empty());
        click(&mut state);
        assert!(evaluate_achievements(&mut state).is_empty());
        assert!(state.is_unlocked("first_click"));
    }

    #[test]
    fn achievements_come_in_table_order() {
        let mut state = fresh();
        state.total_clicks = 150;
        state.total_earned = 2_000.0;
        let ids: Vec<&str> = evaluate_achievements(&mut state).iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec!["first_click", "clicker", "first_hundred", "first_thousand"]
        );
    }

    #[test]
    fn unlocked_achievement_is_never_reevaluated() {
        let mut state = fresh();
        state.wallet_address = Some("01ab".into());
        evaluate_achievements(&mut state);
        assert!(state.is_unlocked("wallet_connect"));
        set_wallet(&mut state, None);
        assert!(evaluate_achievements(&mut state).is_empty());
        assert!(state.is_unlocked("wallet_connect"));
    }

    #[test]
    fn first_validator_on_any_purchase() {
        let mut state = fresh();
        state.balance = 100.0;
        purchase_upgrade(&mut state, "multiplier1").unwrap();
        let ids: Vec<&str> = evaluate_achievements(&mut state).iter().map(|a| a.id).collect();
        assert!(ids.contains(&"first_validator"));
    }

    #[test]
    fn milestone_advances_past_100() {
        let mut state = fresh();
        state.click_power = 99.0;
        click(&mut state);
        assert_eq!(state.next_milestone(), 100.0);
        state.click_power = 2.0;
        click(&mut state);
        assert_eq!(state.next_milestone(), 500.0);
    }

    #[test]
    fn milestone_catches_up_on_big_jump() {
        let mut state = fresh();
        add_bonus(&mut state, 60_000.0);
        assert_eq!(state.next_milestone(), 100_000.0);
    }

    #[test]
    fn milestone_continues_past_seed() {
        let mut state = fresh();
        add_bonus(&mut state, 2e8);
        assert_eq!(state.next_milestone(), 1e9);
    }

    #[test]
    fn milestone_progress_is_clamped() {
        let mut state = fresh();
        assert_eq!(milestone_progress(&state), 0.0);
        state.total_earned = 50.0;
        assert!((milestone_progress(&state) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn add_bonus_ignores_non_positive() {
        let mut state = fresh();
        add_bonus(&mut state, 0.0);
        add_bonus(&mut state, -5.0);
        add_bonus(&mut state, f64::INFINITY);
        assert_eq!(state.balance, 0.0);
        add_bonus(&mut state, 12.0);
        assert_eq!(state.balance, 12.0);
        assert_eq!(state.total_earned, 12.0);
        assert_eq!(state.total_clicks, 0);
    }

    #[test]
    fn player_name_is_trimmed_and_truncated() {
        let mut state = fresh();
        set_player_name(&mut state, "   Validator Vince   ");
        assert_eq!(state.player_name, "Validator Vince");
        set_player_name(&mut state, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(state.player_name, "abcdefghijklmnopqrst");
        set_player_name(&mut state, "   ");
        assert_eq!(state.display_name(), "Anonymous Staker");
    }

    #[test]
    fn empty_wallet_address_means_disconnected() {
        let mut state = fresh();
        set_wallet(&mut state, Some(String::new()));
        assert!(!state.wallet_connected());
        set_wallet(&mut state, Some("0203ab".into()));
        assert!(state.wallet_connected());
    }

    #[test]
    fn format_number_suffixes() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.9), "999");
        assert_eq!(format_number(1_500.0), "1.5K");
        assert_eq!(format_number(1_234_567.0), "1.23M");
        assert_eq!(format_number(2_500_000_000.0), "2.50B");
        assert_eq!(format_number(7e12), "7.00T");
    }

    #[test]
    fn format_time_units() {
        assert_eq!(format_time(42.9), "42s");
        assert_eq!(format_time(187.0), "3m 7s");
        assert_eq!(format_time(8_100.0), "2h 15m");
        assert_eq!(format_time(-3.0), "0s");
    }
}
