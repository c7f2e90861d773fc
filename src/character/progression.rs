//! Leveling curve and XP application.

use super::player::Player;
use crate::core::constants::{LEVEL_UP_MAX_HP, LEVEL_UP_MAX_STAMINA, MAX_LEVEL, XP_BASE, XP_CURVE};
use crate::core::messages::MessageSink;

/// XP needed to advance past `level`: `floor(100 * level * 1.06^(level-1))`.
/// `None` at the level cap, where the requirement is unbounded.
pub fn xp_for_next_level(level: u32) -> Option<u64> {
    if level >= MAX_LEVEL {
        return None;
    }
    let level_f = level as f64;
    Some((XP_BASE * level_f * XP_CURVE.powi(level as i32 - 1)).floor() as u64)
}

/// Grant XP and resolve every level-up it pays for. Each level adds
/// +10 max hp and +5 max stamina and heals both pools by the same amount.
/// Returns the number of levels gained.
pub fn add_xp(player: &mut Player, amount: u64, log: &mut impl MessageSink) -> u32 {
    player.xp += amount;
    let mut gained = 0;
    while let Some(needed) = xp_for_next_level(player.level) {
        if player.xp < needed {
            break;
        }
        player.xp -= needed;
        player.level += 1;
        player.grow_max_hp(LEVEL_UP_MAX_HP);
        player.grow_max_stamina(LEVEL_UP_MAX_STAMINA);
        gained += 1;
        log.display(&format!(
            "Level up! You are now level {} (max HP +{}, max stamina +{}).",
            player.level, LEVEL_UP_MAX_HP, LEVEL_UP_MAX_STAMINA
        ));
    }
    if gained > 0 {
        tracing::debug!(level = player.level, gained, "player leveled up");
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages::MessageLog;

    #[test]
    fn test_xp_curve_values() {
        assert_eq!(xp_for_next_level(1), Some(100));
        assert_eq!(xp_for_next_level(2), Some(212));
        assert_eq!(xp_for_next_level(10), Some(1689));
    }

    #[test]
    fn test_xp_curve_capped() {
        assert!(xp_for_next_level(98).is_some());
        assert_eq!(xp_for_next_level(99), None);
        assert_eq!(xp_for_next_level(150), None);
    }

    #[test]
    fn test_below_threshold_no_level() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        assert_eq!(add_xp(&mut p, 99, &mut log), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 99);
    }

    #[test]
    fn test_level_up_heals_by_growth_only() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        p.hp = 40;
        p.stamina = 10;
        add_xp(&mut p, 100, &mut log);
        assert_eq!(p.max_hp, 110);
        assert_eq!(p.hp, 50);
        assert_eq!(p.max_stamina, 55);
        assert_eq!(p.stamina, 15);
    }

    #[test]
    fn test_level_cap_stops_loop() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        p.level = 98;
        add_xp(&mut p, u64::MAX / 2, &mut log);
        assert_eq!(p.level, 99);
    }
}
