use super::types::*;
use crate::character::Player;
use crate::core::messages::MessageSink;
use crate::core::rng::chance;
use crate::items::EquipmentSlot;
use rand::Rng;

/// Try to raise the item in `slot` by one level.
///
/// Gold is checked before anything changes and is spent whether the
/// attempt succeeds or not. A failure drops the level by one.
pub fn attempt_enhancement<R: Rng>(
    player: &mut Player,
    slot: EquipmentSlot,
    record: &mut EnhancementRecord,
    rng: &mut R,
    log: &mut impl MessageSink,
) -> EnhancementOutcome {
    let current_level = match player.equipment.get(slot) {
        Some(item) => item.enhance_level,
        None => {
            log.display(&format!("Nothing is equipped in the {} slot.", slot.name()));
            return EnhancementOutcome::NothingEquipped;
        }
    };
    if current_level >= MAX_ENHANCEMENT_LEVEL {
        log.display("This item cannot be enhanced any further.");
        return EnhancementOutcome::MaxLevel;
    }

    let target_level = current_level + 1;
    let cost = enhancement_cost(target_level);
    if !player.try_spend_gold(cost) {
        log.display(&format!("Enhancing costs {} gold. Not enough gold.", cost));
        return EnhancementOutcome::NotEnoughGold { cost };
    }

    record.total_attempts += 1;
    let succeeded = chance(rng, success_rate(target_level));
    let Some(item) = player.equipment.get_mut(slot) else {
        return EnhancementOutcome::NothingEquipped;
    };
    if succeeded {
        item.enhance_level = target_level;
        record.total_successes += 1;
        record.highest_level_reached = record.highest_level_reached.max(target_level);
        log.display(&format!(
            "Enhancement succeeded! {} is now +{}.",
            item.name, target_level
        ));
        EnhancementOutcome::Succeeded {
            old_level: current_level,
            new_level: target_level,
            cost,
        }
    } else {
        let new_level = current_level.saturating_sub(1);
        item.enhance_level = new_level;
        record.total_failures += 1;
        log.display(&format!(
            "Enhancement failed. {} drops to +{}.",
            item.name, new_level
        ));
        EnhancementOutcome::Failed {
            old_level: current_level,
            new_level,
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages::MessageLog;
    use crate::core::rng::ScriptedRng;
    use crate::items::{Item, ItemStats, Rarity};

    fn sword(level: u32) -> Item {
        Item {
            name: "Bronze Khopesh".to_string(),
            slot: EquipmentSlot::Weapon,
            rarity: Rarity::Common,
            stats: ItemStats {
                atk: 5,
                ..ItemStats::ZERO
            },
            affix: None,
            is_dungeon: false,
            enhance_level: level,
        }
    }

    fn armed_player(level: u32) -> Player {
        let mut p = Player::new();
        p.equipment.replace(sword(level));
        p
    }

    #[test]
    fn test_safe_levels_always_succeed() {
        let mut log = MessageLog::default();
        let mut record = EnhancementRecord::default();
        let mut p = armed_player(0);
        let mut rng = ScriptedRng::constant(1.0);
        let outcome = attempt_enhancement(&mut p, EquipmentSlot::Weapon, &mut record, &mut rng, &mut log);
        assert_eq!(
            outcome,
            EnhancementOutcome::Succeeded {
                old_level: 0,
                new_level: 1,
                cost: 100
            }
        );
        assert_eq!(p.gold, 400);
        assert_eq!(p.equipment.combat_stats().weapon_atk, 7);
    }

    #[test]
    fn test_failure_drops_level_and_spends_gold() {
        let mut log = MessageLog::default();
        let mut record = EnhancementRecord::default();
        let mut p = armed_player(3);
        let mut rng = ScriptedRng::constant(0.95);
        let outcome = attempt_enhancement(&mut p, EquipmentSlot::Weapon, &mut record, &mut rng, &mut log);
        assert_eq!(
            outcome,
            EnhancementOutcome::Failed {
                old_level: 3,
                new_level: 2,
                cost: 409
            }
        );
        assert_eq!(p.gold, 91);
        assert_eq!(record.total_failures, 1);
    }

    #[test]
    fn test_not_enough_gold_changes_nothing() {
        let mut log = MessageLog::default();
        let mut record = EnhancementRecord::default();
        let mut p = armed_player(3);
        p.gold = 100;
        let mut rng = ScriptedRng::constant(0.0);
        let outcome = attempt_enhancement(&mut p, EquipmentSlot::Weapon, &mut record, &mut rng, &mut log);
        assert_eq!(outcome, EnhancementOutcome::NotEnoughGold { cost: 409 });
        assert_eq!(p.gold, 100);
        assert_eq!(record.total_attempts, 0);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_max_level_and_empty_slot() {
        let mut log = MessageLog::default();
        let mut record = EnhancementRecord::default();
        let mut rng = ScriptedRng::constant(0.0);
        let mut p = armed_player(MAX_ENHANCEMENT_LEVEL);
        assert_eq!(
            attempt_enhancement(&mut p, EquipmentSlot::Weapon, &mut record, &mut rng, &mut log),
            EnhancementOutcome::MaxLevel
        );
        assert_eq!(
            attempt_enhancement(&mut p, EquipmentSlot::Armor, &mut record, &mut rng, &mut log),
            EnhancementOutcome::NothingEquipped
        );
    }
}
