//! Slot-round resolution, enemy AI and battle outcomes.

use super::types::*;
use crate::character::{add_xp, Player};
use crate::core::constants::*;
use crate::core::messages::MessageSink;
use crate::core::rng::{chance, pick_weighted};
use crate::items::{roll_loot, Item, LootTable};
use rand::Rng;

/// Build a fresh enemy for the current context.
pub fn create_enemy(kind: EnemyKind, difficulty: u32, in_pyramid: bool) -> Enemy {
    let base = kind.base_stats();
    let d = difficulty as f64;
    let (mut hp_mult, mut atk_mult, mut strength_mult) = if in_pyramid {
        (
            PYRAMID_HP_MULT + d * PYRAMID_HP_SCALE_PER_DIFF,
            PYRAMID_ATK_MULT + d * PYRAMID_ATK_SCALE_PER_DIFF,
            PYRAMID_STRENGTH_MULT + d * PYRAMID_STRENGTH_SCALE_PER_DIFF,
        )
    } else {
        (NORMAL_HP_MULT, NORMAL_ATK_MULT, NORMAL_STRENGTH_MULT)
    };
    if in_pyramid && kind == EnemyKind::MiniBoss {
        hp_mult *= MINI_BOSS_PYRAMID_REDUCTION;
        atk_mult *= MINI_BOSS_PYRAMID_REDUCTION;
        strength_mult *= MINI_BOSS_PYRAMID_REDUCTION;
    }
    let max_hp = ((base.hp + base.hp_per_diff * d) * hp_mult).floor() as u32;
    Enemy {
        name: kind.name().to_string(),
        kind,
        hp: max_hp,
        max_hp,
        base_attack: ((base.atk + base.atk_per_diff * d) * atk_mult).floor() as u32,
        turns_to_attack: ENEMY_ATTACK_COUNTDOWN,
        strength: base.strength * strength_mult,
    }
}

/// Length of the left-anchored run of the first symbol.
pub fn match_count(symbols: &[Symbol; 3]) -> u32 {
    let primary = symbols[0];
    if symbols[1] != primary {
        1
    } else if symbols[2] != primary {
        2
    } else {
        3
    }
}

pub fn triple_bonus(match_count: u32) -> f64 {
    if match_count == 3 {
        TRIPLE_BONUS
    } else {
        1.0
    }
}

/// `max(1, round(round(base * match * triple) * combo))`, rounding half away
/// from zero.
pub fn scaled_value(base: f64, match_count: u32, triple: f64, combo: u32) -> u32 {
    let value = (base * match_count as f64 * triple).round();
    ((value * combo as f64).round() as u32).max(1)
}

pub fn crit_chance(luck_combat: u32, crit_rate: u32) -> f64 {
    (CRIT_BASE + CRIT_PER_LUCK * luck_combat as f64 + crit_rate as f64 / 100.0).min(CRIT_CAP)
}

pub fn dodge_chance(luck_combat: u32, dodge_rate: u32) -> f64 {
    (DODGE_BASE + DODGE_PER_LUCK * luck_combat as f64 + dodge_rate as f64 / 100.0).min(DODGE_CAP)
}

pub fn flee_chance(luck_combat: u32) -> f64 {
    (FLEE_BASE + FLEE_PER_LUCK * luck_combat as f64).min(FLEE_CAP)
}

/// Draw three reel faces by weight.
pub fn spin_reels(rng: &mut impl Rng) -> [Symbol; 3] {
    let weights: Vec<u32> = Symbol::REEL.iter().map(|(_, w)| *w).collect();
    [
        spin_reel(rng, &weights),
        spin_reel(rng, &weights),
        spin_reel(rng, &weights),
    ]
}

fn spin_reel(rng: &mut impl Rng, weights: &[u32]) -> Symbol {
    pick_weighted(rng, weights)
        .map(|idx| Symbol::REEL[idx].0)
        .unwrap_or(Symbol::Sword)
}

/// Dodge, then shield absorption, then hp loss. A dodge spends one point
/// of combat luck when there is any.
pub fn strike_player(
    player: &mut Player,
    raw: u32,
    rng: &mut impl Rng,
    log: &mut impl MessageSink,
) -> Strike {
    let dodge_rate = player.equipment.combat_stats().dodge_rate;
    if chance(rng, dodge_chance(player.luck_combat, dodge_rate)) {
        if player.luck_combat > 0 {
            player.luck_combat -= 1;
            log.display(&format!(
                "You dodged the attack! Combat luck -1 ({} left).",
                player.luck_combat
            ));
        } else {
            log.display("You dodged the attack!");
        }
        return Strike::Dodged;
    }
    let absorbed = player.shield.min(raw);
    player.shield -= absorbed;
    let damage = raw - absorbed;
    player.take_damage(damage);
    log.display(&format!(
        "Took {} damage ({} absorbed by shield, {} to HP).",
        raw, absorbed, damage
    ));
    Strike::Hit {
        raw,
        absorbed,
        damage,
    }
}

/// Apply one round of three slot symbols.
///
/// The player's effect resolves completely first. Then the combo tracker
/// updates and the enemy countdown ticks; an expired countdown is reported
/// through `enemy_attack_due` so the caller can defer the attack.
pub fn resolve_round(
    player: &mut Player,
    battle: &mut BattleState,
    difficulty: u32,
    symbols: [Symbol; 3],
    rng: &mut impl Rng,
    log: &mut impl MessageSink,
) -> RoundResult {
    if !battle.accepts_input() {
        log.display("There is nothing to fight right now.");
        return RoundResult::default();
    }

    let primary = symbols[0];
    let matches = match_count(&symbols);
    let triple = triple_bonus(matches);
    let combo = if battle.consecutive_primary == Some(primary) {
        battle.consecutive_count + 1
    } else {
        1
    };
    log.display(&format!(
        "Primary {} x{}{}, combo x{}",
        primary.glyph(),
        matches,
        if matches == 3 { " (triple bonus x2.5)" } else { "" },
        combo
    ));

    let event = apply_symbol(player, battle, difficulty, primary, matches, triple, combo, rng, log);

    battle.consecutive_primary = Some(primary);
    battle.consecutive_count = combo;

    let mut result = RoundResult {
        resolved: true,
        primary: Some(primary),
        match_count: matches,
        combo,
        events: vec![event],
        ..Default::default()
    };

    if let Some(enemy) = battle.enemy.as_mut() {
        enemy.turns_to_attack -= 1;
        if enemy.is_alive() {
            result.enemy_attack_due = enemy.turns_to_attack <= 0;
        } else {
            result.enemy_defeated = true;
        }
    }
    result
}

#[allow(clippy::too_many_arguments)]
fn apply_symbol(
    player: &mut Player,
    battle: &mut BattleState,
    difficulty: u32,
    primary: Symbol,
    matches: u32,
    triple: f64,
    combo: u32,
    rng: &mut impl Rng,
    log: &mut impl MessageSink,
) -> CombatEvent {
    let stats = player.equipment.combat_stats();
    match primary {
        Symbol::Sword => {
            let base = scaled_value(NORMAL_ATTACK_BASE, matches, triple, combo) + stats.weapon_atk;
            let crit = chance(rng, crit_chance(player.luck_combat, stats.crit_rate));
            let damage = if crit {
                (base as f64 * NORMAL_CRIT_MULT).floor() as u32
            } else {
                base
            };
            hit_enemy(battle, damage);
            log.display(&format!(
                "Attack x{}{} deals {} damage!",
                matches,
                if crit { " CRITICAL" } else { "" },
                damage
            ));
            CombatEvent::EnemyHit {
                damage,
                crit,
                skill: false,
            }
        }
        Symbol::Lightning => {
            let raw = scaled_value(SKILL_ATTACK_BASE, matches, triple, combo) + stats.weapon_atk;
            let base = (raw as f64 * (1.0 + stats.skill_power as f64 / 100.0)).floor() as u32;
            let crit = chance(rng, crit_chance(player.luck_combat, stats.crit_rate));
            let damage = if crit {
                (base as f64 * SKILL_CRIT_MULT).floor() as u32
            } else {
                base
            };
            hit_enemy(battle, damage);
            let cost = SKILL_STAMINA_PER_MATCH * matches;
            player.spend_stamina(cost);
            log.display(&format!(
                "Skill x{}{} deals {} damage! (stamina -{})",
                matches,
                if crit { " CRITICAL" } else { "" },
                damage,
                cost
            ));
            CombatEvent::EnemyHit {
                damage,
                crit,
                skill: true,
            }
        }
        Symbol::Shield => {
            let gain = scaled_value(SHIELD_BASE, matches, triple, combo);
            player.shield += gain;
            log.display(&format!("Shield +{} (combo x{}).", gain, combo));
            CombatEvent::ShieldGained(gain)
        }
        Symbol::Potion => {
            let d = difficulty as f64;
            let hp_base = POTION_SYMBOL_HP_BASE + POTION_SYMBOL_HP_PER_DIFF * d;
            let stamina_base = POTION_SYMBOL_STAMINA_BASE + POTION_SYMBOL_STAMINA_PER_DIFF * d;
            let hp = scaled_value(hp_base, matches, triple, combo);
            let stamina = scaled_value(stamina_base, matches, triple, combo);
            player.heal(hp);
            player.restore_stamina(stamina);
            log.display(&format!("Recovered {} HP and {} stamina.", hp, stamina));
            CombatEvent::Restored { hp, stamina }
        }
        Symbol::Star => {
            let gain = (matches as f64 * triple).round() as u32;
            player.luck_combat += gain;
            log.display(&format!("Combat luck +{}.", gain));
            CombatEvent::LuckGained(gain)
        }
        Symbol::Skull => {
            let raw = (SKULL_BASE * matches as f64 * triple).round() as u32;
            CombatEvent::SkullStrike(strike_player(player, raw, rng, log))
        }
        Symbol::Coin => {
            let gold = scaled_value(GOLD_SYMBOL_BASE, matches, triple, combo) as u64;
            player.gold += gold;
            log.display(&format!("Gold +{} (combo x{}).", gold, combo));
            CombatEvent::GoldGained(gold)
        }
        Symbol::Unknown => {
            log.display("That symbol has no effect.");
            CombatEvent::NoEffect
        }
    }
}

fn hit_enemy(battle: &mut BattleState, damage: u32) {
    if let Some(enemy) = battle.enemy.as_mut() {
        enemy.take_damage(damage);
    }
}

/// The enemy's own attack, scaled up by the player's current combo streak.
/// Does nothing unless the battle is live.
pub fn enemy_auto_attack(
    player: &mut Player,
    battle: &mut BattleState,
    rng: &mut impl Rng,
    log: &mut impl MessageSink,
) -> Option<Strike> {
    if !battle.accepts_input() {
        return None;
    }
    let extra = battle.consecutive_count.saturating_sub(1) as f64 * ENEMY_COMBO_ATTACK_SCALE;
    let enemy = battle.enemy.as_mut()?;
    let raw = (enemy.base_attack as f64 * (1.0 + extra)).floor() as u32;
    enemy.reset_countdown();
    log.display(&format!("{} attacks!", enemy.name));
    Some(strike_player(player, raw, rng, log))
}

/// Reward tier from the enemy's unscaled strength: 3 for mini-boss,
/// 2 for elite, 1 otherwise. Context-scaled strength is ignored on purpose,
/// so an elite outside the pyramid (1.6 x 1.5 = 2.4) still pays elite rewards.
pub fn reward_tier(kind: EnemyKind) -> u64 {
    let strength = kind.base_stats().strength;
    if strength >= MINI_BOSS_STRENGTH_THRESHOLD {
        3
    } else if strength >= ELITE_STRENGTH_THRESHOLD {
        2
    } else {
        1
    }
}

pub fn victory_rewards(enemy: &Enemy, difficulty: u32, in_pyramid: bool) -> VictoryRewards {
    let pyramid = if in_pyramid {
        PYRAMID_REWARD_MULTIPLIER
    } else {
        1
    };
    let tier = reward_tier(enemy.kind);
    let d = difficulty as f64;
    let base_xp = (VICTORY_XP_PER_DIFF * d * enemy.strength).floor();
    let map_mult = 2f64.powi(difficulty as i32 - 1);
    VictoryRewards {
        gold: VICTORY_GOLD_PER_DIFF * difficulty as u64 * pyramid * tier,
        xp: (base_xp * map_mult * pyramid as f64 * tier as f64).floor() as u64,
    }
}

pub fn loot_table_for(kind: EnemyKind, in_pyramid: bool) -> LootTable {
    if in_pyramid {
        return LootTable::Dungeon;
    }
    match reward_tier(kind) {
        3 => LootTable::MiniBoss,
        2 => LootTable::Elite,
        _ => LootTable::Normal,
    }
}

/// Pay out gold, XP and loot for a defeated enemy. Returns the dropped items
/// after they were added to the inventory.
pub fn award_victory(
    player: &mut Player,
    enemy: &Enemy,
    difficulty: u32,
    in_pyramid: bool,
    rng: &mut impl Rng,
    log: &mut impl MessageSink,
) -> (VictoryRewards, Vec<Item>) {
    let rewards = victory_rewards(enemy, difficulty, in_pyramid);
    log.display(&format!("Victory over {}!", enemy.name));
    player.gold += rewards.gold;
    log.display(&format!("Gained {} gold and {} XP.", rewards.gold, rewards.xp));
    add_xp(player, rewards.xp, log);

    let loot = roll_loot(loot_table_for(enemy.kind, in_pyramid), rng);
    for item in &loot {
        log.display(&format!("Loot: {}", item.display_name()));
    }
    player.inventory.extend(loot.iter().cloned());
    (rewards, loot)
}

/// Check for death. With a potion left it is consumed and the player is
/// fully restored; otherwise the run is over.
pub fn resolve_death(player: &mut Player, log: &mut impl MessageSink) -> Option<DeathOutcome> {
    if !player.is_dead() {
        return None;
    }
    if player.potions > 0 {
        player.potions -= 1;
        player.full_restore();
        log.display(&format!(
            "You fell, but a potion revived you to full strength. Potions left: {}",
            player.potions
        ));
        Some(DeathOutcome::Revived {
            potions_left: player.potions,
        })
    } else {
        log.display("You have fallen with no potions left. The journey ends here.");
        Some(DeathOutcome::RunOver)
    }
}
