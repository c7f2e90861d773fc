//! Victory loot tables.

use super::generation::{generate_item, pick_weighted_rarity};
use super::types::{Item, Rarity};
use crate::core::constants::{
    ELITE_DROP_CHANCE, ELITE_LOOT_WEIGHTS, MINI_BOSS_LOOT_WEIGHTS, NORMAL_LOOT_WEIGHTS,
    PYRAMID_EPIC_CHANCE,
};
use crate::core::rng::{chance, roll};
use rand::Rng;

/// Which loot rule applies to a won battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootTable {
    /// Guaranteed 1-2 rare/epic affixed drops.
    Dungeon,
    /// 1-2 drops from a boosted rarity table.
    MiniBoss,
    /// 85% chance of 1-2 drops.
    Elite,
    /// One roll; a common result drops nothing.
    Normal,
}

fn drop_count(rng: &mut impl Rng) -> usize {
    1 + (roll(rng) * 2.0) as usize
}

pub fn roll_loot(table: LootTable, rng: &mut impl Rng) -> Vec<Item> {
    match table {
        LootTable::Dungeon => {
            let count = drop_count(rng);
            (0..count)
                .map(|_| {
                    let rarity = if chance(rng, PYRAMID_EPIC_CHANCE) {
                        Rarity::Epic
                    } else {
                        Rarity::Rare
                    };
                    generate_item(rarity, true, rng)
                })
                .collect()
        }
        LootTable::MiniBoss => {
            let count = drop_count(rng);
            (0..count)
                .map(|_| {
                    let rarity = pick_weighted_rarity(&MINI_BOSS_LOOT_WEIGHTS, rng);
                    generate_item(rarity, false, rng)
                })
                .collect()
        }
        LootTable::Elite => {
            let count = drop_count(rng);
            if !chance(rng, ELITE_DROP_CHANCE) {
                return Vec::new();
            }
            (0..count)
                .map(|_| {
                    let rarity = pick_weighted_rarity(&ELITE_LOOT_WEIGHTS, rng);
                    generate_item(rarity, false, rng)
                })
                .collect()
        }
        LootTable::Normal => {
            let rarity = pick_weighted_rarity(&NORMAL_LOOT_WEIGHTS, rng);
            if rarity == Rarity::Common {
                Vec::new()
            } else {
                vec![generate_item(rarity, false, rng)]
            }
        }
    }
}
