use super::catalog::{quality_pool, ITEM_TEMPLATES};
use super::types::{AffixId, Item, ItemStats, ItemTemplate, Rarity};
use crate::core::rng::{pick_index, pick_weighted};
use rand::Rng;

/// `max(1, round(base * scale))` for present attributes, 0 otherwise.
pub fn scale_attribute(base: u32, scale: f64) -> u32 {
    if base == 0 {
        0
    } else {
        ((base as f64 * scale).round() as u32).max(1)
    }
}

fn scale_base_stats(stats: &ItemStats, rarity: Rarity) -> ItemStats {
    let s = rarity.scale();
    ItemStats {
        atk: scale_attribute(stats.atk, s),
        def: scale_attribute(stats.def, s),
        luck_gold: scale_attribute(stats.luck_gold, s),
        luck_combat: scale_attribute(stats.luck_combat, s),
        max_hp_bonus: scale_attribute(stats.max_hp_bonus, s),
        ..*stats
    }
}

/// Build an owned item from a template.
///
/// Base attributes are scaled by rarity, then `rarity.bonus_count()`
/// quality bonuses are drawn without replacement from the slot's pool and
/// merged additively. Dungeon loot that is not common also gets one random
/// affix whose deltas are merged the same way.
pub fn clone_item(
    template: &ItemTemplate,
    rarity: Rarity,
    is_dungeon: bool,
    rng: &mut impl Rng,
) -> Item {
    let mut stats = scale_base_stats(&template.stats, rarity);

    let pool = quality_pool(template.slot, rarity);
    let mut remaining: Vec<&ItemStats> = pool.iter().collect();
    for _ in 0..rarity.bonus_count().min(pool.len()) {
        let idx = pick_index(rng, remaining.len());
        let bonus = remaining.swap_remove(idx);
        stats = stats.merged(bonus);
    }

    let mut affix = None;
    if is_dungeon && rarity != Rarity::Common {
        let id = AffixId::ALL[pick_index(rng, AffixId::ALL.len())];
        stats = stats.merged(&id.info().bonus);
        affix = Some(id);
    }

    Item {
        name: template.name.to_string(),
        slot: template.slot,
        rarity,
        stats,
        affix,
        is_dungeon: affix.is_some(),
        enhance_level: 0,
    }
}

/// Proportional pick over `[common, rare, excellent, epic, legendary]`.
/// Falls back to common when the table has no weight.
pub fn pick_weighted_rarity(weights: &[u32; 5], rng: &mut impl Rng) -> Rarity {
    pick_weighted(rng, weights)
        .map(|idx| Rarity::ALL[idx])
        .unwrap_or(Rarity::Common)
}

/// Clone a uniformly chosen template at `rarity`.
pub fn generate_item(rarity: Rarity, is_dungeon: bool, rng: &mut impl Rng) -> Item {
    let template = &ITEM_TEMPLATES[pick_index(rng, ITEM_TEMPLATES.len())];
    clone_item(template, rarity, is_dungeon, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use crate::items::types::EquipmentSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scale_attribute_floor() {
        assert_eq!(scale_attribute(0, 3.0), 0);
        assert_eq!(scale_attribute(1, 1.0), 1);
        assert_eq!(scale_attribute(1, 1.5), 2);
        assert_eq!(scale_attribute(3, 1.8), 5);
    }

    #[test]
    fn test_common_clone_copies_template() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let template = &ITEM_TEMPLATES[0];
        let item = clone_item(template, Rarity::Common, false, &mut rng);
        assert_eq!(item.stats, template.stats);
        assert_eq!(item.affix, None);
        assert!(!item.is_dungeon);
    }

    #[test]
    fn test_common_dungeon_item_has_no_affix() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let item = clone_item(&ITEM_TEMPLATES[3], Rarity::Common, true, &mut rng);
        assert_eq!(item.affix, None);
        assert!(!item.is_dungeon);
    }

    #[test]
    fn test_dungeon_item_gets_affix() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let item = clone_item(&ITEM_TEMPLATES[0], Rarity::Epic, true, &mut rng);
        assert!(item.affix.is_some());
        assert!(item.is_dungeon);
    }

    #[test]
    fn test_bonus_draws_are_without_replacement() {
        // Draw 0.0 each time: always the first remaining entry after swap_remove.
        let mut rng = ScriptedRng::constant(0.0);
        let template = ITEM_TEMPLATES
            .iter()
            .find(|t| t.slot == EquipmentSlot::Weapon)
            .copied()
            .unwrap();
        let item = clone_item(&template, Rarity::Rare, false, &mut rng);
        // pool[0] = crit 5, then pool[5] moved to index 0 = skill_power 15
        assert_eq!(item.stats.crit_rate, 5);
        assert_eq!(item.stats.skill_power, 15);
    }

    #[test]
    fn test_template_never_mutated() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let before = ITEM_TEMPLATES[6];
        for _ in 0..50 {
            let _ = clone_item(&ITEM_TEMPLATES[6], Rarity::Legendary, true, &mut rng);
        }
        assert_eq!(ITEM_TEMPLATES[6], before);
    }

    #[test]
    fn test_pick_weighted_rarity_fallback() {
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(pick_weighted_rarity(&[0, 0, 0, 0, 0], &mut rng), Rarity::Common);
        assert_eq!(pick_weighted_rarity(&[0, 0, 0, 1, 0], &mut rng), Rarity::Epic);
    }
}
