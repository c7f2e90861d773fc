use super::catalog::SetBonus;
use super::types::{EquipmentSlot, Item, ItemStats};
use serde::{Deserialize, Serialize};

/// Player equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub amulet: Option<Item>,
}

/// Combat-relevant numbers read live from equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatStats {
    pub weapon_atk: u32,
    pub crit_rate: u32,
    pub skill_power: u32,
    pub dodge_rate: u32,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Amulet => &self.amulet,
        }
    }

    pub fn get_mut(&mut self, slot: EquipmentSlot) -> Option<&mut Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_mut(),
            EquipmentSlot::Armor => self.armor.as_mut(),
            EquipmentSlot::Amulet => self.amulet.as_mut(),
        }
    }

    /// Put `item` into its slot, returning whatever was there before.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        let slot = match item.slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Amulet => &mut self.amulet,
        };
        slot.replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.take(),
            EquipmentSlot::Armor => self.armor.take(),
            EquipmentSlot::Amulet => self.amulet.take(),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.amulet]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Set bonus for three equipped items sharing the same affix and rarity.
    pub fn active_set_bonus(&self) -> Option<SetBonus> {
        let (weapon, armor, amulet) = match (&self.weapon, &self.armor, &self.amulet) {
            (Some(w), Some(a), Some(m)) => (w, a, m),
            _ => return None,
        };
        let affix = weapon.affix?;
        let same_affix = armor.affix == Some(affix) && amulet.affix == Some(affix);
        let same_rarity = armor.rarity == weapon.rarity && amulet.rarity == weapon.rarity;
        if same_affix && same_rarity {
            Some(affix.set_bonus())
        } else {
            None
        }
    }

    /// Attributes that combat reads: weapon atk/crit/skill power and armor
    /// dodge, each topped up by an active set bonus.
    pub fn combat_stats(&self) -> CombatStats {
        let set = self
            .active_set_bonus()
            .map(|b| b.effects)
            .unwrap_or(ItemStats::ZERO);
        let weapon = self.weapon.as_ref();
        CombatStats {
            weapon_atk: weapon.map(Item::atk).unwrap_or(0) + set.atk,
            crit_rate: weapon.map(|w| w.stats.crit_rate).unwrap_or(0) + set.crit_rate,
            skill_power: weapon.map(|w| w.stats.skill_power).unwrap_or(0) + set.skill_power,
            dodge_rate: self.armor.as_ref().map(|a| a.stats.dodge_rate).unwrap_or(0)
                + set.dodge_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{AffixId, Rarity};

    fn item(slot: EquipmentSlot, rarity: Rarity, affix: Option<AffixId>) -> Item {
        Item {
            name: "Test".to_string(),
            slot,
            rarity,
            stats: ItemStats {
                atk: 4,
                crit_rate: 5,
                dodge_rate: 3,
                ..ItemStats::ZERO
            },
            affix,
            is_dungeon: affix.is_some(),
            enhance_level: 0,
        }
    }

    fn full_set(affix: AffixId, rarity: Rarity) -> Equipment {
        let mut eq = Equipment::new();
        for slot in EquipmentSlot::ALL {
            eq.replace(item(slot, rarity, Some(affix)));
        }
        eq
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.combat_stats(), CombatStats::default());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut eq = Equipment::new();
        assert!(eq.replace(item(EquipmentSlot::Weapon, Rarity::Rare, None)).is_none());
        let old = eq.replace(item(EquipmentSlot::Weapon, Rarity::Epic, None));
        assert_eq!(old.map(|i| i.rarity), Some(Rarity::Rare));
    }

    #[test]
    fn test_set_bonus_requires_three_matching() {
        let eq = full_set(AffixId::Horus, Rarity::Epic);
        assert_eq!(eq.active_set_bonus().map(|b| b.affix), Some(AffixId::Horus));

        let mut partial = eq.clone();
        partial.take(EquipmentSlot::Amulet);
        assert!(partial.active_set_bonus().is_none());
    }

    #[test]
    fn test_set_bonus_requires_same_rarity() {
        let mut eq = full_set(AffixId::Ra, Rarity::Epic);
        eq.replace(item(EquipmentSlot::Armor, Rarity::Rare, Some(AffixId::Ra)));
        assert!(eq.active_set_bonus().is_none());
    }

    #[test]
    fn test_combat_stats_include_set_bonus() {
        let eq = full_set(AffixId::Ra, Rarity::Epic);
        let stats = eq.combat_stats();
        assert_eq!(stats.weapon_atk, 4 + 10);
        assert_eq!(stats.crit_rate, 5 + 15);
        assert_eq!(stats.skill_power, 25);
        assert_eq!(stats.dodge_rate, 3);
    }
}
