//! The player's resource pools, inventory and equipment transitions.

use crate::core::constants::{START_GOLD, START_HP, START_POTIONS, START_STAMINA};
use crate::core::messages::MessageSink;
use crate::items::{Equipment, EquipmentSlot, Item, ItemStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    /// Transient absorb pool, consumed before hp.
    pub shield: u32,
    pub potions: u32,
    pub gold: u64,
    pub luck_combat: u32,
    pub luck_gold: u32,
    pub level: u32,
    pub xp: u64,
    /// Display order is insertion order.
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Equipment,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            hp: START_HP,
            max_hp: START_HP,
            stamina: START_STAMINA,
            max_stamina: START_STAMINA,
            shield: 0,
            potions: START_POTIONS,
            gold: START_GOLD,
            luck_combat: 0,
            luck_gold: 0,
            level: 1,
            xp: 0,
            inventory: Vec::new(),
            equipment: Equipment::new(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Heal without exceeding max hp. Returns the amount actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_stamina(&mut self, amount: u32) -> u32 {
        let before = self.stamina;
        self.stamina = self.stamina.saturating_add(amount).min(self.max_stamina);
        self.stamina - before
    }

    pub fn full_restore(&mut self) {
        self.hp = self.max_hp;
        self.stamina = self.max_stamina;
    }

    /// Lose hp, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Lose hp from an event that can hurt but never kill.
    pub fn take_nonlethal_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount).max(1);
    }

    pub fn spend_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    /// Deduct gold only if the full amount is available.
    pub fn try_spend_gold(&mut self, amount: u64) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn lose_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_sub(amount);
    }

    /// Raise max hp and heal by the same amount.
    pub fn grow_max_hp(&mut self, amount: u32) {
        self.max_hp += amount;
        self.heal(amount);
    }

    pub fn grow_max_stamina(&mut self, amount: u32) {
        self.max_stamina += amount;
        self.restore_stamina(amount);
    }

    pub fn clamp_pools(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.stamina = self.stamina.min(self.max_stamina);
    }

    /// Equip the inventory item at `index`. A displaced item goes to the end
    /// of the inventory.
    pub fn equip(&mut self, index: usize, log: &mut impl MessageSink) -> bool {
        if index >= self.inventory.len() {
            log.display("There is no item to equip there.");
            return false;
        }
        let item = self.inventory.remove(index);
        let name = item.display_name();
        self.apply_passive(&item.stats);
        if let Some(old) = self.equipment.replace(item) {
            self.remove_passive(&old.stats);
            log.display(&format!("Unequipped {}.", old.display_name()));
            self.inventory.push(old);
        }
        log.display(&format!("Equipped {}.", name));
        if let Some(set) = self.equipment.active_set_bonus() {
            log.display(&format!("Set bonus active: {}!", set.name));
        }
        true
    }

    /// Move the item in `slot` back to the end of the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot, log: &mut impl MessageSink) -> bool {
        match self.equipment.take(slot) {
            Some(item) => {
                self.remove_passive(&item.stats);
                log.display(&format!("Unequipped {}.", item.display_name()));
                self.inventory.push(item);
                true
            }
            None => {
                log.display(&format!("Nothing is equipped in the {} slot.", slot.name()));
                false
            }
        }
    }

    fn apply_passive(&mut self, stats: &ItemStats) {
        self.luck_gold += stats.luck_gold;
        self.luck_combat += stats.luck_combat;
        self.max_hp += stats.max_hp_bonus;
        self.max_stamina += stats.stamina_bonus;
    }

    fn remove_passive(&mut self, stats: &ItemStats) {
        self.luck_gold = self.luck_gold.saturating_sub(stats.luck_gold);
        self.luck_combat = self.luck_combat.saturating_sub(stats.luck_combat);
        self.max_hp = self.max_hp.saturating_sub(stats.max_hp_bonus).max(1);
        self.max_stamina = self.max_stamina.saturating_sub(stats.stamina_bonus);
        self.clamp_pools();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages::MessageLog;
    use crate::items::Rarity;

    fn amulet(luck_gold: u32, max_hp_bonus: u32) -> Item {
        Item {
            name: "Luck Charm".to_string(),
            slot: EquipmentSlot::Amulet,
            rarity: Rarity::Common,
            stats: ItemStats {
                luck_gold,
                max_hp_bonus,
                ..ItemStats::ZERO
            },
            affix: None,
            is_dungeon: false,
            enhance_level: 0,
        }
    }

    #[test]
    fn test_new_player_defaults() {
        let p = Player::new();
        assert_eq!((p.hp, p.max_hp), (100, 100));
        assert_eq!((p.stamina, p.max_stamina), (50, 50));
        assert_eq!(p.potions, 2);
        assert_eq!(p.gold, 500);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut p = Player::new();
        p.hp = 90;
        assert_eq!(p.heal(50), 10);
        assert_eq!(p.hp, 100);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut p = Player::new();
        p.take_damage(500);
        assert_eq!(p.hp, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_nonlethal_damage_leaves_one() {
        let mut p = Player::new();
        p.take_nonlethal_damage(500);
        assert_eq!(p.hp, 1);
    }

    #[test]
    fn test_try_spend_gold_no_partial() {
        let mut p = Player::new();
        assert!(!p.try_spend_gold(501));
        assert_eq!(p.gold, 500);
        assert!(p.try_spend_gold(500));
        assert_eq!(p.gold, 0);
    }

    #[test]
    fn test_equip_moves_item_and_applies_passive() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        p.inventory.push(amulet(2, 20));
        assert!(p.equip(0, &mut log));
        assert!(p.inventory.is_empty());
        assert_eq!(p.luck_gold, 2);
        assert_eq!(p.max_hp, 120);
        assert_eq!(p.hp, 100);
    }

    #[test]
    fn test_equip_displaced_item_returns_to_inventory_end() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        p.inventory.push(amulet(1, 0));
        p.inventory.push(amulet(3, 0));
        p.equip(0, &mut log);
        p.equip(0, &mut log);
        assert_eq!(p.inventory.len(), 1);
        assert_eq!(p.inventory[0].stats.luck_gold, 1);
        assert_eq!(p.luck_gold, 3);
    }

    #[test]
    fn test_equip_invalid_index_is_ignored() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        assert!(!p.equip(3, &mut log));
        assert!(log.contains("no item"));
    }

    #[test]
    fn test_unequip_pushes_to_end_and_clamps() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        p.inventory.push(amulet(0, 20));
        p.equip(0, &mut log);
        p.hp = 120;
        p.inventory.push(amulet(5, 0));
        assert!(p.unequip(EquipmentSlot::Amulet, &mut log));
        assert_eq!(p.inventory.len(), 2);
        assert_eq!(p.inventory[1].stats.max_hp_bonus, 20);
        assert_eq!(p.max_hp, 100);
        assert_eq!(p.hp, 100);
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut log = MessageLog::default();
        let mut p = Player::new();
        assert!(!p.unequip(EquipmentSlot::Weapon, &mut log));
        assert!(log.contains("Nothing is equipped"));
    }
}
