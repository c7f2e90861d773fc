//! Static item data: base templates, quality bonus pools, dungeon affixes
//! and their set bonuses.

use super::types::{AffixId, EquipmentSlot, ItemStats, ItemTemplate, Rarity};

const Z: ItemStats = ItemStats::ZERO;

const fn weapon(name: &'static str, atk: u32) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: EquipmentSlot::Weapon,
        stats: ItemStats { atk, ..Z },
    }
}

const fn armor(name: &'static str, def: u32) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: EquipmentSlot::Armor,
        stats: ItemStats { def, ..Z },
    }
}

const fn amulet(name: &'static str, stats: ItemStats) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: EquipmentSlot::Amulet,
        stats,
    }
}

pub static ITEM_TEMPLATES: [ItemTemplate; 21] = [
    weapon("Bronze Sword", 3),
    weapon("Steel Sword", 6),
    weapon("Pharaoh's Scimitar", 8),
    weapon("Scarab Battleaxe", 10),
    weapon("Sword of Horus", 12),
    weapon("Scythe of Anubis", 15),
    weapon("Spear of Ra", 18),
    armor("Leather Armor", 2),
    armor("Steel Plate", 5),
    armor("Desert Robe", 3),
    armor("Pharaoh's Breastplate", 7),
    armor("Scarab Mail", 9),
    armor("Golden Armor", 12),
    armor("Temple Guard Armor", 15),
    amulet("Luck Charm", ItemStats { luck_gold: 1, ..Z }),
    amulet("Battle Charm", ItemStats { luck_combat: 1, ..Z }),
    amulet("Scarab Pendant", ItemStats { luck_gold: 2, ..Z }),
    amulet("Eye of Horus", ItemStats { luck_combat: 2, ..Z }),
    amulet("Charm of Life", ItemStats { max_hp_bonus: 20, ..Z }),
    amulet("Charm of Strength", ItemStats { atk: 3, ..Z }),
    amulet("Charm of Warding", ItemStats { def: 3, ..Z }),
];

static WEAPON_RARE: [ItemStats; 6] = [
    ItemStats { crit_rate: 5, ..Z },
    ItemStats { crit_rate: 8, ..Z },
    ItemStats { combo_rate: 8, ..Z },
    ItemStats { combo_rate: 12, ..Z },
    ItemStats { skill_power: 10, ..Z },
    ItemStats { skill_power: 15, ..Z },
];

static WEAPON_EPIC: [ItemStats; 5] = [
    ItemStats { crit_rate: 10, combo_rate: 15, ..Z },
    ItemStats { crit_rate: 12, skill_power: 20, ..Z },
    ItemStats { combo_rate: 18, skill_power: 25, ..Z },
    ItemStats { crit_rate: 15, combo_rate: 20, ..Z },
    ItemStats { skill_power: 30, combo_rate: 15, ..Z },
];

static WEAPON_LEGENDARY: [ItemStats; 5] = [
    ItemStats { crit_rate: 20, combo_rate: 25, skill_power: 35, atk: 8, ..Z },
    ItemStats { crit_rate: 25, combo_rate: 30, skill_power: 40, dodge_rate: 10, ..Z },
    ItemStats { crit_rate: 22, combo_rate: 28, atk: 10, max_hp_bonus: 30, ..Z },
    ItemStats { skill_power: 50, crit_rate: 18, combo_rate: 22, luck_combat: 3, ..Z },
    ItemStats { combo_rate: 35, crit_rate: 20, skill_power: 30, stamina_bonus: 25, ..Z },
];

static ARMOR_RARE: [ItemStats; 6] = [
    ItemStats { max_hp_bonus: 15, ..Z },
    ItemStats { max_hp_bonus: 20, ..Z },
    ItemStats { stamina_bonus: 10, ..Z },
    ItemStats { stamina_bonus: 15, ..Z },
    ItemStats { dodge_rate: 5, ..Z },
    ItemStats { dodge_rate: 8, ..Z },
];

static ARMOR_EPIC: [ItemStats; 5] = [
    ItemStats { max_hp_bonus: 30, stamina_bonus: 20, ..Z },
    ItemStats { max_hp_bonus: 25, dodge_rate: 10, ..Z },
    ItemStats { stamina_bonus: 25, dodge_rate: 12, ..Z },
    ItemStats { max_hp_bonus: 40, dodge_rate: 8, ..Z },
    ItemStats { dodge_rate: 15, stamina_bonus: 30, ..Z },
];

static ARMOR_LEGENDARY: [ItemStats; 5] = [
    ItemStats { max_hp_bonus: 60, stamina_bonus: 40, dodge_rate: 18, def: 8, ..Z },
    ItemStats { max_hp_bonus: 50, dodge_rate: 20, stamina_bonus: 35, luck_combat: 2, ..Z },
    ItemStats { dodge_rate: 25, max_hp_bonus: 45, def: 10, stamina_bonus: 30, ..Z },
    ItemStats { stamina_bonus: 50, max_hp_bonus: 55, dodge_rate: 15, atk: 5, ..Z },
    ItemStats { max_hp_bonus: 70, dodge_rate: 18, stamina_bonus: 35, skill_power: 15, ..Z },
];

static AMULET_RARE: [ItemStats; 5] = [
    ItemStats { luck_combat: 1, ..Z },
    ItemStats { luck_gold: 1, ..Z },
    ItemStats { max_hp_bonus: 15, ..Z },
    ItemStats { atk: 2, ..Z },
    ItemStats { def: 2, ..Z },
];

static AMULET_EPIC: [ItemStats; 5] = [
    ItemStats { luck_combat: 2, luck_gold: 2, ..Z },
    ItemStats { luck_combat: 2, max_hp_bonus: 25, ..Z },
    ItemStats { luck_gold: 2, atk: 4, ..Z },
    ItemStats { atk: 5, def: 5, ..Z },
    ItemStats { max_hp_bonus: 35, def: 3, ..Z },
];

static AMULET_LEGENDARY: [ItemStats; 5] = [
    ItemStats { luck_combat: 4, luck_gold: 4, atk: 6, def: 6, ..Z },
    ItemStats { luck_combat: 3, max_hp_bonus: 50, atk: 8, crit_rate: 12, ..Z },
    ItemStats { luck_gold: 4, atk: 10, def: 8, skill_power: 20, ..Z },
    ItemStats { atk: 12, def: 10, max_hp_bonus: 40, dodge_rate: 12, ..Z },
    ItemStats { max_hp_bonus: 60, luck_combat: 3, luck_gold: 3, stamina_bonus: 30, ..Z },
];

/// Quality bonus pool for a slot and rarity. Excellent shares the rare pool.
pub fn quality_pool(slot: EquipmentSlot, rarity: Rarity) -> &'static [ItemStats] {
    match (slot, rarity) {
        (_, Rarity::Common) => &[],
        (EquipmentSlot::Weapon, Rarity::Rare | Rarity::Excellent) => &WEAPON_RARE,
        (EquipmentSlot::Weapon, Rarity::Epic) => &WEAPON_EPIC,
        (EquipmentSlot::Weapon, Rarity::Legendary) => &WEAPON_LEGENDARY,
        (EquipmentSlot::Armor, Rarity::Rare | Rarity::Excellent) => &ARMOR_RARE,
        (EquipmentSlot::Armor, Rarity::Epic) => &ARMOR_EPIC,
        (EquipmentSlot::Armor, Rarity::Legendary) => &ARMOR_LEGENDARY,
        (EquipmentSlot::Amulet, Rarity::Rare | Rarity::Excellent) => &AMULET_RARE,
        (EquipmentSlot::Amulet, Rarity::Epic) => &AMULET_EPIC,
        (EquipmentSlot::Amulet, Rarity::Legendary) => &AMULET_LEGENDARY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffixInfo {
    pub name: &'static str,
    pub color: &'static str,
    pub bonus: ItemStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBonus {
    pub affix: AffixId,
    pub name: &'static str,
    pub effects: ItemStats,
}

impl AffixId {
    pub const ALL: [AffixId; 6] = [
        AffixId::Ra,
        AffixId::Anubis,
        AffixId::Osiris,
        AffixId::Horus,
        AffixId::Isis,
        AffixId::Thoth,
    ];

    pub fn info(&self) -> AffixInfo {
        match self {
            AffixId::Ra => AffixInfo {
                name: "Sunlit",
                color: "#FFD700",
                bonus: ItemStats { atk: 3, crit_rate: 8, ..Z },
            },
            AffixId::Anubis => AffixInfo {
                name: "Jackal's",
                color: "#8B4513",
                bonus: ItemStats { def: 3, max_hp_bonus: 30, ..Z },
            },
            AffixId::Osiris => AffixInfo {
                name: "Reborn",
                color: "#00CED1",
                bonus: ItemStats { max_hp_bonus: 40, stamina_bonus: 20, ..Z },
            },
            AffixId::Horus => AffixInfo {
                name: "Falcon's",
                color: "#4169E1",
                bonus: ItemStats { atk: 4, combo_rate: 12, ..Z },
            },
            AffixId::Isis => AffixInfo {
                name: "Enchanted",
                color: "#DA70D6",
                bonus: ItemStats { luck_combat: 2, luck_gold: 2, ..Z },
            },
            AffixId::Thoth => AffixInfo {
                name: "Scholar's",
                color: "#32CD32",
                bonus: ItemStats { skill_power: 20, dodge_rate: 10, ..Z },
            },
        }
    }

    /// The three-piece bundle granted by a full matching set.
    pub fn set_bonus(&self) -> SetBonus {
        let (name, effects) = match self {
            AffixId::Ra => (
                "Glory of the Sun God",
                ItemStats { atk: 10, crit_rate: 15, skill_power: 25, ..Z },
            ),
            AffixId::Anubis => (
                "Guardian of the Underworld",
                ItemStats { def: 10, max_hp_bonus: 80, dodge_rate: 15, ..Z },
            ),
            AffixId::Osiris => (
                "Eternal Rebirth",
                ItemStats { max_hp_bonus: 100, stamina_bonus: 50, def: 8, ..Z },
            ),
            AffixId::Horus => (
                "Eye of the Sky",
                ItemStats { atk: 12, combo_rate: 20, crit_rate: 12, ..Z },
            ),
            AffixId::Isis => (
                "Grace of the Goddess",
                ItemStats { luck_combat: 4, luck_gold: 4, max_hp_bonus: 50, ..Z },
            ),
            AffixId::Thoth => (
                "Wisdom of the Scribe",
                ItemStats { skill_power: 40, dodge_rate: 20, stamina_bonus: 30, ..Z },
            ),
        };
        SetBonus {
            affix: *self,
            name,
            effects,
        }
    }
}
