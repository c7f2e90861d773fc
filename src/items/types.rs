use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Amulet,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Amulet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Amulet => "Amulet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Excellent = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Selection order used by every weighted rarity table.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Excellent,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Excellent => "Excellent",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Multiplier applied to a template's base attributes.
    pub fn scale(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.8,
            Rarity::Excellent => 1.5,
            Rarity::Epic => 2.2,
            Rarity::Legendary => 3.0,
        }
    }

    /// Number of quality bonuses drawn for this rarity. Not monotonic.
    pub fn bonus_count(&self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 2,
            Rarity::Excellent => 1,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Base sell price at the trading post.
    pub fn sell_base(&self) -> u64 {
        match self {
            Rarity::Common => 20,
            Rarity::Rare => 80,
            Rarity::Excellent => 130,
            Rarity::Epic => 200,
            Rarity::Legendary => 500,
        }
    }
}

/// Every numeric attribute an item can carry. Absent attributes are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub atk: u32,
    pub def: u32,
    pub luck_gold: u32,
    pub luck_combat: u32,
    pub max_hp_bonus: u32,
    pub crit_rate: u32,
    pub combo_rate: u32,
    pub skill_power: u32,
    pub dodge_rate: u32,
    pub stamina_bonus: u32,
}

impl ItemStats {
    pub const ZERO: ItemStats = ItemStats {
        atk: 0,
        def: 0,
        luck_gold: 0,
        luck_combat: 0,
        max_hp_bonus: 0,
        crit_rate: 0,
        combo_rate: 0,
        skill_power: 0,
        dodge_rate: 0,
        stamina_bonus: 0,
    };

    /// Field-wise sum.
    pub fn merged(&self, other: &ItemStats) -> ItemStats {
        ItemStats {
            atk: self.atk + other.atk,
            def: self.def + other.def,
            luck_gold: self.luck_gold + other.luck_gold,
            luck_combat: self.luck_combat + other.luck_combat,
            max_hp_bonus: self.max_hp_bonus + other.max_hp_bonus,
            crit_rate: self.crit_rate + other.crit_rate,
            combo_rate: self.combo_rate + other.combo_rate,
            skill_power: self.skill_power + other.skill_power,
            dodge_rate: self.dodge_rate + other.dodge_rate,
            stamina_bonus: self.stamina_bonus + other.stamina_bonus,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == ItemStats::ZERO
    }
}

/// The six dungeon affixes. Each also keys a three-piece set bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixId {
    Ra,
    Anubis,
    Osiris,
    Horus,
    Isis,
    Thoth,
}

/// A base item definition. The catalog of templates is never mutated;
/// generation always produces an owned `Item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub stats: ItemStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    /// Scaled base attributes plus merged quality and affix bonuses.
    pub stats: ItemStats,
    #[serde(default)]
    pub affix: Option<AffixId>,
    #[serde(default)]
    pub is_dungeon: bool,
    #[serde(default)]
    pub enhance_level: u32,
}

impl Item {
    /// Attack including enhancement. Enhancement only scales a stat the
    /// item already has.
    pub fn atk(&self) -> u32 {
        if self.stats.atk > 0 {
            self.stats.atk + 2 * self.enhance_level
        } else {
            0
        }
    }

    /// Defense including enhancement.
    pub fn def(&self) -> u32 {
        if self.stats.def > 0 {
            self.stats.def + self.enhance_level
        } else {
            0
        }
    }

    pub fn display_name(&self) -> String {
        let mut name = String::new();
        if self.enhance_level > 0 {
            name.push_str(&format!("+{} ", self.enhance_level));
        }
        if let Some(affix) = self.affix {
            name.push_str(affix.info().name);
            name.push(' ');
        }
        name.push_str(&self.name);
        format!("{} [{}]", name, self.rarity.name())
    }

    /// Trading-post buy-back price.
    pub fn sell_price(&self) -> u64 {
        self.rarity.sell_base()
            + self.atk() as u64 * 5
            + self.def() as u64 * 5
            + self.stats.max_hp_bonus as u64 * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(atk: u32, def: u32) -> Item {
        Item {
            name: "Bronze Sword".to_string(),
            slot: EquipmentSlot::Weapon,
            rarity: Rarity::Rare,
            stats: ItemStats {
                atk,
                def,
                ..ItemStats::ZERO
            },
            affix: None,
            is_dungeon: false,
            enhance_level: 0,
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Excellent);
        assert!(Rarity::Excellent < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_bonus_count_is_asymmetric() {
        let counts: Vec<usize> = Rarity::ALL.iter().map(|r| r.bonus_count()).collect();
        assert_eq!(counts, vec![0, 2, 1, 3, 4]);
    }

    #[test]
    fn test_merged_adds_fields() {
        let a = ItemStats {
            atk: 3,
            crit_rate: 5,
            ..ItemStats::ZERO
        };
        let b = ItemStats {
            atk: 2,
            dodge_rate: 4,
            ..ItemStats::ZERO
        };
        let m = a.merged(&b);
        assert_eq!(m.atk, 5);
        assert_eq!(m.crit_rate, 5);
        assert_eq!(m.dodge_rate, 4);
    }

    #[test]
    fn test_enhancement_scales_present_stats_only() {
        let mut item = sample(10, 0);
        item.enhance_level = 3;
        assert_eq!(item.atk(), 16);
        assert_eq!(item.def(), 0);
    }

    #[test]
    fn test_sell_price() {
        let item = sample(10, 2);
        assert_eq!(item.sell_price(), 80 + 50 + 10);
    }

    #[test]
    fn test_display_name_includes_affix_and_level() {
        let mut item = sample(5, 0);
        item.affix = Some(AffixId::Ra);
        item.enhance_level = 2;
        let name = item.display_name();
        assert!(name.starts_with("+2 "));
        assert!(name.contains("Bronze Sword"));
        assert!(name.ends_with("[Rare]"));
    }
}
