use serde::{Deserialize, Serialize};

use crate::core::constants::ENEMY_ATTACK_COUNTDOWN;

/// A slot reel face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Sword,
    Lightning,
    Shield,
    Skull,
    Potion,
    Star,
    Coin,
    /// A face the engine does not recognise. Never produced by the reels.
    Unknown,
}

impl Symbol {
    /// Faces that appear on the reels, paired with their reel weights.
    pub const REEL: [(Symbol, u32); 7] = [
        (Symbol::Sword, 6),
        (Symbol::Lightning, 3),
        (Symbol::Shield, 3),
        (Symbol::Skull, 2),
        (Symbol::Potion, 2),
        (Symbol::Star, 4),
        (Symbol::Coin, 2),
    ];

    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Sword => "⚔️",
            Symbol::Lightning => "⚡️",
            Symbol::Shield => "🛡️",
            Symbol::Skull => "💀",
            Symbol::Potion => "🧪",
            Symbol::Star => "⭐",
            Symbol::Coin => "💰",
            Symbol::Unknown => "?",
        }
    }

    /// Parse a glyph, tolerating a missing variation selector.
    pub fn from_glyph(glyph: &str) -> Symbol {
        match glyph.trim_end_matches('\u{FE0F}') {
            "⚔" => Symbol::Sword,
            "⚡" => Symbol::Lightning,
            "🛡" => Symbol::Shield,
            "💀" => Symbol::Skull,
            "🧪" => Symbol::Potion,
            "⭐" => Symbol::Star,
            "💰" => Symbol::Coin,
            _ => Symbol::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Monster,
    Elite,
    MiniBoss,
}

/// Per-kind base numbers before context scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBaseStats {
    pub hp: f64,
    pub hp_per_diff: f64,
    pub atk: f64,
    pub atk_per_diff: f64,
    pub strength: f64,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Monster => "Desert Monster",
            EnemyKind::Elite => "Elite Guardian",
            EnemyKind::MiniBoss => "Tomb Warlord",
        }
    }

    pub fn base_stats(&self) -> EnemyBaseStats {
        match self {
            EnemyKind::Monster => EnemyBaseStats {
                hp: 100.0,
                hp_per_diff: 10.0,
                atk: 10.0,
                atk_per_diff: 2.0,
                strength: 1.0,
            },
            EnemyKind::Elite => EnemyBaseStats {
                hp: 150.0,
                hp_per_diff: 20.0,
                atk: 15.0,
                atk_per_diff: 5.0,
                strength: 1.6,
            },
            EnemyKind::MiniBoss => EnemyBaseStats {
                hp: 250.0,
                hp_per_diff: 40.0,
                atk: 25.0,
                atk_per_diff: 8.0,
                strength: 2.4,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    pub base_attack: u32,
    /// Rounds left until the enemy strikes on its own.
    pub turns_to_attack: i32,
    /// Context-scaled strength; drives XP.
    pub strength: f64,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn reset_countdown(&mut self) {
        self.turns_to_attack = ENEMY_ATTACK_COUNTDOWN;
    }
}

/// Battle state machine plus the combo tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub in_battle: bool,
    #[serde(default)]
    pub enemy: Option<Enemy>,
    /// Primary symbol of the previous round in this battle.
    #[serde(default)]
    pub consecutive_primary: Option<Symbol>,
    #[serde(default)]
    pub consecutive_count: u32,
    /// Set once the run is over; every battle and movement control refuses input.
    #[serde(default)]
    pub controls_locked: bool,
    /// Bumped on every battle entry and exit; deferred tasks carry a copy.
    #[serde(skip)]
    pub epoch: u64,
    #[serde(skip)]
    pub attack_pending: bool,
}

impl BattleState {
    pub fn enemy_alive(&self) -> bool {
        self.enemy.as_ref().is_some_and(Enemy::is_alive)
    }

    /// True while a round can be resolved.
    pub fn accepts_input(&self) -> bool {
        self.in_battle && !self.controls_locked && self.enemy_alive()
    }

    pub fn reset_combo(&mut self) {
        self.consecutive_primary = None;
        self.consecutive_count = 0;
    }
}

/// Outcome of a dodge/shield/hp mitigation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Dodged,
    Hit { raw: u32, absorbed: u32, damage: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    EnemyHit { damage: u32, crit: bool, skill: bool },
    ShieldGained(u32),
    Restored { hp: u32, stamina: u32 },
    LuckGained(u32),
    GoldGained(u64),
    SkullStrike(Strike),
    NoEffect,
}

/// Result of one slot round, in the same spirit as a tick result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundResult {
    pub resolved: bool,
    pub primary: Option<Symbol>,
    pub match_count: u32,
    pub combo: u32,
    pub events: Vec<CombatEvent>,
    pub enemy_defeated: bool,
    /// The enemy countdown expired; an auto-attack should be scheduled.
    pub enemy_attack_due: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VictoryRewards {
    pub gold: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
    Revived { potions_left: u32 },
    RunOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_round_trip() {
        for (symbol, _) in Symbol::REEL {
            assert_eq!(Symbol::from_glyph(symbol.glyph()), symbol);
        }
    }

    #[test]
    fn test_glyph_without_variation_selector() {
        assert_eq!(Symbol::from_glyph("⚔"), Symbol::Sword);
        assert_eq!(Symbol::from_glyph("⚡"), Symbol::Lightning);
        assert_eq!(Symbol::from_glyph("🍀"), Symbol::Unknown);
    }

    #[test]
    fn test_battle_state_accepts_input() {
        let mut battle = BattleState::default();
        assert!(!battle.accepts_input());
        battle.in_battle = true;
        battle.enemy = Some(Enemy {
            name: "x".into(),
            kind: EnemyKind::Monster,
            hp: 5,
            max_hp: 5,
            base_attack: 1,
            turns_to_attack: 3,
            strength: 1.0,
        });
        assert!(battle.accepts_input());
        battle.controls_locked = true;
        assert!(!battle.accepts_input());
    }
}
