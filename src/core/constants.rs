// Player starting state
pub const START_HP: u32 = 100;
pub const START_STAMINA: u32 = 50;
pub const START_POTIONS: u32 = 2;
pub const START_GOLD: u64 = 500;

// XP and leveling
pub const XP_BASE: f64 = 100.0;
pub const XP_CURVE: f64 = 1.06;
pub const MAX_LEVEL: u32 = 99;
pub const LEVEL_UP_MAX_HP: u32 = 10;
pub const LEVEL_UP_MAX_STAMINA: u32 = 5;

// Map progression
pub const DEFAULT_MAP_GOAL: u32 = 30;
pub const MAP_GOAL_INCREMENT: u32 = 5;
pub const PYRAMID_MAX_STEPS: u32 = 8;
pub const EARLY_GAME_GUARD_STEPS: u32 = 10;
pub const DIRECTION_COUNT: usize = 3;
pub const BRANCH_CHANCE: f64 = 0.3;
pub const SECOND_BRANCH_CHANCE: f64 = 0.1;
pub const REST_STOP_FORCE_PROGRESS: f64 = 0.6;
pub const REST_STOP_CHANCE_PROGRESS: f64 = 0.3;
pub const REST_STOP_CHANCE: f64 = 0.4;

// Battle multipliers (outside / inside the pyramid)
pub const NORMAL_HP_MULT: f64 = 2.0;
pub const NORMAL_ATK_MULT: f64 = 1.0;
pub const NORMAL_STRENGTH_MULT: f64 = 1.5;
pub const PYRAMID_HP_MULT: f64 = 3.0;
pub const PYRAMID_ATK_MULT: f64 = 2.5;
pub const PYRAMID_STRENGTH_MULT: f64 = 1.5;
pub const PYRAMID_HP_SCALE_PER_DIFF: f64 = 0.5;
pub const PYRAMID_ATK_SCALE_PER_DIFF: f64 = 0.3;
pub const PYRAMID_STRENGTH_SCALE_PER_DIFF: f64 = 0.2;
pub const MINI_BOSS_PYRAMID_REDUCTION: f64 = 0.8;
pub const PYRAMID_REWARD_MULTIPLIER: u64 = 15;

// Slot resolution
pub const TRIPLE_BONUS: f64 = 2.5;
pub const ENEMY_ATTACK_COUNTDOWN: i32 = 3;
pub const ENEMY_COMBO_ATTACK_SCALE: f64 = 0.3;
pub const NORMAL_ATTACK_BASE: f64 = 15.0;
pub const SKILL_ATTACK_BASE: f64 = 25.0;
pub const SHIELD_BASE: f64 = 10.0;
pub const SKULL_BASE: f64 = 10.0;
pub const GOLD_SYMBOL_BASE: f64 = 20.0;
pub const POTION_SYMBOL_HP_BASE: f64 = 90.0;
pub const POTION_SYMBOL_HP_PER_DIFF: f64 = 10.0;
pub const POTION_SYMBOL_STAMINA_BASE: f64 = 30.0;
pub const POTION_SYMBOL_STAMINA_PER_DIFF: f64 = 8.0;
pub const SKILL_STAMINA_PER_MATCH: u32 = 5;
pub const NORMAL_CRIT_MULT: f64 = 2.0;
pub const SKILL_CRIT_MULT: f64 = 2.2;

// Crit / dodge / flee
pub const CRIT_BASE: f64 = 0.08;
pub const CRIT_PER_LUCK: f64 = 0.05;
pub const CRIT_CAP: f64 = 0.75;
pub const DODGE_BASE: f64 = 0.03;
pub const DODGE_PER_LUCK: f64 = 0.02;
pub const DODGE_CAP: f64 = 0.5;
pub const FLEE_BASE: f64 = 0.4;
pub const FLEE_PER_LUCK: f64 = 0.02;
pub const FLEE_CAP: f64 = 0.9;

// Victory rewards and loot
pub const VICTORY_GOLD_PER_DIFF: u64 = 20;
pub const VICTORY_XP_PER_DIFF: f64 = 15.0;
pub const ELITE_STRENGTH_THRESHOLD: f64 = 1.6;
pub const MINI_BOSS_STRENGTH_THRESHOLD: f64 = 2.4;
pub const NORMAL_LOOT_WEIGHTS: [u32; 5] = [70, 20, 6, 3, 1];
pub const ELITE_LOOT_WEIGHTS: [u32; 5] = [15, 40, 15, 20, 10];
pub const MINI_BOSS_LOOT_WEIGHTS: [u32; 5] = [10, 50, 10, 25, 5];
pub const ELITE_DROP_CHANCE: f64 = 0.85;
pub const PYRAMID_EPIC_CHANCE: f64 = 0.3;

// Shops
pub const MERCHANT_POTION_PRICE: u64 = 50;
pub const BLACK_MARKET_OFFERS: usize = 3;
pub const BLACK_MARKET_MAX_PURCHASES: u32 = 2;
pub const BLACK_MARKET_PRICE_BASE: u64 = 149;
pub const BLACK_MARKET_PRICE_SPREAD: f64 = 880.0;
pub const BLACK_MARKET_RARITY_WEIGHTS: [u32; 5] = [40, 30, 20, 8, 2];
pub const TRADING_POST_POTION_PRICE: u64 = 200;
pub const TRADING_POST_FOOD_PRICE: u64 = 40;
pub const TRADING_POST_FOOD_HP: f64 = 30.0;
pub const TRADING_POST_FOOD_STAMINA: f64 = 15.0;
pub const TRADING_POST_HEAL_PRICE: u64 = 80;
pub const SHOP_DISCOUNT_RATE: f64 = 0.8;

// Deferred sequencing (virtual milliseconds)
pub const ENEMY_ATTACK_DELAY_MS: u64 = 300;
pub const AUTO_SPIN_INTERVAL_MS: u64 = 900;

// Presentation
pub const MESSAGE_HISTORY_LIMIT: usize = 20;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x4445_5345_5254_0001;
