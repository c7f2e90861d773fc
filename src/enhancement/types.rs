use serde::{Deserialize, Serialize};

pub const MAX_ENHANCEMENT_LEVEL: u32 = 12;
/// Target levels up to this one never fail.
pub const SAFE_ENHANCEMENT_LEVEL: u32 = 3;
pub const ENHANCEMENT_BASE_COST: f64 = 100.0;
pub const ENHANCEMENT_COST_GROWTH: f64 = 1.6;
pub const ENHANCEMENT_RATE_DROP_PER_LEVEL: f64 = 0.12;
pub const ENHANCEMENT_MIN_RATE: f64 = 0.05;
pub const ENHANCEMENT_ATK_PER_LEVEL: u32 = 2;
pub const ENHANCEMENT_DEF_PER_LEVEL: u32 = 1;

/// Run-wide enhancement counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementRecord {
    pub total_attempts: u32,
    pub total_successes: u32,
    pub total_failures: u32,
    pub highest_level_reached: u32,
}

/// Gold cost to reach `target_level`: `floor(100 * 1.6^(t-1))`.
pub fn enhancement_cost(target_level: u32) -> u64 {
    if target_level == 0 || target_level > MAX_ENHANCEMENT_LEVEL {
        return 0;
    }
    (ENHANCEMENT_BASE_COST * ENHANCEMENT_COST_GROWTH.powi(target_level as i32 - 1)).floor() as u64
}

pub fn success_rate(target_level: u32) -> f64 {
    if target_level == 0 || target_level > MAX_ENHANCEMENT_LEVEL {
        return 0.0;
    }
    if target_level <= SAFE_ENHANCEMENT_LEVEL {
        return 1.0;
    }
    let drop = (target_level - SAFE_ENHANCEMENT_LEVEL) as f64 * ENHANCEMENT_RATE_DROP_PER_LEVEL;
    (1.0 - drop).max(ENHANCEMENT_MIN_RATE)
}

/// Display prefix such as "+5 ", empty at +0.
pub fn enhancement_prefix(level: u32) -> String {
    if level == 0 {
        String::new()
    } else {
        format!("+{} ", level)
    }
}

/// Result of one attempt, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementOutcome {
    Succeeded { old_level: u32, new_level: u32, cost: u64 },
    Failed { old_level: u32, new_level: u32, cost: u64 },
    NotEnoughGold { cost: u64 },
    MaxLevel,
    NothingEquipped,
}
