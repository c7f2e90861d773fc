//! Branch events: secondary effects overlaid on a direction's main event.

use super::context::{Encounter, EncounterCtx};
use super::registry::EventId;
use crate::combat::EnemyKind;
use crate::core::messages::MessageSink;
use crate::core::rng::roll;
use crate::items::{generate_item, Rarity};
use rand::Rng;

/// Fallback list for main events without their own branches.
pub const GENERIC_BRANCHES: &[&str] = &["random_event"];

/// Candidate branches keyed by the main event.
pub fn branch_table(main: EventId) -> &'static [&'static str] {
    match main {
        EventId::Monster => &["ambush", "treasure_drop", "ally_join", "escape_route"],
        EventId::Elite => &["epic_loot", "curse", "power_surge", "boss_insight"],
        EventId::MiniBoss => &["legendary_loot", "god_blessing", "ancient_power", "hidden_passage"],
        EventId::Merchant => &["discount", "rare_item", "trade_quest", "caravan_info"],
        EventId::BlackMarket => &["stolen_goods", "black_contract", "smuggler_route", "forbidden_item"],
        EventId::Oasis => &["healing_spring", "hidden_treasure", "desert_guide", "oasis_blessing"],
        EventId::Sandstorm => &["lost_items", "shelter_find", "storm_vision", "sand_curse"],
        EventId::Pyramid => &["secret_chamber", "pharaoh_curse", "divine_trial", "treasure_vault"],
        EventId::AncientShrine => &["god_trial", "divine_gift", "ancient_wisdom", "curse_removal"],
        EventId::BuriedTreasure => &["trap_avoid", "double_loot", "treasure_map", "curse_item"],
        EventId::DeadTraveler => &["dying_wish", "revenge_quest", "inherited_skill", "cursed_item"],
        EventId::CaravanRest => &["trade_opportunity", "rest_bonus", "caravan_quest", "guide_hire"],
        EventId::Empty => &["mirage", "buried_cache", "desert_spirit", "quicksand"],
        _ => GENERIC_BRANCHES,
    }
}

/// Apply one branch by name. Names without a dedicated effect produce a
/// generic message. `allow_battle` is false when the main event already
/// started a battle or opened a panel.
pub fn apply_branch<R: Rng, S: MessageSink>(
    name: &str,
    allow_battle: bool,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> Encounter {
    let d = ctx.difficulty() as u64;
    match name {
        "ambush" => {
            ctx.say("Branch: an ambush!");
            if allow_battle {
                return Encounter::Battle(EnemyKind::Monster);
            }
            ctx.say("The ambushers lose track of you.");
        }
        "treasure_drop" => {
            ctx.say("Branch: something falls from the enemy's pack.");
            let gold = (50.0 * d as f64 * (1.0 + roll(ctx.rng))).floor() as u64;
            ctx.gain_gold(gold);
        }
        "epic_loot" => {
            ctx.say("Branch: epic loot!");
            ctx.gain_item(Rarity::Epic);
        }
        "curse" => {
            ctx.player.max_hp = ((ctx.player.max_hp as f64 * 0.9).floor() as u32).max(1);
            ctx.player.clamp_pools();
            ctx.say(&format!("Branch: a curse! Max HP is now {}.", ctx.player.max_hp));
        }
        "legendary_loot" => {
            ctx.say("Branch: a legendary hoard!");
            ctx.gain_item(Rarity::Epic);
            ctx.gain_gold(200 * d);
        }
        "hidden_passage" => {
            if ctx.world.in_pyramid() {
                ctx.world.dungeon.pyramid_steps += 3;
            } else {
                ctx.world.map.map_steps += 3;
            }
            ctx.say("Branch: a hidden passage carries you 3 steps ahead.");
        }
        "healing_spring" => {
            ctx.player.hp = ctx.player.max_hp;
            ctx.say("Branch: a healing spring restores your HP.");
        }
        "hidden_treasure" => {
            ctx.say("Branch: hidden treasure!");
            ctx.gain_gold(100 * d);
            ctx.gain_item(Rarity::Rare);
        }
        "desert_guide" => {
            ctx.world.buffs.compass_effect = 2;
            ctx.say("Branch: a desert guide shares what lies ahead for the next 2 hints.");
        }
        "oasis_blessing" => {
            ctx.world.buffs.oasis_blessing = 3;
            ctx.say("Branch: the oasis blesses you for the next 3 moves.");
        }
        "secret_chamber" => {
            ctx.say("Branch: a secret chamber full of gold!");
            ctx.gain_gold(300 * d);
        }
        "double_loot" => {
            ctx.say("Branch: double loot!");
            ctx.gain_gold(200 * d);
        }
        "curse_item" => {
            let mut item = generate_item(Rarity::Epic, false, ctx.rng);
            item.name = format!("Cursed {}", item.name);
            ctx.say(&format!("Branch: you pick up {}.", item.display_name()));
            ctx.player.inventory.push(item);
        }
        "quicksand" => {
            let loss = 50 * d;
            ctx.player.lose_gold(loss);
            ctx.say(&format!("Branch: quicksand swallows some of your gold (-{}).", loss));
        }
        "discount" => {
            ctx.world.buffs.shop_discount = true;
            ctx.say("Branch: a merchant promises you a discount at the next trading post.");
        }
        other => {
            tracing::debug!(branch = other, "branch without a dedicated effect");
            ctx.say(&format!("Branch: a special event ({}).", other.replace('_', " ")));
        }
    }
    Encounter::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Player;
    use crate::core::game_state::WorldState;
    use crate::core::messages::MessageLog;
    use crate::core::rng::ScriptedRng;

    fn apply(name: &str, allow_battle: bool, player: &mut Player, world: &mut WorldState) -> (Encounter, MessageLog) {
        let mut rng = ScriptedRng::constant(0.0);
        let mut log = MessageLog::default();
        let e = {
            let mut ctx = EncounterCtx::new(player, world, &mut rng, &mut log);
            apply_branch(name, allow_battle, &mut ctx)
        };
        (e, log)
    }

    #[test]
    fn test_branch_table_fallback() {
        assert_eq!(branch_table(EventId::Mirage), GENERIC_BRANCHES);
        assert_eq!(branch_table(EventId::Monster).len(), 4);
        assert!(branch_table(EventId::Oasis).contains(&"desert_guide"));
    }

    #[test]
    fn test_ambush_respects_battle_guard() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        assert_eq!(
            apply("ambush", true, &mut p, &mut w).0,
            Encounter::Battle(EnemyKind::Monster)
        );
        assert_eq!(apply("ambush", false, &mut p, &mut w).0, Encounter::Resolved);
    }

    #[test]
    fn test_curse_reduces_max_hp() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        apply("curse", true, &mut p, &mut w);
        assert_eq!(p.max_hp, 90);
        assert_eq!(p.hp, 90);
    }

    #[test]
    fn test_hidden_passage_targets_current_map() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        apply("hidden_passage", true, &mut p, &mut w);
        assert_eq!(w.map.map_steps, 3);
        w.dungeon.enter(3);
        apply("hidden_passage", true, &mut p, &mut w);
        assert_eq!(w.dungeon.pyramid_steps, 3);
        assert_eq!(w.map.map_steps, 3);
    }

    #[test]
    fn test_gold_branches_scale_with_difficulty() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        w.map.difficulty = 2;
        apply("secret_chamber", true, &mut p, &mut w);
        assert_eq!(p.gold, 1100);
        apply("quicksand", true, &mut p, &mut w);
        assert_eq!(p.gold, 1000);
    }

    #[test]
    fn test_buff_branches() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        apply("desert_guide", true, &mut p, &mut w);
        apply("oasis_blessing", true, &mut p, &mut w);
        assert_eq!(w.buffs.compass_effect, 2);
        assert_eq!(w.buffs.oasis_blessing, 3);
    }

    #[test]
    fn test_unknown_branch_is_special_event() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        let (e, log) = apply("storm_vision", true, &mut p, &mut w);
        assert_eq!(e, Encounter::Resolved);
        assert!(log.contains("special event"));
    }
}
