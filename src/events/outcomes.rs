//! Single-step events: one weighted roll, one effect.

use super::context::{Encounter, EncounterCtx};
use crate::combat::EnemyKind;
use crate::core::constants::MERCHANT_POTION_PRICE;
use crate::core::messages::MessageSink;
use crate::core::rng::{chance, pick_index, pick_weighted, roll, roll_amount};
use crate::items::{pick_weighted_rarity, Rarity};
use rand::Rng;

/// Proportional pick over `(outcome, weight)` pairs. An unweighted table
/// yields its last outcome.
pub fn pick_outcome<T: Copy>(rng: &mut impl Rng, table: &[(T, u32)]) -> Option<T> {
    let weights: Vec<u32> = table.iter().map(|(_, w)| *w).collect();
    pick_weighted(rng, &weights)
        .or_else(|| table.len().checked_sub(1))
        .map(|idx| table[idx].0)
}

const EMPTY_LINES: [&str; 5] = [
    "Nothing but sand in every direction.",
    "The wind erases your footprints behind you.",
    "You walk on under the blazing sun.",
    "A lizard watches you pass, then darts away.",
    "The dunes stretch on quietly.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeEvent {
    Empty,
    Oasis,
    Sandstorm,
    Mirage,
    Quicksand,
    ScorpionNest,
    Merchant,
    BuriedTreasure,
    DeadTraveler,
    AncientShrine,
    EgyptianGod,
    MysteriousStranger,
    LostMerchant,
    BanditAmbush,
    DesertOasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mirage {
    RealOasis,
    Hallucination,
    RealTreasure,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sinking {
    Escape,
    Struggle,
    Sink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scorpions {
    Avoid,
    Minor,
    Serious,
    Treasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dig {
    Jackpot,
    Good,
    Poor,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Remains {
    Equipment,
    GoldAndItem,
    Gold,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shrine {
    Blessing,
    Treasure,
    Curse,
    Trap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stranger {
    Gamble,
    Gift,
    Prophecy,
    Curse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Caravan {
    Help,
    Trade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bandits {
    Negotiate,
    Fight,
    Escape,
    Intimidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spring {
    FullRest,
    Explore,
    Meditate,
}

const DEAD_TRAVELER_RARITY_WEIGHTS: [u32; 5] = [70, 20, 6, 3, 1];

impl OutcomeEvent {
    pub fn resolve<R: Rng, S: MessageSink>(self, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
        match self {
            OutcomeEvent::Empty => {
                let line = EMPTY_LINES[pick_index(ctx.rng, EMPTY_LINES.len())];
                ctx.say(line);
                Encounter::Resolved
            }
            OutcomeEvent::Oasis => {
                let scale = ctx.payout_scale();
                let hp = (20.0 * scale).floor() as u32;
                let stamina = (10.0 * scale).floor() as u32;
                ctx.player.heal(hp);
                ctx.player.restore_stamina(stamina);
                ctx.say(&format!(
                    "You found an oasis. HP +{}, stamina +{}.",
                    hp, stamina
                ));
                Encounter::Resolved
            }
            OutcomeEvent::Sandstorm => {
                ctx.player.take_damage(10);
                ctx.say("A sandstorm batters you. HP -10.");
                Encounter::Resolved
            }
            OutcomeEvent::Mirage => mirage(ctx),
            OutcomeEvent::Quicksand => quicksand(ctx),
            OutcomeEvent::ScorpionNest => scorpion_nest(ctx),
            OutcomeEvent::Merchant => {
                ctx.say(&format!(
                    "You meet a caravan selling potions ({} gold each).",
                    MERCHANT_POTION_PRICE
                ));
                if ctx.player.try_spend_gold(MERCHANT_POTION_PRICE) {
                    ctx.player.potions += 1;
                    ctx.say("Bought a potion. Potions +1.");
                } else {
                    ctx.say("Not enough gold to buy supplies.");
                }
                Encounter::Resolved
            }
            OutcomeEvent::BuriedTreasure => buried_treasure(ctx),
            OutcomeEvent::DeadTraveler => dead_traveler(ctx),
            OutcomeEvent::AncientShrine => ancient_shrine(ctx),
            OutcomeEvent::EgyptianGod => egyptian_god(ctx),
            OutcomeEvent::MysteriousStranger => mysterious_stranger(ctx),
            OutcomeEvent::LostMerchant => lost_merchant(ctx),
            OutcomeEvent::BanditAmbush => bandit_ambush(ctx),
            OutcomeEvent::DesertOasis => desert_oasis(ctx),
        }
    }
}

fn mirage<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("A shimmering mirage appears on the horizon...");
    let table = [
        (Mirage::RealOasis, 25),
        (Mirage::Hallucination, 40),
        (Mirage::RealTreasure, 20),
        (Mirage::Danger, 15),
    ];
    match pick_outcome(ctx.rng, &table) {
        Some(Mirage::RealOasis) => {
            ctx.player.full_restore();
            ctx.say("It was real! You rest at the oasis and recover fully.");
            let gold = roll_amount(ctx.rng, 30, 50) as u64;
            ctx.gain_gold(gold);
        }
        Some(Mirage::Hallucination) | None => {
            let loss = roll_amount(ctx.rng, 10, 10);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!("Just a hallucination. Stamina -{}.", loss));
        }
        Some(Mirage::RealTreasure) => {
            ctx.say("Beneath the mirage lies real treasure!");
            let gold = roll_amount(ctx.rng, 80, 120) as u64;
            ctx.gain_gold(gold);
        }
        Some(Mirage::Danger) => {
            let damage = roll_amount(ctx.rng, 15, 15);
            ctx.player.take_nonlethal_damage(damage);
            ctx.say(&format!("The mirage hid a danger. HP -{}.", damage));
        }
    }
    Encounter::Resolved
}

fn quicksand<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("The ground gives way: quicksand!");
    let table = [(Sinking::Escape, 50), (Sinking::Struggle, 30), (Sinking::Sink, 20)];
    match pick_outcome(ctx.rng, &table).unwrap_or(Sinking::Escape) {
        Sinking::Escape => {
            let loss = roll_amount(ctx.rng, 5, 10);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!("You scramble out quickly. Stamina -{}.", loss));
        }
        Sinking::Struggle => {
            let damage = roll_amount(ctx.rng, 10, 15);
            let loss = roll_amount(ctx.rng, 15, 15);
            ctx.player.take_nonlethal_damage(damage);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!(
                "You struggle free. HP -{}, stamina -{}.",
                damage, loss
            ));
        }
        Sinking::Sink => {
            let damage = roll_amount(ctx.rng, 25, 25);
            let loss = roll_amount(ctx.rng, 20, 20);
            ctx.player.take_nonlethal_damage(damage);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!(
                "You sink deep before clawing your way out. HP -{}, stamina -{}.",
                damage, loss
            ));
            if chance(ctx.rng, 0.3) {
                ctx.say("Your hand closes around something buried in the sand.");
                let gold = roll_amount(ctx.rng, 30, 50) as u64;
                ctx.gain_gold(gold);
            }
        }
    }
    Encounter::Resolved
}

fn scorpion_nest<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You stumble into a scorpion nest!");
    let table = [
        (Scorpions::Avoid, 35),
        (Scorpions::Minor, 35),
        (Scorpions::Serious, 20),
        (Scorpions::Treasure, 10),
    ];
    match pick_outcome(ctx.rng, &table).unwrap_or(Scorpions::Avoid) {
        Scorpions::Avoid => ctx.say("You back away carefully without a scratch."),
        Scorpions::Minor => {
            let damage = roll_amount(ctx.rng, 8, 12);
            ctx.player.take_nonlethal_damage(damage);
            ctx.say(&format!("A scorpion stings you. HP -{}.", damage));
        }
        Scorpions::Serious => {
            let damage = roll_amount(ctx.rng, 20, 20);
            let loss = roll_amount(ctx.rng, 10, 10);
            ctx.player.take_nonlethal_damage(damage);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!(
                "The venom burns. HP -{}, stamina -{}.",
                damage, loss
            ));
        }
        Scorpions::Treasure => {
            ctx.say("The nest was guarding an old coin pouch.");
            let gold = roll_amount(ctx.rng, 100, 150) as u64;
            ctx.gain_gold(gold);
        }
    }
    Encounter::Resolved
}

fn luck_boosted(base: u32, luck_gold: u32) -> u64 {
    (base as f64 * (1.0 + 0.15 * luck_gold as f64)).floor() as u64
}

fn buried_treasure<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You dig where the sand looks disturbed...");
    let table = [(Dig::Jackpot, 25), (Dig::Good, 35), (Dig::Poor, 30), (Dig::Nothing, 10)];
    match pick_outcome(ctx.rng, &table).unwrap_or(Dig::Nothing) {
        Dig::Jackpot => {
            let base = roll_amount(ctx.rng, 200, 300);
            ctx.say("A chest full of gold!");
            let gold = luck_boosted(base, ctx.player.luck_gold);
            ctx.gain_gold(gold);
        }
        Dig::Good => {
            let base = roll_amount(ctx.rng, 80, 120);
            let gold = luck_boosted(base, ctx.player.luck_gold);
            ctx.gain_gold(gold);
        }
        Dig::Poor => {
            let gold = roll_amount(ctx.rng, 20, 40) as u64;
            ctx.say("Only a few scattered coins.");
            ctx.gain_gold(gold);
        }
        Dig::Nothing => ctx.say("An empty jar, long since looted."),
    }
    Encounter::Resolved
}

fn dead_traveler<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You find the remains of a fallen traveler.");
    let table = [
        (Remains::Equipment, 40),
        (Remains::GoldAndItem, 20),
        (Remains::Gold, 25),
        (Remains::Nothing, 15),
    ];
    match pick_outcome(ctx.rng, &table).unwrap_or(Remains::Nothing) {
        Remains::Equipment => {
            let rarity = pick_weighted_rarity(&DEAD_TRAVELER_RARITY_WEIGHTS, ctx.rng);
            ctx.gain_item(rarity);
        }
        Remains::GoldAndItem => {
            let gold = roll_amount(ctx.rng, 50, 100) as u64;
            ctx.gain_gold(gold);
            ctx.gain_item(Rarity::Common);
        }
        Remains::Gold => {
            let gold = roll_amount(ctx.rng, 30, 70) as u64;
            ctx.gain_gold(gold);
        }
        Remains::Nothing => {
            let r = roll(ctx.rng);
            if r < 0.4 {
                ctx.say("You pay your respects. Nothing of value remains.");
            } else if r < 0.7 {
                ctx.say("Wind and sand have ruined everything.");
            } else {
                ctx.player.take_nonlethal_damage(5);
                ctx.say("Scorpion tracks surround the body. You leave carefully. HP -5.");
            }
        }
    }
    Encounter::Resolved
}

fn ancient_shrine<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You discover the ruins of an ancient shrine...");
    let table = [
        (Shrine::Blessing, 35),
        (Shrine::Treasure, 25),
        (Shrine::Curse, 20),
        (Shrine::Trap, 20),
    ];
    match pick_outcome(ctx.rng, &table).unwrap_or(Shrine::Trap) {
        Shrine::Blessing => {
            let scale = ctx.payout_scale();
            match pick_index(ctx.rng, 4) {
                0 => {
                    let gain = (30.0 * scale).floor() as u32;
                    ctx.player.grow_max_hp(gain);
                    ctx.say(&format!("The shrine blesses you. Max HP +{}.", gain));
                }
                1 => {
                    let gain = (20.0 * scale).floor() as u32;
                    ctx.player.grow_max_stamina(gain);
                    ctx.say(&format!("The shrine blesses you. Max stamina +{}.", gain));
                }
                2 => {
                    let gain = (2.0 * scale).floor() as u32;
                    ctx.player.luck_combat += gain;
                    ctx.say(&format!("The shrine blesses you. Combat luck +{}.", gain));
                }
                _ => {
                    let gain = (2.0 * scale).floor() as u32;
                    ctx.player.luck_gold += gain;
                    ctx.say(&format!("The shrine blesses you. Gold luck +{}.", gain));
                }
            }
        }
        Shrine::Treasure => {
            ctx.say("Ancient treasure lies hidden in the shrine.");
            let gold = roll_amount(ctx.rng, 100, 200) as u64;
            ctx.gain_gold(gold);
        }
        Shrine::Curse => {
            let damage = roll_amount(ctx.rng, 15, 15);
            ctx.player.take_nonlethal_damage(damage);
            ctx.say(&format!("A curse coils around you. HP -{}.", damage));
        }
        Shrine::Trap => {
            let damage = roll_amount(ctx.rng, 20, 20);
            ctx.player.take_nonlethal_damage(damage);
            ctx.say(&format!("You trigger an ancient trap! HP -{}.", damage));
        }
    }
    Encounter::Resolved
}

fn egyptian_god<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("An ancient Egyptian god appears before you.");
    if chance(ctx.rng, 0.5) {
        let gold = if ctx.player.luck_gold > 0 {
            let boosted = (50.0 * (1.0 + 0.1 * ctx.player.luck_gold as f64)).floor() as u64;
            ctx.player.luck_gold -= 1;
            ctx.say("Your gold luck draws extra favour (gold luck -1).");
            boosted
        } else {
            50
        };
        ctx.say("The god blesses you.");
        ctx.gain_gold(gold);
    } else {
        ctx.player.take_nonlethal_damage(15);
        ctx.say("The god curses you. HP -15.");
    }
    Encounter::Resolved
}

fn mysterious_stranger<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("A mysterious stranger steps out from behind a dune...");
    let table = [
        (Stranger::Gamble, 30),
        (Stranger::Gift, 30),
        (Stranger::Prophecy, 25),
        (Stranger::Curse, 15),
    ];
    match pick_outcome(ctx.rng, &table).unwrap_or(Stranger::Curse) {
        Stranger::Gamble => {
            if ctx.player.gold < 100 {
                ctx.say("\"No gold? Then we have nothing to play for.\" The stranger leaves.");
            } else if chance(ctx.rng, 0.5) {
                ctx.player.lose_gold(100);
                ctx.say("You gamble with the stranger and lose 100 gold.");
            } else {
                ctx.say("You gamble with the stranger and win!");
                ctx.gain_gold(100);
            }
        }
        Stranger::Gift => {
            let r = roll(ctx.rng);
            if r < 0.4 {
                let gold = roll_amount(ctx.rng, 80, 120) as u64;
                ctx.gain_gold(gold);
            } else if r < 0.7 {
                ctx.player.potions += 2;
                ctx.say("The stranger hands you two potions.");
            } else {
                ctx.gain_item(Rarity::Rare);
            }
        }
        Stranger::Prophecy => {
            let scale = ctx.payout_scale();
            ctx.say("The stranger speaks a prophecy...");
            match pick_index(ctx.rng, 3) {
                0 => {
                    let gain = (3.0 * scale).floor() as u32;
                    ctx.player.luck_combat += gain;
                    ctx.say(&format!("Combat luck +{}.", gain));
                }
                1 => {
                    let gain = (3.0 * scale).floor() as u32;
                    ctx.player.luck_gold += gain;
                    ctx.say(&format!("Gold luck +{}.", gain));
                }
                _ => {
                    let gain = (30.0 * scale).floor() as u32;
                    ctx.player.shield += gain;
                    ctx.say(&format!("Shield +{}.", gain));
                }
            }
        }
        Stranger::Curse => {
            ctx.say("The stranger laughs and curses you!");
            if chance(ctx.rng, 0.5) {
                let loss = (roll_amount(ctx.rng, 50, 100) as u64).min(ctx.player.gold);
                ctx.player.lose_gold(loss);
                ctx.say(&format!("Gold -{}.", loss));
            } else {
                let damage = roll_amount(ctx.rng, 20, 20);
                ctx.player.take_nonlethal_damage(damage);
                ctx.say(&format!("HP -{}.", damage));
            }
        }
    }
    Encounter::Resolved
}

fn lost_merchant<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You meet a caravan that has lost its way.");
    let d = ctx.difficulty() as f64;
    match pick_outcome(ctx.rng, &[(Caravan::Help, 60), (Caravan::Trade, 40)])
        .unwrap_or(Caravan::Trade)
    {
        Caravan::Help => {
            let gold = (150.0 * d * (1.0 + roll(ctx.rng) * 0.5)).floor() as u64;
            ctx.say("You guide them back to the trail.");
            ctx.gain_gold(gold);
            ctx.world.buffs.compass_effect = 3;
            ctx.say("They give you a desert compass: the next 3 hints reveal what lies ahead.");
        }
        Caravan::Trade => {
            let price = (120.0 * d).floor() as u64;
            let item = crate::items::generate_item(Rarity::Rare, false, ctx.rng);
            ctx.say(&format!(
                "They offer {} for only {} gold.",
                item.display_name(),
                price
            ));
            if ctx.player.try_spend_gold(price) {
                ctx.say(&format!("Bought {}.", item.display_name()));
                ctx.player.inventory.push(item);
            } else {
                ctx.say("Not enough gold. The caravan moves on.");
            }
        }
    }
    Encounter::Resolved
}

fn bandit_ambush<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("Desert bandits surround you!");
    let d = ctx.difficulty() as f64;
    if ctx.player.gold < 100 * ctx.difficulty() as u64 {
        ctx.say("Finding your purse empty, the bandits attack in anger!");
        return Encounter::Battle(EnemyKind::Elite);
    }
    let table = [
        (Bandits::Negotiate, 25),
        (Bandits::Fight, 40),
        (Bandits::Escape, 20),
        (Bandits::Intimidate, 15),
    ];
    match pick_outcome(ctx.rng, &table).unwrap_or(Bandits::Fight) {
        Bandits::Negotiate => {
            let toll = (ctx.player.gold as f64 * 0.4).floor() as u64;
            ctx.player.lose_gold(toll);
            ctx.world.buffs.bandit_info = 2;
            ctx.say(&format!(
                "You pay a toll of {} gold. The leader points you toward something good.",
                toll
            ));
            Encounter::Resolved
        }
        Bandits::Fight => {
            let loot = (300.0 * d * (1.0 + roll(ctx.rng))).floor() as u64;
            ctx.world.buffs.bandits_loot = loot;
            ctx.say("You stand and fight! Their stolen loot awaits the victor.");
            Encounter::Battle(EnemyKind::Elite)
        }
        Bandits::Escape => {
            let loss = (ctx.player.gold as f64 * 0.15).floor() as u64;
            ctx.player.lose_gold(loss);
            ctx.say(&format!("You slip away, dropping {} gold.", loss));
            Encounter::Resolved
        }
        Bandits::Intimidate => {
            if chance(ctx.rng, 0.6) {
                let gold = (150.0 * d * (1.0 + roll(ctx.rng) * 0.5)).floor() as u64;
                ctx.say("The bandits flee in terror, leaving their camp behind.");
                ctx.gain_gold(gold);
                Encounter::Resolved
            } else {
                ctx.say("The bandit leader is not impressed and challenges you!");
                Encounter::Battle(EnemyKind::Elite)
            }
        }
    }
}

fn desert_oasis<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    ctx.say("You find a hidden desert oasis.");
    let table = [(Spring::FullRest, 40), (Spring::Explore, 35), (Spring::Meditate, 25)];
    match pick_outcome(ctx.rng, &table).unwrap_or(Spring::Meditate) {
        Spring::FullRest => {
            ctx.player.full_restore();
            ctx.world.buffs.oasis_blessing = 5;
            ctx.say("You rest fully. The oasis blessing will restore you for 5 moves.");
        }
        Spring::Explore => {
            let hp = (ctx.player.max_hp as f64 * 0.6).floor() as u32;
            let stamina = (ctx.player.max_stamina as f64 * 0.6).floor() as u32;
            ctx.player.heal(hp);
            ctx.player.restore_stamina(stamina);
            ctx.say(&format!("Recovered {} HP and {} stamina.", hp, stamina));
            let gold = (200.0 * ctx.difficulty() as f64 * (1.0 + roll(ctx.rng))).floor() as u64;
            ctx.gain_gold(gold);
            let rarity = if chance(ctx.rng, 0.3) {
                Rarity::Epic
            } else {
                Rarity::Excellent
            };
            ctx.gain_item(rarity);
        }
        Spring::Meditate => {
            let hp = (ctx.player.max_hp as f64 * 0.5).floor() as u32;
            let stamina = (ctx.player.max_stamina as f64 * 0.5).floor() as u32;
            ctx.player.heal(hp);
            ctx.player.restore_stamina(stamina);
            ctx.player.luck_combat += 2;
            ctx.say(&format!(
                "You meditate. Recovered {} HP and {} stamina, combat luck +2.",
                hp, stamina
            ));
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

    fn run(event: OutcomeEvent, player: &mut Player, world: &mut WorldState, draws: Vec<f64>) -> Encounter {
        let mut rng = ScriptedRng::new(draws);
        let mut log = MessageLog::default();
        let mut ctx = EncounterCtx::new(player, world, &mut rng, &mut log);
        event.resolve(&mut ctx)
    }

    #[test]
    fn test_pick_outcome_falls_back_to_last() {
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(pick_outcome(&mut rng, &[('a', 0), ('b', 0)]), Some('b'));
        let empty: [(char, u32); 0] = [];
        assert_eq!(pick_outcome(&mut rng, &empty), None);
    }

    #[test]
    fn test_oasis_scales_with_difficulty() {
        let mut p = Player::new();
        p.hp = 10;
        p.stamina = 0;
        let mut w = WorldState::default();
        w.map.difficulty = 2;
        run(OutcomeEvent::Oasis, &mut p, &mut w, vec![0.0]);
        assert_eq!(p.hp, 50);
        assert_eq!(p.stamina, 20);
    }

    #[test]
    fn test_sandstorm_can_reach_zero() {
        let mut p = Player::new();
        p.hp = 4;
        let mut w = WorldState::default();
        run(OutcomeEvent::Sandstorm, &mut p, &mut w, vec![0.0]);
        assert_eq!(p.hp, 0);
    }

    #[test]
    fn test_merchant_requires_gold() {
        let mut p = Player::new();
        p.gold = 49;
        let mut w = WorldState::default();
        run(OutcomeEvent::Merchant, &mut p, &mut w, vec![0.0]);
        assert_eq!((p.gold, p.potions), (49, 2));
        p.gold = 50;
        run(OutcomeEvent::Merchant, &mut p, &mut w, vec![0.0]);
        assert_eq!((p.gold, p.potions), (0, 3));
    }

    #[test]
    fn test_poor_bandit_victim_fights_elite() {
        let mut p = Player::new();
        p.gold = 99;
        let mut w = WorldState::default();
        let e = run(OutcomeEvent::BanditAmbush, &mut p, &mut w, vec![0.0]);
        assert_eq!(e, Encounter::Battle(EnemyKind::Elite));
    }

    #[test]
    fn test_bandit_fight_sets_loot() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        // 0.5 lands in the fight bracket, then loot roll 0.5
        let e = run(OutcomeEvent::BanditAmbush, &mut p, &mut w, vec![0.5]);
        assert_eq!(e, Encounter::Battle(EnemyKind::Elite));
        assert_eq!(w.buffs.bandits_loot, 450);
    }

    #[test]
    fn test_bandit_negotiate_grants_info() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        run(OutcomeEvent::BanditAmbush, &mut p, &mut w, vec![0.1]);
        assert_eq!(p.gold, 300);
        assert_eq!(w.buffs.bandit_info, 2);
    }

    #[test]
    fn test_lost_merchant_help_grants_compass() {
        let mut p = Player::new();
        let mut w = WorldState::default();
        run(OutcomeEvent::LostMerchant, &mut p, &mut w, vec![0.0]);
        assert_eq!(p.gold, 650);
        assert_eq!(w.buffs.compass_effect, 3);
    }

    #[test]
    fn test_egyptian_god_curse_is_nonlethal() {
        let mut p = Player::new();
        p.hp = 5;
        let mut w = WorldState::default();
        run(OutcomeEvent::EgyptianGod, &mut p, &mut w, vec![0.9]);
        assert_eq!(p.hp, 1);
    }

    #[test]
    fn test_egyptian_god_blessing_spends_gold_luck() {
        let mut p = Player::new();
        p.luck_gold = 5;
        let mut w = WorldState::default();
        run(OutcomeEvent::EgyptianGod, &mut p, &mut w, vec![0.1]);
        assert_eq!(p.gold, 575);
        assert_eq!(p.luck_gold, 4);
    }

    #[test]
    fn test_desert_oasis_rest_sets_blessing() {
        let mut p = Player::new();
        p.hp = 1;
        let mut w = WorldState::default();
        run(OutcomeEvent::DesertOasis, &mut p, &mut w, vec![0.0]);
        assert_eq!(p.hp, p.max_hp);
        assert_eq!(w.buffs.oasis_blessing, 5);
    }

    #[test]
    fn test_every_outcome_event_resolves() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;
        let events = [
            OutcomeEvent::Empty,
            OutcomeEvent::Mirage,
            OutcomeEvent::Quicksand,
            OutcomeEvent::ScorpionNest,
            OutcomeEvent::BuriedTreasure,
            OutcomeEvent::DeadTraveler,
            OutcomeEvent::AncientShrine,
            OutcomeEvent::MysteriousStranger,
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut log = MessageLog::default();
        for event in events {
            for _ in 0..50 {
                let mut p = Player::new();
                let mut w = WorldState::default();
                let mut ctx = EncounterCtx::new(&mut p, &mut w, &mut rng, &mut log);
                assert_eq!(event.resolve(&mut ctx), Encounter::Resolved);
                assert!(p.hp >= 1 && p.hp <= p.max_hp);
            }
        }
    }
}
