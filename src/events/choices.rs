//! Interactive events: the player picks one labelled option.

use super::context::{Encounter, EncounterCtx};
use crate::combat::EnemyKind;
use crate::core::messages::MessageSink;
use crate::core::rng::{chance, pick_index, roll, roll_amount};
use crate::items::Rarity;
use rand::Rng;

const ALCHEMIST_POTION_PRICE: u64 = 80;
const ALCHEMIST_MAX_POTIONS: u64 = 3;
const ALCHEMIST_ELIXIR_PRICE: u64 = 150;
const ALTAR_OFFERING: u64 = 100;
const BEAST_SCARE_STAMINA: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceEvent {
    SandstormShelter,
    WanderingAlchemist,
    AncientTablet,
    BeastPack,
    MoonlightAltar,
    CaravanWreckage,
    Pyramid,
}

/// An open choice panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub event: ChoiceEvent,
    pub title: &'static str,
    pub options: &'static [&'static str],
}

impl ChoiceEvent {
    pub fn title(&self) -> &'static str {
        match self {
            ChoiceEvent::SandstormShelter => "A sandstorm is coming. Where do you take shelter?",
            ChoiceEvent::WanderingAlchemist => "A wandering alchemist offers their wares.",
            ChoiceEvent::AncientTablet => "An ancient stone tablet stands half-buried in the sand.",
            ChoiceEvent::BeastPack => "A pack of desert beasts blocks the way.",
            ChoiceEvent::MoonlightAltar => "An altar glows softly under the moonlight.",
            ChoiceEvent::CaravanWreckage => "You come across the wreckage of a caravan.",
            ChoiceEvent::Pyramid => "An ancient pyramid rises before you. Enter?",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            ChoiceEvent::SandstormShelter => &["enter_cave", "ruins_shelter", "brave_storm"],
            ChoiceEvent::WanderingAlchemist => &["buy_potion", "trade_gold", "learn_alchemy"],
            ChoiceEvent::AncientTablet => &["study", "touch", "ignore"],
            ChoiceEvent::BeastPack => &["fight", "scare", "negotiate"],
            ChoiceEvent::MoonlightAltar => &["pray", "offer_gold", "take_treasure"],
            ChoiceEvent::CaravanWreckage => &["search_carefully", "quick_loot", "check_survivors"],
            ChoiceEvent::Pyramid => &["enter", "decline"],
        }
    }

    /// Announce the event and build the panel the player answers.
    pub fn open<R: Rng, S: MessageSink>(self, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
        ctx.say(self.title());
        if self == ChoiceEvent::Pyramid {
            ctx.say(&format!(
                "The pyramid holds {} chambers of strong enemies and rich rewards.",
                ctx.world.dungeon.pyramid_max_steps
            ));
        }
        Encounter::Choice(ChoicePrompt {
            event: self,
            title: self.title(),
            options: self.options(),
        })
    }

    /// Resolve option `index`. `None` means the index is not an option and
    /// the panel stays open.
    pub fn resolve<R: Rng, S: MessageSink>(
        self,
        index: usize,
        ctx: &mut EncounterCtx<'_, R, S>,
    ) -> Option<Encounter> {
        if index >= self.options().len() {
            ctx.say("That is not one of the options.");
            return None;
        }
        let outcome = match self {
            ChoiceEvent::SandstormShelter => sandstorm_shelter(index, ctx),
            ChoiceEvent::WanderingAlchemist => wandering_alchemist(index, ctx),
            ChoiceEvent::AncientTablet => ancient_tablet(index, ctx),
            ChoiceEvent::BeastPack => beast_pack(index, ctx),
            ChoiceEvent::MoonlightAltar => moonlight_altar(index, ctx),
            ChoiceEvent::CaravanWreckage => caravan_wreckage(index, ctx),
            ChoiceEvent::Pyramid => {
                if index == 0 {
                    Encounter::EnterDungeon
                } else {
                    ctx.say("You leave the pyramid to the sand.");
                    Encounter::Resolved
                }
            }
        };
        Some(outcome)
    }
}

fn rare_or(rng: &mut impl Rng, p_rare: f64, otherwise: Rarity) -> Rarity {
    if chance(rng, p_rare) {
        Rarity::Rare
    } else {
        otherwise
    }
}

fn sandstorm_shelter<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            let r = roll(ctx.rng);
            if r < 0.5 {
                ctx.player.heal(30);
                ctx.player.restore_stamina(20);
                ctx.say("The cave is dry and quiet. HP +30, stamina +20.");
            } else if r < 0.8 {
                ctx.player.hp = ctx.player.max_hp;
                ctx.say("Old paintings cover the cave walls. You rest and study them.");
                let xp = roll_amount(ctx.rng, 40, 40) as u64;
                ctx.gain_xp(xp);
                if chance(ctx.rng, 0.4) {
                    ctx.gain_item(Rarity::Common);
                }
            } else {
                ctx.say("Something lives in this cave, and it is not friendly!");
                return Encounter::Battle(EnemyKind::Elite);
            }
        }
        1 => {
            let r = roll(ctx.rng);
            if r < 0.4 {
                ctx.say("The ruins hide a forgotten stash.");
                let gold = roll_amount(ctx.rng, 60, 80) as u64;
                ctx.gain_gold(gold);
                if chance(ctx.rng, 0.6) {
                    let rarity = rare_or(ctx.rng, 0.3, Rarity::Common);
                    ctx.gain_item(rarity);
                }
            } else if r < 0.7 {
                let damage = roll_amount(ctx.rng, 15, 15);
                ctx.player.take_nonlethal_damage(damage);
                ctx.say(&format!("A wall collapses on you. HP -{}.", damage));
            } else {
                ctx.say("You wait out the storm in the ruins.");
            }
        }
        _ => {
            let damage = roll_amount(ctx.rng, 20, 20);
            let loss = roll_amount(ctx.rng, 25, 15);
            ctx.player.take_nonlethal_damage(damage);
            ctx.player.spend_stamina(loss);
            ctx.say(&format!(
                "You push through the storm. HP -{}, stamina -{}.",
                damage, loss
            ));
            if chance(ctx.rng, 0.6) {
                ctx.player.luck_combat += 1;
                ctx.say("The ordeal hardens you. Combat luck +1.");
            }
            ctx.world.map.map_steps += 1;
            ctx.say("You made extra progress. Map steps +1.");
        }
    }
    Encounter::Resolved
}

fn wandering_alchemist<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            let count = (ctx.player.gold / ALCHEMIST_POTION_PRICE).min(ALCHEMIST_MAX_POTIONS);
            if count == 0 {
                ctx.say("You cannot afford any potions.");
            } else {
                ctx.player.lose_gold(count * ALCHEMIST_POTION_PRICE);
                ctx.player.potions += count as u32;
                ctx.say(&format!(
                    "Bought {} potions for {} gold.",
                    count,
                    count * ALCHEMIST_POTION_PRICE
                ));
            }
        }
        1 => {
            if !ctx.player.try_spend_gold(ALCHEMIST_ELIXIR_PRICE) {
                ctx.say("The elixir costs 150 gold. Not enough gold.");
                return Encounter::Resolved;
            }
            match pick_index(ctx.rng, 3) {
                0 => {
                    ctx.player.grow_max_hp(40);
                    ctx.say("Elixir of vitality: max HP +40.");
                }
                1 => {
                    ctx.player.grow_max_stamina(30);
                    ctx.say("Elixir of endurance: max stamina +30.");
                }
                _ => {
                    ctx.player.luck_combat += 3;
                    ctx.player.luck_gold += 2;
                    ctx.say("Elixir of fortune: combat luck +3, gold luck +2.");
                }
            }
        }
        _ => {
            if ctx.player.stamina < 20 {
                ctx.say("You are too tired to learn anything right now.");
                return Encounter::Resolved;
            }
            ctx.player.spend_stamina(20);
            ctx.player.potions += 2;
            ctx.say("The alchemist teaches you to brew. Stamina -20, potions +2.");
            let xp = roll_amount(ctx.rng, 70, 50) as u64;
            ctx.gain_xp(xp);
        }
    }
    Encounter::Resolved
}

fn ancient_tablet<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            if chance(ctx.rng, 0.6) {
                ctx.say("You decipher the inscription!");
                let xp = roll_amount(ctx.rng, 80, 70) as u64;
                ctx.gain_xp(xp);
                match pick_index(ctx.rng, 3) {
                    0 => {
                        ctx.player.grow_max_hp(25);
                        ctx.say("Max HP +25.");
                    }
                    1 => {
                        ctx.player.luck_combat += 2;
                        ctx.say("Combat luck +2.");
                    }
                    _ => {
                        ctx.player.luck_gold += 2;
                        ctx.say("Gold luck +2.");
                    }
                }
            } else {
                ctx.say("You only understand fragments.");
                let xp = roll_amount(ctx.rng, 30, 30) as u64;
                ctx.gain_xp(xp);
            }
        }
        1 => {
            let r = roll(ctx.rng);
            if r < 0.35 {
                ctx.player.full_restore();
                ctx.player.shield += 30;
                ctx.say("Warm light flows into you. Fully restored, shield +30.");
                ctx.gain_xp(50);
            } else if r < 0.65 {
                if !ctx.world.in_pyramid() {
                    ctx.world.map.map_steps += 2;
                }
                ctx.say("The tablet shows you a shortcut. Map steps +2.");
                let gold = roll_amount(ctx.rng, 50, 50) as u64;
                ctx.gain_gold(gold);
            } else {
                let damage = roll_amount(ctx.rng, 25, 20);
                ctx.player.take_nonlethal_damage(damage);
                ctx.say(&format!("It was a trap! HP -{}.", damage));
            }
        }
        _ => {
            ctx.player.restore_stamina(10);
            ctx.say("You leave the tablet alone and rest a moment. Stamina +10.");
        }
    }
    Encounter::Resolved
}

fn beast_pack<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            ctx.say("You charge the pack!");
            Encounter::Battle(EnemyKind::Monster)
        }
        1 => {
            if ctx.player.stamina < BEAST_SCARE_STAMINA {
                ctx.say("Too exhausted to look threatening, the pack leader attacks!");
                return Encounter::Battle(EnemyKind::Elite);
            }
            ctx.player.spend_stamina(BEAST_SCARE_STAMINA);
            if chance(ctx.rng, 0.7) {
                ctx.say("The beasts scatter. Stamina -30.");
                if chance(ctx.rng, 0.5) {
                    let gold = roll_amount(ctx.rng, 30, 40) as u64;
                    ctx.gain_gold(gold);
                }
                Encounter::Resolved
            } else {
                ctx.say("The pack leader is not impressed!");
                Encounter::Battle(EnemyKind::Elite)
            }
        }
        _ => {
            if ctx.player.potions == 0 {
                ctx.say("You have nothing to offer. The beasts attack!");
                return Encounter::Battle(EnemyKind::Monster);
            }
            ctx.player.potions -= 1;
            ctx.say("You offer a potion. The beasts calm down. Potions -1.");
            if chance(ctx.rng, 0.4) {
                let rarity = rare_or(ctx.rng, 0.4, Rarity::Common);
                ctx.gain_item(rarity);
            } else {
                let gold = roll_amount(ctx.rng, 40, 60) as u64;
                ctx.gain_gold(gold);
            }
            ctx.gain_xp(40);
            Encounter::Resolved
        }
    }
}

fn moonlight_altar<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            let r = roll(ctx.rng);
            if r < 0.5 {
                ctx.say("The moon answers your prayer with insight.");
                let xp = roll_amount(ctx.rng, 60, 40) as u64;
                ctx.gain_xp(xp);
            } else if r < 0.8 {
                ctx.player.heal(40);
                ctx.player.luck_combat += 1;
                ctx.say("Moonlight heals you. HP +40, combat luck +1.");
            } else {
                ctx.player.restore_stamina(15);
                ctx.say("You feel calm. Stamina +15.");
            }
            Encounter::Resolved
        }
        1 => {
            if !ctx.player.try_spend_gold(ALTAR_OFFERING) {
                ctx.player.luck_gold += 1;
                ctx.say("You have little to give, but the sincere gesture is noticed. Gold luck +1.");
                return Encounter::Resolved;
            }
            ctx.say("You offer 100 gold at the altar.");
            let r = roll(ctx.rng);
            if r < 0.4 {
                ctx.say("The offering returns threefold!");
                ctx.gain_gold(300);
            } else if r < 0.7 {
                let rarity = if chance(ctx.rng, 0.5) {
                    Rarity::Epic
                } else {
                    Rarity::Rare
                };
                ctx.gain_item(rarity);
            } else {
                ctx.player.grow_max_hp(35);
                ctx.player.grow_max_stamina(25);
                ctx.say("The altar strengthens you. Max HP +35, max stamina +25.");
            }
            Encounter::Resolved
        }
        _ => {
            let r = roll(ctx.rng);
            if r < 0.3 {
                let rarity = if chance(ctx.rng, 0.5) {
                    Rarity::Epic
                } else {
                    Rarity::Rare
                };
                ctx.gain_item(rarity);
                let gold = roll_amount(ctx.rng, 80, 120) as u64;
                ctx.gain_gold(gold);
                Encounter::Resolved
            } else if r < 0.6 {
                ctx.gain_item(Rarity::Rare);
                let damage = roll_amount(ctx.rng, 20, 15);
                ctx.player.take_nonlethal_damage(damage);
                ctx.player.max_hp = ctx.player.max_hp.saturating_sub(10).max(50);
                ctx.player.clamp_pools();
                ctx.say(&format!("The altar's curse strikes you. HP -{}, max HP -10.", damage));
                Encounter::Resolved
            } else {
                ctx.say("The altar's guardian awakens!");
                Encounter::Battle(EnemyKind::MiniBoss)
            }
        }
    }
}

fn caravan_wreckage<R: Rng, S: MessageSink>(index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> Encounter {
    match index {
        0 => {
            ctx.player.spend_stamina(15);
            ctx.say("You search every crate carefully. Stamina -15.");
            let gold = roll_amount(ctx.rng, 100, 150) as u64;
            ctx.gain_gold(gold);
            let count = 1 + pick_index(ctx.rng, 2);
            for _ in 0..count {
                let rarity = rare_or(ctx.rng, 0.3, Rarity::Common);
                ctx.gain_item(rarity);
            }
            if chance(ctx.rng, 0.4) {
                let potions = 1 + pick_index(ctx.rng, 2) as u32;
                ctx.player.potions += potions;
                ctx.say(&format!("Potions +{}.", potions));
            }
            Encounter::Resolved
        }
        1 => {
            let r = roll(ctx.rng);
            if r < 0.5 {
                let gold = roll_amount(ctx.rng, 50, 80) as u64;
                ctx.gain_gold(gold);
                if chance(ctx.rng, 0.4) {
                    ctx.gain_item(Rarity::Common);
                }
                Encounter::Resolved
            } else if r < 0.8 {
                let damage = roll_amount(ctx.rng, 20, 15);
                ctx.player.take_nonlethal_damage(damage);
                ctx.say(&format!("A crate collapses on your hand. HP -{}.", damage));
                let gold = roll_amount(ctx.rng, 30, 40) as u64;
                ctx.gain_gold(gold);
                Encounter::Resolved
            } else {
                ctx.say("Scavengers were already here, and they want it all!");
                Encounter::Battle(EnemyKind::Monster)
            }
        }
        _ => {
            let r = roll(ctx.rng);
            if r < 0.3 {
                ctx.say("A grateful survivor rewards you.");
                ctx.gain_gold(150);
                let rarity = if chance(ctx.rng, 0.5) {
                    Rarity::Rare
                } else {
                    Rarity::Excellent
                };
                ctx.gain_item(rarity);
                let xp = roll_amount(ctx.rng, 80, 40) as u64;
                ctx.gain_xp(xp);
                Encounter::Resolved
            } else if r < 0.7 {
                ctx.say("You help the survivors to safety.");
                let xp = roll_amount(ctx.rng, 50, 50) as u64;
                ctx.gain_xp(xp);
                let gold = roll_amount(ctx.rng, 60, 60) as u64;
                ctx.gain_gold(gold);
                Encounter::Resolved
            } else {
                ctx.say("The raiders who did this are still nearby!");
                Encounter::Battle(EnemyKind::Elite)
            }
        }
    }
}
