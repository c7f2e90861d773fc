//! What a handler sees and what it hands back.

use super::choices::ChoicePrompt;
use super::shops::ShopSession;
use crate::character::Player;
use crate::combat::EnemyKind;
use crate::core::game_state::WorldState;
use crate::core::messages::MessageSink;
use crate::items::{generate_item, Item, Rarity};
use rand::Rng;

/// Mutable view of the session handed to every event, branch and choice
/// handler. Handlers never reach for globals.
pub struct EncounterCtx<'a, R: Rng, S: MessageSink> {
    pub player: &'a mut Player,
    pub world: &'a mut WorldState,
    pub rng: &'a mut R,
    pub log: &'a mut S,
}

impl<'a, R: Rng, S: MessageSink> EncounterCtx<'a, R, S> {
    pub fn new(
        player: &'a mut Player,
        world: &'a mut WorldState,
        rng: &'a mut R,
        log: &'a mut S,
    ) -> Self {
        Self {
            player,
            world,
            rng,
            log,
        }
    }

    pub fn say(&mut self, text: &str) {
        self.log.display(text);
    }

    pub fn difficulty(&self) -> u32 {
        self.world.map.difficulty
    }

    /// `2^(difficulty-1)`.
    pub fn payout_scale(&self) -> f64 {
        self.world.map.payout_scale()
    }

    pub fn gain_gold(&mut self, amount: u64) {
        self.player.gold += amount;
        self.log.display(&format!("Gained {} gold.", amount));
    }

    pub fn gain_xp(&mut self, amount: u64) {
        self.log.display(&format!("Gained {} XP.", amount));
        crate::character::add_xp(self.player, amount, self.log);
    }

    /// Generate a random template at `rarity` and put it in the inventory.
    pub fn gain_item(&mut self, rarity: Rarity) -> Item {
        let item = generate_item(rarity, false, self.rng);
        self.log
            .display(&format!("Obtained {}.", item.display_name()));
        self.player.inventory.push(item.clone());
        item
    }
}

/// What the session must do after a handler returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Encounter {
    /// Fully applied; nothing is waiting.
    Resolved,
    /// Start a battle against this kind of enemy.
    Battle(EnemyKind),
    /// Open a multi-option panel and wait for `choose`.
    Choice(ChoicePrompt),
    /// Open a shop panel and wait for shop calls.
    Shop(ShopSession),
    /// Move into the pyramid.
    EnterDungeon,
}

impl Encounter {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Encounter::Resolved)
    }
}
