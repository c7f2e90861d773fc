//! Black market and trading post panels.

use super::context::EncounterCtx;
use crate::core::constants::*;
use crate::core::messages::MessageSink;
use crate::core::rng::{pick_index, roll};
use crate::enhancement::{attempt_enhancement, EnhancementOutcome, EnhancementRecord};
use crate::items::{clone_item, pick_weighted_rarity, EquipmentSlot, Item, ITEM_TEMPLATES};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopKind {
    BlackMarket,
    TradingPost,
}

/// Fixed trading-post services, addressed by `shop_buy` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingPostService {
    Potion,
    Food,
    Heal,
}

impl TradingPostService {
    pub const ALL: [TradingPostService; 3] = [
        TradingPostService::Potion,
        TradingPostService::Food,
        TradingPostService::Heal,
    ];

    pub fn base_price(&self) -> u64 {
        match self {
            TradingPostService::Potion => TRADING_POST_POTION_PRICE,
            TradingPostService::Food => TRADING_POST_FOOD_PRICE,
            TradingPostService::Heal => TRADING_POST_HEAL_PRICE,
        }
    }
}

/// A black-market offer. Rarity is hidden until bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopOffer {
    pub item: Item,
    pub price: u64,
    pub sold: bool,
}

/// An open shop panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSession {
    pub kind: ShopKind,
    pub offers: Vec<ShopOffer>,
    pub purchases: u32,
}

impl ShopSession {
    /// Open a shop. The black market rolls its offers once, here.
    pub fn open<R: Rng, S: MessageSink>(kind: ShopKind, ctx: &mut EncounterCtx<'_, R, S>) -> Self {
        let offers = match kind {
            ShopKind::BlackMarket => {
                ctx.say("A masked dealer beckons you into a black tent.");
                (0..BLACK_MARKET_OFFERS)
                    .map(|_| {
                        let template = &ITEM_TEMPLATES[pick_index(ctx.rng, ITEM_TEMPLATES.len())];
                        let rarity = pick_weighted_rarity(&BLACK_MARKET_RARITY_WEIGHTS, ctx.rng);
                        let item = clone_item(template, rarity, false, ctx.rng);
                        let price =
                            BLACK_MARKET_PRICE_BASE + (roll(ctx.rng) * BLACK_MARKET_PRICE_SPREAD) as u64;
                        ShopOffer {
                            item,
                            price,
                            sold: false,
                        }
                    })
                    .collect()
            }
            ShopKind::TradingPost => {
                ctx.say("You arrive at a trading post. Merchants call out their prices.");
                Vec::new()
            }
        };
        for (idx, offer) in offers.iter().enumerate() {
            ctx.say(&format!("[{}] {} (?) - {} gold", idx, offer.item.name, offer.price));
        }
        Self {
            kind,
            offers,
            purchases: 0,
        }
    }

    fn discounted<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>, price: u64) -> u64 {
        if ctx.world.buffs.shop_discount {
            (price as f64 * SHOP_DISCOUNT_RATE).floor() as u64
        } else {
            price
        }
    }

    /// Buy offer `index` (black market) or service `index` (trading post).
    /// Returns true when something was bought.
    pub fn buy<R: Rng, S: MessageSink>(&mut self, index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> bool {
        match self.kind {
            ShopKind::BlackMarket => self.buy_offer(index, ctx),
            ShopKind::TradingPost => match TradingPostService::ALL.get(index) {
                Some(service) => buy_service(*service, ctx),
                None => {
                    ctx.say("The trading post does not sell that.");
                    false
                }
            },
        }
    }

    fn buy_offer<R: Rng, S: MessageSink>(&mut self, index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> bool {
        if self.purchases >= BLACK_MARKET_MAX_PURCHASES {
            ctx.say("\"That's enough for one night, friend.\"");
            return false;
        }
        let Some(offer) = self.offers.get_mut(index) else {
            ctx.say("There is no such offer.");
            return false;
        };
        if offer.sold {
            ctx.say("That item is already sold.");
            return false;
        }
        if !ctx.player.try_spend_gold(offer.price) {
            ctx.say("Not enough gold.");
            return false;
        }
        offer.sold = true;
        self.purchases += 1;
        let item = offer.item.clone();
        ctx.say(&format!(
            "Bought {} for {} gold.",
            item.display_name(),
            offer.price
        ));
        ctx.say(&format!(
            "Revealed: ATK +{}, DEF +{}, gold luck +{}",
            item.atk(),
            item.def(),
            item.stats.luck_gold
        ));
        ctx.player.inventory.push(item);
        true
    }

    /// Sell inventory item `index`. Trading post only.
    pub fn sell<R: Rng, S: MessageSink>(&mut self, index: usize, ctx: &mut EncounterCtx<'_, R, S>) -> bool {
        if self.kind != ShopKind::TradingPost {
            ctx.say("This dealer only sells.");
            return false;
        }
        if index >= ctx.player.inventory.len() {
            ctx.say("There is no item to sell there.");
            return false;
        }
        let item = ctx.player.inventory.remove(index);
        let price = item.sell_price();
        ctx.player.gold += price;
        ctx.say(&format!("Sold {} for {} gold.", item.display_name(), price));
        true
    }

    /// Enhance the item in `slot`. Trading post only.
    pub fn enhance<R: Rng, S: MessageSink>(
        &mut self,
        slot: EquipmentSlot,
        record: &mut EnhancementRecord,
        ctx: &mut EncounterCtx<'_, R, S>,
    ) -> Option<EnhancementOutcome> {
        if self.kind != ShopKind::TradingPost {
            ctx.say("There is no smith here.");
            return None;
        }
        Some(attempt_enhancement(ctx.player, slot, record, ctx.rng, ctx.log))
    }
}

fn buy_service<R: Rng, S: MessageSink>(service: TradingPostService, ctx: &mut EncounterCtx<'_, R, S>) -> bool {
    let price = ShopSession::discounted(ctx, service.base_price());
    if !ctx.player.try_spend_gold(price) {
        ctx.say(&format!("That costs {} gold. Not enough gold.", price));
        return false;
    }
    if ctx.world.buffs.shop_discount {
        ctx.world.buffs.shop_discount = false;
        ctx.say("Your discount was applied.");
    }
    match service {
        TradingPostService::Potion => {
            ctx.player.potions += 1;
            ctx.say(&format!("Bought a potion for {} gold.", price));
        }
        TradingPostService::Food => {
            let scale = ctx.payout_scale();
            let hp = (TRADING_POST_FOOD_HP * scale).floor() as u32;
            let stamina = (TRADING_POST_FOOD_STAMINA * scale).floor() as u32;
            ctx.player.heal(hp);
            ctx.player.restore_stamina(stamina);
            ctx.say(&format!(
                "A hot meal for {} gold. HP +{}, stamina +{}.",
                price, hp, stamina
            ));
        }
        TradingPostService::Heal => {
            ctx.player.full_restore();
            ctx.say(&format!("A healer tends to you for {} gold. Fully restored.", price));
        }
    }
    true
}
