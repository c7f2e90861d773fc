//! The weighted event catalog.

use super::choices::ChoiceEvent;
use super::outcomes::OutcomeEvent;
use super::shops::ShopKind;
use crate::combat::EnemyKind;
use crate::core::rng::pick_weighted;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every world event a direction can lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventId {
    Monster,
    Elite,
    MiniBoss,
    Empty,
    Oasis,
    Sandstorm,
    Mirage,
    Quicksand,
    ScorpionNest,
    Merchant,
    BlackMarket,
    TradingPost,
    CaravanRest,
    BuriedTreasure,
    DeadTraveler,
    AncientShrine,
    EgyptianGod,
    MysteriousStranger,
    LostMerchant,
    BanditAmbush,
    DesertOasis,
    SandstormShelter,
    WanderingAlchemist,
    AncientTablet,
    BeastPack,
    MoonlightAltar,
    CaravanWreckage,
    Pyramid,
}

impl EventId {
    pub const ALL: [EventId; 28] = [
        EventId::Monster,
        EventId::Elite,
        EventId::MiniBoss,
        EventId::Empty,
        EventId::Oasis,
        EventId::Sandstorm,
        EventId::Mirage,
        EventId::Quicksand,
        EventId::ScorpionNest,
        EventId::Merchant,
        EventId::BlackMarket,
        EventId::TradingPost,
        EventId::CaravanRest,
        EventId::BuriedTreasure,
        EventId::DeadTraveler,
        EventId::AncientShrine,
        EventId::EgyptianGod,
        EventId::MysteriousStranger,
        EventId::LostMerchant,
        EventId::BanditAmbush,
        EventId::DesertOasis,
        EventId::SandstormShelter,
        EventId::WanderingAlchemist,
        EventId::AncientTablet,
        EventId::BeastPack,
        EventId::MoonlightAltar,
        EventId::CaravanWreckage,
        EventId::Pyramid,
    ];

    /// Stable snake_case key, also used by the branch table.
    pub fn name(&self) -> &'static str {
        match self {
            EventId::Monster => "monster",
            EventId::Elite => "elite",
            EventId::MiniBoss => "mini_boss",
            EventId::Empty => "empty",
            EventId::Oasis => "oasis",
            EventId::Sandstorm => "sandstorm",
            EventId::Mirage => "mirage",
            EventId::Quicksand => "quicksand",
            EventId::ScorpionNest => "scorpion_nest",
            EventId::Merchant => "merchant",
            EventId::BlackMarket => "black_market",
            EventId::TradingPost => "trading_post",
            EventId::CaravanRest => "caravan_rest",
            EventId::BuriedTreasure => "buried_treasure",
            EventId::DeadTraveler => "dead_traveler",
            EventId::AncientShrine => "ancient_shrine",
            EventId::EgyptianGod => "egyptian_god",
            EventId::MysteriousStranger => "mysterious_stranger",
            EventId::LostMerchant => "lost_merchant",
            EventId::BanditAmbush => "bandit_ambush",
            EventId::DesertOasis => "desert_oasis",
            EventId::SandstormShelter => "sandstorm_shelter",
            EventId::WanderingAlchemist => "wandering_alchemist",
            EventId::AncientTablet => "ancient_tablet",
            EventId::BeastPack => "beast_pack",
            EventId::MoonlightAltar => "moonlight_altar",
            EventId::CaravanWreckage => "caravan_wreckage",
            EventId::Pyramid => "pyramid",
        }
    }

    pub fn from_name(name: &str) -> Option<EventId> {
        EventId::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Human-readable label shown by the compass.
    pub fn label(&self) -> &'static str {
        match self {
            EventId::Monster => "Monster",
            EventId::Elite => "Elite Monster",
            EventId::MiniBoss => "Mini Boss",
            EventId::Empty => "Empty Desert",
            EventId::Oasis => "Oasis",
            EventId::Sandstorm => "Sandstorm",
            EventId::Mirage => "Mirage",
            EventId::Quicksand => "Quicksand",
            EventId::ScorpionNest => "Scorpion Nest",
            EventId::Merchant => "Merchant",
            EventId::BlackMarket => "Black Market",
            EventId::TradingPost => "Trading Post",
            EventId::CaravanRest => "Caravan Rest",
            EventId::BuriedTreasure => "Buried Treasure",
            EventId::DeadTraveler => "Dead Traveler",
            EventId::AncientShrine => "Ancient Shrine",
            EventId::EgyptianGod => "Egyptian God",
            EventId::MysteriousStranger => "Mysterious Stranger",
            EventId::LostMerchant => "Lost Merchant",
            EventId::BanditAmbush => "Bandit Ambush",
            EventId::DesertOasis => "Desert Oasis",
            EventId::SandstormShelter => "Sandstorm Shelter",
            EventId::WanderingAlchemist => "Wandering Alchemist",
            EventId::AncientTablet => "Ancient Tablet",
            EventId::BeastPack => "Beast Pack",
            EventId::MoonlightAltar => "Moonlight Altar",
            EventId::CaravanWreckage => "Caravan Wreckage",
            EventId::Pyramid => "Pyramid",
        }
    }

    /// Vague sensory hints shown before the player commits to a direction.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            EventId::Monster => &[
                "the sounds of battle",
                "a cloud of dust",
                "a low growl",
                "fresh claw prints",
            ],
            EventId::Elite => &["a powerful presence", "a giant shadow", "a deep roar"],
            EventId::MiniBoss => &["a looming temple", "a wave of dread", "heavy footsteps"],
            EventId::Merchant => &["caravan bells", "the smell of spices", "a merchant flag"],
            EventId::BlackMarket => &["a black tent", "a masked figure", "whispered deals"],
            EventId::Oasis | EventId::DesertOasis => {
                &["the scent of water", "a patch of green", "swaying palms"]
            }
            EventId::Sandstorm | EventId::SandstormShelter => {
                &["a howling wind", "a darkening sky", "stinging sand"]
            }
            EventId::BuriedTreasure => &["a strange marking", "something glinting in the sand"],
            EventId::Pyramid => &["a pyramid peak on the horizon", "ancient stonework"],
            EventId::DeadTraveler => &["an abandoned pack", "a lonely grave marker"],
            EventId::AncientShrine | EventId::MoonlightAltar => {
                &["a weathered statue", "glowing runes", "a holy silence"]
            }
            EventId::CaravanRest | EventId::TradingPost => {
                &["distant laughter", "a campfire", "the smell of food"]
            }
            EventId::LostMerchant => &["a caravan calling for help", "the cry of a camel"],
            EventId::BanditAmbush => &["figures behind the dunes", "the clink of blades"],
            _ => &[
                "endless dunes",
                "shimmering heat",
                "silence",
                "the wind over the sand",
            ],
        }
    }
}

/// How an event resolves. One variant per handler category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandler {
    Combat(EnemyKind),
    WeightedOutcome(OutcomeEvent),
    Choice(ChoiceEvent),
    Shop(ShopKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEntry {
    pub id: EventId,
    pub weight: u32,
    pub handler: EventHandler,
}

/// Single authoritative event table. Registration order fixes the
/// cumulative brackets used by selection.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    entries: Vec<EventEntry>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full catalog used by a normal run.
    pub fn standard() -> Self {
        use EventHandler::*;
        let mut r = Self::new();
        r.register(EventId::Monster, 30, Combat(EnemyKind::Monster));
        r.register(EventId::Elite, 10, Combat(EnemyKind::Elite));
        r.register(EventId::MiniBoss, 5, Combat(EnemyKind::MiniBoss));

        r.register(EventId::Empty, 10, WeightedOutcome(OutcomeEvent::Empty));
        r.register(EventId::Oasis, 6, WeightedOutcome(OutcomeEvent::Oasis));
        r.register(EventId::Sandstorm, 8, WeightedOutcome(OutcomeEvent::Sandstorm));
        r.register(EventId::Mirage, 4, WeightedOutcome(OutcomeEvent::Mirage));
        r.register(EventId::Quicksand, 5, WeightedOutcome(OutcomeEvent::Quicksand));
        r.register(EventId::ScorpionNest, 4, WeightedOutcome(OutcomeEvent::ScorpionNest));

        r.register(EventId::Merchant, 7, WeightedOutcome(OutcomeEvent::Merchant));
        r.register(EventId::BlackMarket, 4, Shop(ShopKind::BlackMarket));
        r.register(EventId::TradingPost, 6, Shop(ShopKind::TradingPost));
        r.register(EventId::CaravanRest, 8, Shop(ShopKind::TradingPost));

        r.register(EventId::BuriedTreasure, 5, WeightedOutcome(OutcomeEvent::BuriedTreasure));
        r.register(EventId::DeadTraveler, 4, WeightedOutcome(OutcomeEvent::DeadTraveler));
        r.register(EventId::AncientShrine, 4, WeightedOutcome(OutcomeEvent::AncientShrine));

        r.register(EventId::EgyptianGod, 4, WeightedOutcome(OutcomeEvent::EgyptianGod));
        r.register(
            EventId::MysteriousStranger,
            4,
            WeightedOutcome(OutcomeEvent::MysteriousStranger),
        );
        r.register(EventId::LostMerchant, 4, WeightedOutcome(OutcomeEvent::LostMerchant));
        r.register(EventId::BanditAmbush, 6, WeightedOutcome(OutcomeEvent::BanditAmbush));
        r.register(EventId::DesertOasis, 5, WeightedOutcome(OutcomeEvent::DesertOasis));

        r.register(EventId::SandstormShelter, 5, Choice(ChoiceEvent::SandstormShelter));
        r.register(EventId::WanderingAlchemist, 5, Choice(ChoiceEvent::WanderingAlchemist));
        r.register(EventId::AncientTablet, 4, Choice(ChoiceEvent::AncientTablet));
        r.register(EventId::BeastPack, 6, Choice(ChoiceEvent::BeastPack));
        r.register(EventId::MoonlightAltar, 4, Choice(ChoiceEvent::MoonlightAltar));
        r.register(EventId::CaravanWreckage, 5, Choice(ChoiceEvent::CaravanWreckage));
        r.register(EventId::Pyramid, 6, Choice(ChoiceEvent::Pyramid));
        r
    }

    /// Add or replace an entry. A replaced entry keeps its position.
    pub fn register(&mut self, id: EventId, weight: u32, handler: EventHandler) {
        let entry = EventEntry {
            id,
            weight,
            handler,
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    pub fn weight(&self, id: EventId) -> Option<u32> {
        self.entry(id).map(|e| e.weight)
    }

    pub fn handler(&self, id: EventId) -> Option<EventHandler> {
        self.entry(id).map(|e| e.handler)
    }

    fn entry(&self, id: EventId) -> Option<&EventEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Proportional draw over the registered weights. Falls back to the
    /// empty event when nothing can be selected.
    pub fn choose_event(&self, rng: &mut impl Rng) -> EventId {
        let weights: Vec<u32> = self.entries.iter().map(|e| e.weight).collect();
        match pick_weighted(rng, &weights) {
            Some(idx) => self.entries[idx].id,
            None => {
                tracing::warn!("event table has no weight; using the empty event");
                EventId::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;

    #[test]
    fn test_standard_catalog_weights() {
        let r = EventRegistry::standard();
        assert_eq!(r.len(), EventId::ALL.len());
        assert_eq!(r.total_weight(), 178);
        assert_eq!(r.weight(EventId::Monster), Some(30));
        assert_eq!(r.weight(EventId::Pyramid), Some(6));
    }

    #[test]
    fn test_name_round_trip() {
        for id in EventId::ALL {
            assert_eq!(EventId::from_name(id.name()), Some(id));
        }
        assert_eq!(EventId::from_name("dragon"), None);
    }

    #[test]
    fn test_choose_event_first_bracket() {
        let r = EventRegistry::standard();
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(r.choose_event(&mut rng), EventId::Monster);
    }

    #[test]
    fn test_choose_event_last_bracket() {
        let r = EventRegistry::standard();
        let mut rng = ScriptedRng::constant(1.0);
        assert_eq!(r.choose_event(&mut rng), EventId::Pyramid);
    }

    #[test]
    fn test_empty_registry_falls_back() {
        let r = EventRegistry::new();
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(r.choose_event(&mut rng), EventId::Empty);
    }

    #[test]
    fn test_zero_weights_fall_back() {
        let mut r = EventRegistry::new();
        r.register(EventId::Monster, 0, EventHandler::Combat(EnemyKind::Monster));
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(r.choose_event(&mut rng), EventId::Empty);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut r = EventRegistry::standard();
        r.register(EventId::Monster, 1, EventHandler::Combat(EnemyKind::Elite));
        assert_eq!(r.len(), EventId::ALL.len());
        assert_eq!(r.entries()[0].weight, 1);
        assert_eq!(
            r.handler(EventId::Monster),
            Some(EventHandler::Combat(EnemyKind::Elite))
        );
    }
}
