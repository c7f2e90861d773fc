//! Pyramid encounter table.

use crate::core::rng::pick_weighted;
use crate::events::EventId;
use rand::Rng;

/// Main-event weights used for every direction while inside the pyramid.
pub const PYRAMID_EVENT_TABLE: [(EventId, u32); 5] = [
    (EventId::Monster, 35),
    (EventId::Elite, 25),
    (EventId::MiniBoss, 15),
    (EventId::Oasis, 10),
    (EventId::Empty, 15),
];

/// Weighted pick from the pyramid table, falling back to a monster.
pub fn choose_pyramid_event(rng: &mut impl Rng) -> EventId {
    let weights: Vec<u32> = PYRAMID_EVENT_TABLE.iter().map(|(_, w)| *w).collect();
    pick_weighted(rng, &weights)
        .map(|idx| PYRAMID_EVENT_TABLE[idx].0)
        .unwrap_or(EventId::Monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pyramid_table_brackets() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.34, 0.36, 0.61, 0.76, 0.86, 0.99]);
        let picks: Vec<EventId> = (0..7).map(|_| choose_pyramid_event(&mut rng)).collect();
        assert_eq!(
            picks,
            vec![
                EventId::Monster,
                EventId::Monster,
                EventId::Elite,
                EventId::MiniBoss,
                EventId::Oasis,
                EventId::Empty,
                EventId::Empty,
            ]
        );
    }

    #[test]
    fn test_pyramid_never_offers_shops() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..2000 {
            let id = choose_pyramid_event(&mut rng);
            assert!(PYRAMID_EVENT_TABLE.iter().any(|(e, _)| *e == id));
        }
    }
}
