//! Direction hints: three precomputed branch paths the player picks from.
//!
//! A path is fixed when the hints are generated and consumed as-is when the
//! player commits to a direction; nothing is re-rolled in between.

use super::branches::branch_table;
use super::context::EncounterCtx;
use super::registry::{EventId, EventRegistry};
use crate::core::constants::*;
use crate::core::game_state::Buffs;
use crate::core::messages::MessageSink;
use crate::core::rng::{chance, pick_index};
use crate::dungeon::choose_pyramid_event;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Events the information buff can force into a direction.
pub const GOOD_EVENTS: [EventId; 7] = [
    EventId::Merchant,
    EventId::Oasis,
    EventId::BuriedTreasure,
    EventId::AncientShrine,
    EventId::CaravanRest,
    EventId::TradingPost,
    EventId::DesertOasis,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Front,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [Direction::Front, Direction::Left, Direction::Right];

    pub fn index(&self) -> usize {
        match self {
            Direction::Front => 0,
            Direction::Left => 1,
            Direction::Right => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Front => "Ahead",
            Direction::Left => "To the left",
            Direction::Right => "To the right",
        }
    }
}

/// Main event plus up to two distinct branch events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPath {
    pub main: EventId,
    #[serde(default, deserialize_with = "known_branches")]
    pub branches: Vec<&'static str>,
}

impl BranchPath {
    pub fn plain(main: EventId) -> Self {
        Self {
            main,
            branches: Vec::new(),
        }
    }
}

/// Map saved branch names back onto the static branch tables.
fn known_branches<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<&'static str>, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|name| {
            EventId::ALL
                .iter()
                .flat_map(|id| branch_table(*id).iter())
                .find(|b| **b == name.as_str())
                .copied()
                .ok_or_else(|| <D::Error as serde::de::Error>::custom(format!("unknown branch `{}`", name)))
        })
        .collect()
}

/// Roll one path: the main event, then a 30% first branch and, only when a
/// first branch exists, a 10% second distinct branch.
pub fn generate_branch_path(registry: &EventRegistry, in_pyramid: bool, rng: &mut impl Rng) -> BranchPath {
    let main = if in_pyramid {
        choose_pyramid_event(rng)
    } else {
        registry.choose_event(rng)
    };
    let mut path = BranchPath::plain(main);
    let table = branch_table(main);
    if chance(rng, BRANCH_CHANCE) {
        path.branches.push(table[pick_index(rng, table.len())]);
        if table.len() > 1 && chance(rng, SECOND_BRANCH_CHANCE) {
            let remaining: Vec<&'static str> = table
                .iter()
                .copied()
                .filter(|b| !path.branches.contains(b))
                .collect();
            path.branches.push(remaining[pick_index(rng, remaining.len())]);
        }
    }
    path
}

/// The three paths on offer for the next move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionHints {
    paths: [BranchPath; DIRECTION_COUNT],
    /// Compass was active when these hints were shown.
    pub revealed: bool,
}

impl DirectionHints {
    pub fn new(paths: [BranchPath; DIRECTION_COUNT]) -> Self {
        Self {
            paths,
            revealed: false,
        }
    }

    pub fn path(&self, direction: Direction) -> &BranchPath {
        &self.paths[direction.index()]
    }

    pub fn paths(&self) -> &[BranchPath; DIRECTION_COUNT] {
        &self.paths
    }

    /// Consume the hints, keeping only the chosen path.
    pub fn take(self, direction: Direction) -> BranchPath {
        let [front, left, right] = self.paths;
        match direction {
            Direction::Front => front,
            Direction::Left => left,
            Direction::Right => right,
        }
    }
}

/// Build the next set of hints and announce them.
///
/// Applies the oasis blessing tick first, then the overrides in order:
/// early-game pyramid guard, guaranteed rest stop, information buff. The
/// compass reveals event names and is consumed after display.
pub fn generate_direction_hints<R: Rng, S: MessageSink>(
    registry: &EventRegistry,
    guard_steps: u32,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> DirectionHints {
    tick_oasis_blessing(ctx);

    let in_pyramid = ctx.world.in_pyramid();
    let mut paths = [
        generate_branch_path(registry, in_pyramid, ctx.rng),
        generate_branch_path(registry, in_pyramid, ctx.rng),
        generate_branch_path(registry, in_pyramid, ctx.rng),
    ];

    if !in_pyramid && ctx.world.map.map_steps <= guard_steps {
        for path in paths.iter_mut() {
            if path.main == EventId::Pyramid {
                *path = generate_branch_path(registry, false, ctx.rng);
                if path.main == EventId::Pyramid {
                    *path = BranchPath::plain(EventId::Monster);
                }
            }
        }
    }

    if !in_pyramid && !ctx.world.map.has_encountered_caravan_rest {
        let progress = ctx.world.map.progress();
        if progress >= REST_STOP_FORCE_PROGRESS {
            let target = pick_index(ctx.rng, DIRECTION_COUNT);
            paths[target] = BranchPath::plain(EventId::CaravanRest);
            ctx.say("You sense a caravan rest stop somewhere close.");
        } else if progress >= REST_STOP_CHANCE_PROGRESS && chance(ctx.rng, REST_STOP_CHANCE) {
            let target = pick_index(ctx.rng, DIRECTION_COUNT);
            paths[target] = BranchPath::plain(EventId::CaravanRest);
        }
    }

    if ctx.world.buffs.bandit_info > 0 {
        let target = pick_index(ctx.rng, DIRECTION_COUNT);
        let good = GOOD_EVENTS[pick_index(ctx.rng, GOOD_EVENTS.len())];
        paths[target].main = good;
        Buffs::consume(&mut ctx.world.buffs.bandit_info);
        ctx.say(&format!(
            "Bandit intel: something good lies {} ({} uses left).",
            Direction::ALL[target].label().to_lowercase(),
            ctx.world.buffs.bandit_info
        ));
    }

    let mut hints = DirectionHints::new(paths);
    hints.revealed = ctx.world.buffs.compass_effect > 0;
    announce(&hints, in_pyramid, ctx);

    if Buffs::consume(&mut ctx.world.buffs.compass_effect) {
        if ctx.world.buffs.compass_effect > 0 {
            ctx.say(&format!(
                "The compass has {} uses left.",
                ctx.world.buffs.compass_effect
            ));
        } else {
            ctx.say("The compass falls still.");
        }
    }
    tracing::debug!(
        front = hints.path(Direction::Front).main.name(),
        left = hints.path(Direction::Left).main.name(),
        right = hints.path(Direction::Right).main.name(),
        "direction hints generated"
    );
    hints
}

fn tick_oasis_blessing<R: Rng, S: MessageSink>(ctx: &mut EncounterCtx<'_, R, S>) {
    if !Buffs::consume(&mut ctx.world.buffs.oasis_blessing) {
        return;
    }
    let hp = (ctx.player.max_hp as f64 * 0.05).floor() as u32;
    let stamina = (ctx.player.max_stamina as f64 * 0.05).floor() as u32;
    ctx.player.heal(hp);
    ctx.player.restore_stamina(stamina);
    ctx.say(&format!(
        "Oasis blessing: recovered {} HP and {} stamina ({} left).",
        hp, stamina, ctx.world.buffs.oasis_blessing
    ));
}

fn announce<R: Rng, S: MessageSink>(hints: &DirectionHints, in_pyramid: bool, ctx: &mut EncounterCtx<'_, R, S>) {
    ctx.say(if in_pyramid {
        "Passages branch off in the dark of the pyramid."
    } else {
        "The desert stretches out in every direction."
    });
    for direction in Direction::ALL {
        let path = hints.path(direction);
        let pool = path.main.hints();
        let hint = pool[pick_index(ctx.rng, pool.len())];
        let compass = if hints.revealed {
            format!(" [{}]", path.main.label())
        } else {
            String::new()
        };
        let marker = match path.branches.len() {
            0 => "",
            1 => " ✨",
            _ => " ⭐",
        };
        ctx.say(&format!("{}: {}{}{}.", direction.label(), hint, compass, marker));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Player;
    use crate::core::game_state::WorldState;
    use crate::core::messages::MessageLog;
    use crate::core::rng::ScriptedRng;
    use crate::events::registry::EventHandler;
    use crate::events::ChoiceEvent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pyramid_only() -> EventRegistry {
        let mut r = EventRegistry::new();
        r.register(EventId::Pyramid, 1, EventHandler::Choice(ChoiceEvent::Pyramid));
        r
    }

    #[test]
    fn test_branch_path_without_branch() {
        let registry = EventRegistry::standard();
        // Main draw lands on monster, branch roll fails.
        let mut rng = ScriptedRng::new(vec![0.0, 0.9]);
        let path = generate_branch_path(&registry, false, &mut rng);
        assert_eq!(path, BranchPath::plain(EventId::Monster));
    }

    #[test]
    fn test_branch_path_two_distinct_branches() {
        let registry = EventRegistry::standard();
        let mut rng = ScriptedRng::new(vec![0.0, 0.1, 0.0, 0.05, 0.0]);
        let path = generate_branch_path(&registry, false, &mut rng);
        assert_eq!(path.main, EventId::Monster);
        assert_eq!(path.branches, vec!["ambush", "treasure_drop"]);
    }

    #[test]
    fn test_second_branch_requires_first() {
        let registry = EventRegistry::standard();
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let path = generate_branch_path(&registry, false, &mut rng);
            assert!(path.branches.len() <= 2);
            if path.branches.len() == 2 {
                assert_ne!(path.branches[0], path.branches[1]);
            }
        }
    }

    #[test]
    fn test_pyramid_paths_use_pyramid_table() {
        let registry = pyramid_only();
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let path = generate_branch_path(&registry, true, &mut rng);
            assert!(matches!(
                path.main,
                EventId::Monster | EventId::Elite | EventId::MiniBoss | EventId::Oasis | EventId::Empty
            ));
        }
    }

    #[test]
    fn test_early_game_guard_substitutes_monster() {
        let registry = pyramid_only();
        let mut player = Player::new();
        let mut world = WorldState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut log = MessageLog::default();
        let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
        let hints = generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx);
        for path in hints.paths() {
            assert_eq!(*path, BranchPath::plain(EventId::Monster));
        }
    }

    #[test]
    fn test_guard_lifts_after_early_steps() {
        let registry = pyramid_only();
        let mut player = Player::new();
        let mut world = WorldState::default();
        world.map.map_steps = 11;
        world.map.map_goal = 100;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut log = MessageLog::default();
        let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
        let hints = generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx);
        assert!(hints.paths().iter().all(|p| p.main == EventId::Pyramid));
    }

    #[test]
    fn test_rest_stop_forced_late_in_map() {
        let registry = EventRegistry::standard();
        let mut player = Player::new();
        let mut world = WorldState::default();
        world.map.map_steps = 20;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut log = MessageLog::default();
        let hints = {
            let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
            generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx)
        };
        assert!(hints
            .paths()
            .iter()
            .any(|p| *p == BranchPath::plain(EventId::CaravanRest)));
        assert!(log.contains("caravan rest"));
    }

    #[test]
    fn test_rest_stop_not_forced_once_visited() {
        let registry = pyramid_only();
        let mut player = Player::new();
        let mut world = WorldState::default();
        world.map.map_steps = 25;
        world.map.has_encountered_caravan_rest = true;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut log = MessageLog::default();
        let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
        let hints = generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx);
        assert!(hints.paths().iter().all(|p| p.main == EventId::Pyramid));
    }

    #[test]
    fn test_bandit_info_forces_good_event() {
        let registry = pyramid_only();
        let mut player = Player::new();
        let mut world = WorldState::default();
        world.map.map_steps = 12;
        world.map.map_goal = 100;
        world.buffs.bandit_info = 2;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut log = MessageLog::default();
        let hints = {
            let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
            generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx)
        };
        let good: Vec<_> = hints
            .paths()
            .iter()
            .filter(|p| GOOD_EVENTS.contains(&p.main))
            .collect();
        assert_eq!(good.len(), 1);
        assert_eq!(world.buffs.bandit_info, 1);
    }

    #[test]
    fn test_oasis_blessing_and_compass_tick() {
        let registry = EventRegistry::standard();
        let mut player = Player::new();
        player.hp = 50;
        player.stamina = 10;
        let mut world = WorldState::default();
        world.buffs.oasis_blessing = 1;
        world.buffs.compass_effect = 2;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut log = MessageLog::new(50);
        let hints = {
            let mut ctx = EncounterCtx::new(&mut player, &mut world, &mut rng, &mut log);
            generate_direction_hints(&registry, EARLY_GAME_GUARD_STEPS, &mut ctx)
        };
        assert_eq!(player.hp, 55);
        assert_eq!(player.stamina, 12);
        assert_eq!(world.buffs.oasis_blessing, 0);
        assert!(hints.revealed);
        assert_eq!(world.buffs.compass_effect, 1);
        let label = hints.path(Direction::Front).main.label();
        assert!(log.contains(&format!("[{}]", label)));
    }

    #[test]
    fn test_take_returns_chosen_path() {
        let hints = DirectionHints::new([
            BranchPath::plain(EventId::Monster),
            BranchPath::plain(EventId::Oasis),
            BranchPath::plain(EventId::Merchant),
        ]);
        assert_eq!(hints.clone().take(Direction::Left).main, EventId::Oasis);
        assert_eq!(hints.take(Direction::Right).main, EventId::Merchant);
    }

    #[test]
    fn test_hints_survive_json() {
        let hints = DirectionHints::new([
            BranchPath {
                main: EventId::Monster,
                branches: vec!["ambush", "treasure_drop"],
            },
            BranchPath::plain(EventId::Oasis),
            BranchPath::plain(EventId::CaravanRest),
        ]);
        let json = serde_json::to_string(&hints).unwrap();
        let back: DirectionHints = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hints);

        let bad = r#"{"main":"Monster","branches":["dragon_flight"]}"#;
        assert!(serde_json::from_str::<BranchPath>(bad).is_err());
    }
}
