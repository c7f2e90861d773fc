//! Maps an event to its handler and runs a chosen path.

use super::branches::apply_branch;
use super::choices::ChoiceEvent;
use super::context::{Encounter, EncounterCtx};
use super::directions::BranchPath;
use super::registry::{EventHandler, EventId, EventRegistry};
use super::shops::ShopSession;
use crate::core::messages::MessageSink;
use rand::Rng;

/// Run one handler.
pub fn dispatch<R: Rng, S: MessageSink>(
    id: EventId,
    handler: EventHandler,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> Encounter {
    tracing::debug!(event = id.name(), "dispatching event");
    if id == EventId::CaravanRest {
        ctx.world.map.has_encountered_caravan_rest = true;
    }
    match handler {
        EventHandler::Combat(kind) => Encounter::Battle(kind),
        EventHandler::WeightedOutcome(outcome) => outcome.resolve(ctx),
        EventHandler::Choice(ChoiceEvent::Pyramid) if ctx.world.in_pyramid() => {
            ctx.say("You are already inside the pyramid.");
            Encounter::Resolved
        }
        EventHandler::Choice(choice) => choice.open(ctx),
        EventHandler::Shop(kind) => Encounter::Shop(ShopSession::open(kind, ctx)),
    }
}

/// Look up `id` in the registry and run it. Unregistered events are a
/// no-op with a message.
pub fn dispatch_event<R: Rng, S: MessageSink>(
    registry: &EventRegistry,
    id: EventId,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> Encounter {
    match registry.handler(id) {
        Some(handler) => dispatch(id, handler, ctx),
        None => {
            tracing::debug!(event = id.name(), "event has no registered handler");
            ctx.say("Nothing happened.");
            Encounter::Resolved
        }
    }
}

/// Dispatch by event name. Total: unknown names are a no-op.
pub fn dispatch_name<R: Rng, S: MessageSink>(
    registry: &EventRegistry,
    name: &str,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> Encounter {
    match EventId::from_name(name) {
        Some(id) => dispatch_event(registry, id, ctx),
        None => {
            tracing::debug!(event = name, "unknown event name");
            ctx.say("Nothing happened.");
            Encounter::Resolved
        }
    }
}

/// Run a path's main event, then its branches. Branches never start a
/// second battle or panel on top of one the main event opened; the first
/// unresolved encounter wins.
pub fn run_path<R: Rng, S: MessageSink>(
    registry: &EventRegistry,
    path: &BranchPath,
    ctx: &mut EncounterCtx<'_, R, S>,
) -> Encounter {
    let mut encounter = dispatch_event(registry, path.main, ctx);
    for branch in &path.branches {
        let next = apply_branch(branch, encounter.is_resolved(), ctx);
        if encounter.is_resolved() {
            encounter = next;
        }
    }
    encounter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Player;
    use crate::combat::EnemyKind;
    use crate::core::game_state::WorldState;
    use crate::core::messages::MessageLog;
    use crate::core::rng::ScriptedRng;

    fn run<T>(world: &mut WorldState, f: impl FnOnce(&mut EncounterCtx<'_, ScriptedRng, MessageLog>) -> T) -> (T, MessageLog) {
        let mut player = Player::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut log = MessageLog::default();
        let out = {
            let mut ctx = EncounterCtx::new(&mut player, world, &mut rng, &mut log);
            f(&mut ctx)
        };
        (out, log)
    }

    #[test]
    fn test_combat_events_start_battles() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        let (e, _) = run(&mut world, |ctx| dispatch_event(&registry, EventId::Elite, ctx));
        assert_eq!(e, Encounter::Battle(EnemyKind::Elite));
    }

    #[test]
    fn test_unknown_name_is_nothing_happened() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        let (e, log) = run(&mut world, |ctx| dispatch_name(&registry, "dragon_lair", ctx));
        assert_eq!(e, Encounter::Resolved);
        assert!(log.contains("Nothing happened."));
    }

    #[test]
    fn test_unregistered_event_is_nothing_happened() {
        let registry = EventRegistry::new();
        let mut world = WorldState::default();
        let (e, log) = run(&mut world, |ctx| dispatch_name(&registry, "monster", ctx));
        assert_eq!(e, Encounter::Resolved);
        assert!(log.contains("Nothing happened."));
    }

    #[test]
    fn test_caravan_rest_sets_flag_and_opens_shop() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        let (e, _) = run(&mut world, |ctx| dispatch_event(&registry, EventId::CaravanRest, ctx));
        assert!(matches!(e, Encounter::Shop(_)));
        assert!(world.map.has_encountered_caravan_rest);
    }

    #[test]
    fn test_pyramid_refused_inside_pyramid() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        world.dungeon.enter(0);
        let (e, _) = run(&mut world, |ctx| dispatch_event(&registry, EventId::Pyramid, ctx));
        assert_eq!(e, Encounter::Resolved);
    }

    #[test]
    fn test_branch_cannot_stack_battle() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        let path = BranchPath {
            main: EventId::Monster,
            branches: vec!["ambush", "secret_chamber"],
        };
        let (e, log) = run(&mut world, |ctx| run_path(&registry, &path, ctx));
        assert_eq!(e, Encounter::Battle(EnemyKind::Monster));
        assert!(log.contains("lose track"));
    }

    #[test]
    fn test_branch_battle_after_resolved_main() {
        let registry = EventRegistry::standard();
        let mut world = WorldState::default();
        let path = BranchPath {
            main: EventId::Empty,
            branches: vec!["ambush"],
        };
        let (e, _) = run(&mut world, |ctx| run_path(&registry, &path, ctx));
        assert_eq!(e, Encounter::Battle(EnemyKind::Monster));
    }
}
