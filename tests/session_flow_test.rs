//! End-to-end session flows: exploring, fighting, shops, panels and the
//! deferred enemy attack queue.

use desert_quest::combat::{EnemyKind, Symbol};
use desert_quest::core::{GameSession, MessageLog, Panel, ScriptedRng, SessionConfig};
use desert_quest::events::{
    ChoiceEvent, Direction, EventHandler, EventId, EventRegistry, OutcomeEvent, ShopKind,
};
use desert_quest::items::{EquipmentSlot, Item, ItemStats, Rarity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

const SWORDS: [Symbol; 3] = [Symbol::Sword; 3];

/// Route session logs to the test harness; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_target(false)
        .try_init();
}

fn seeded(seed: u64) -> GameSession<ChaCha8Rng> {
    GameSession::with_rng(ChaCha8Rng::seed_from_u64(seed))
}

fn only(id: EventId, handler: EventHandler) -> EventRegistry {
    let mut registry = EventRegistry::new();
    registry.register(id, 1, handler);
    registry
}

fn scripted(registry: EventRegistry, draws: Vec<f64>) -> GameSession<ScriptedRng> {
    GameSession::new(
        registry,
        ScriptedRng::new(draws),
        MessageLog::new(200),
        SessionConfig {
            early_game_guard_steps: 0,
            ..Default::default()
        },
    )
}

/// Resolve whatever is in front of the player so the next move can happen.
fn clear_obstacles(s: &mut GameSession<ChaCha8Rng>) {
    for _ in 0..500 {
        if !s.battle.in_battle {
            break;
        }
        s.spin();
        s.settle();
    }
    match s.panel().cloned() {
        Some(Panel::Choice(_)) => {
            s.choose(0);
        }
        Some(Panel::Shop(_)) => {
            s.leave_shop();
        }
        None => {}
    }
}

// =========================================================================
// Long seeded walks
// =========================================================================

#[test]
fn test_seeded_walk_keeps_invariants() {
    init_tracing();
    for seed in [1, 7, 99] {
        let mut s = seeded(seed);
        let directions = Direction::ALL;
        for step in 0..200 {
            if s.is_run_over() {
                break;
            }
            clear_obstacles(&mut s);
            if s.is_run_over() || s.battle.in_battle || s.panel().is_some() {
                continue;
            }
            assert!(s.choose_direction(directions[step % 3]), "seed {} step {}", seed, step);

            assert!(s.player.hp <= s.player.max_hp);
            assert!(s.player.hp > 0 || s.is_run_over());
            assert!(s.player.stamina <= s.player.max_stamina);
            assert!(s.world.map.difficulty >= 1);
            if !s.battle.in_battle {
                assert!(s.battle.enemy.is_none());
            }
            // A fight in the last chamber delays the exit until it ends.
            if s.world.in_pyramid() && !s.battle.in_battle && !s.is_run_over() {
                assert!(s.world.dungeon.pyramid_steps < s.world.dungeon.pyramid_max_steps);
            }
            if !s.battle.in_battle && s.panel().is_none() && !s.is_run_over() {
                assert!(s.directions().is_some());
            }
        }
    }
}

#[test]
fn test_same_seed_same_story() {
    let play = |seed: u64| {
        let mut s = seeded(seed);
        for step in 0..40 {
            clear_obstacles(&mut s);
            if s.is_run_over() {
                break;
            }
            s.choose_direction(Direction::ALL[step % 3]);
        }
        (s.player.clone(), s.world.clone())
    };
    assert_eq!(play(5), play(5));
}

// =========================================================================
// Battles
// =========================================================================

#[test]
fn test_monster_fight_to_victory() {
    init_tracing();
    let registry = only(EventId::Monster, EventHandler::Combat(EnemyKind::Monster));
    let mut s = scripted(registry, vec![0.5]);
    assert!(s.choose_direction(Direction::Front));
    assert!(s.battle.in_battle);

    let gold = s.player.gold;
    s.submit_slot_result(SWORDS);
    let result = s.submit_slot_result(SWORDS).unwrap();
    assert!(result.enemy_defeated);
    assert!(!s.battle.in_battle);
    assert_eq!(s.player.gold, gold + 20);
    assert_eq!(s.player.xp, 22);
    assert!(s.directions().is_some());
    assert_eq!(s.pending_tasks(), 0);
}

#[test]
fn test_queued_attack_never_lands_after_victory() {
    let mut s = scripted(EventRegistry::standard(), vec![0.5]);
    s.battle(EnemyKind::Monster);
    s.submit_slot_result([Symbol::Star, Symbol::Coin, Symbol::Coin]);
    s.submit_slot_result([Symbol::Coin, Symbol::Star, Symbol::Star]);
    if let Some(enemy) = s.battle.enemy.as_mut() {
        enemy.hp = 1;
    }
    // The third round makes the attack due; the kill lands before it fires.
    s.submit_slot_result([Symbol::Shield, Symbol::Coin, Symbol::Coin]);
    assert_eq!(s.pending_tasks(), 1);
    let hp = s.player.hp;
    s.submit_slot_result([Symbol::Sword, Symbol::Coin, Symbol::Coin]);
    assert!(!s.battle.in_battle);
    s.advance_time(1_000);
    assert_eq!(s.player.hp, hp);
}

#[test]
fn test_auto_play_finishes_a_battle() {
    let mut s = seeded(12);
    s.battle(EnemyKind::Monster);
    assert!(s.start_auto_play());
    for _ in 0..400 {
        if !s.battle.in_battle {
            break;
        }
        s.advance_time(900);
    }
    assert!(!s.battle.in_battle);
    assert!(!s.is_auto_playing());
    assert_eq!(s.pending_tasks(), 0);
}

// =========================================================================
// Deaths outside battle
// =========================================================================

#[test]
fn test_lethal_sandstorm_spends_potion_then_ends_run() {
    init_tracing();
    let registry = only(EventId::Sandstorm, EventHandler::WeightedOutcome(OutcomeEvent::Sandstorm));
    let mut s = scripted(registry, vec![0.5]);
    let potions = s.player.potions;
    s.player.hp = 5;
    s.choose_direction(Direction::Front);
    assert_eq!(s.player.potions, potions - 1);
    assert_eq!(s.player.hp, s.player.max_hp);
    assert!(!s.is_run_over());

    s.player.potions = 0;
    s.player.hp = 5;
    s.choose_direction(Direction::Front);
    assert!(s.is_run_over());
    assert!(!s.choose_direction(Direction::Front));
    assert!(s.sink().contains("The journey ends here"));
}

// =========================================================================
// Panels
// =========================================================================

#[test]
fn test_choice_panel_blocks_movement_until_answered() {
    let registry = only(EventId::BeastPack, EventHandler::Choice(ChoiceEvent::BeastPack));
    let mut s = scripted(registry, vec![0.5]);
    s.choose_direction(Direction::Left);
    assert!(matches!(s.panel(), Some(Panel::Choice(_))));
    assert!(!s.choose_direction(Direction::Left));
    assert!(!s.choose(99));
    assert!(matches!(s.panel(), Some(Panel::Choice(_))));
    assert!(s.choose(0));
    assert!(!matches!(s.panel(), Some(Panel::Choice(_))));
}

#[test]
fn test_trading_post_sell_and_leave() {
    let registry = only(EventId::TradingPost, EventHandler::Shop(ShopKind::TradingPost));
    let mut s = scripted(registry, vec![0.5]);
    s.player.inventory.push(Item {
        name: "Leather Armor".to_string(),
        slot: EquipmentSlot::Armor,
        rarity: Rarity::Common,
        stats: ItemStats {
            def: 2,
            ..ItemStats::ZERO
        },
        affix: None,
        is_dungeon: false,
        enhance_level: 0,
    });
    s.choose_direction(Direction::Right);
    assert!(matches!(s.panel(), Some(Panel::Shop(_))));

    let gold = s.player.gold;
    assert!(s.shop_sell(0));
    assert_eq!(s.player.gold, gold + 30);
    assert!(s.player.inventory.is_empty());
    assert!(!s.shop_sell(0));

    assert!(s.leave_shop());
    assert!(s.panel().is_none());
    assert!(s.directions().is_some());
}

#[test]
fn test_enhance_requires_open_shop() {
    let mut s = seeded(3);
    assert_eq!(s.shop_enhance(EquipmentSlot::Weapon), None);
    assert!(s.sink().contains("No shop is open"));
}
