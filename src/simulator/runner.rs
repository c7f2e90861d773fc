//! Battle runner built on the same round resolution the session uses.
//!
//! Each run is one fresh player against one enemy. The enemy's attack fires
//! right after the round that made it due, which keeps the player-first
//! ordering without a clock.

use super::config::SimConfig;
use super::report::{BattleRun, SimReport};
use crate::character::Player;
use crate::combat::{
    award_victory, create_enemy, enemy_auto_attack, resolve_death, resolve_round, spin_reels,
    BattleState, DeathOutcome,
};
use crate::core::messages::NullSink;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_battle(config, &mut rng);
        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                won = run.won,
                rounds = run.rounds,
                revives = run.revives,
                "simulated battle"
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs);
    if config.verbosity >= 1 {
        tracing::info!(
            runs = report.num_runs,
            win_rate = report.win_rate,
            avg_rounds = report.avg_rounds,
            "simulation finished"
        );
    }
    report
}

/// Auto-battle one enemy to a win, a final death or the round limit.
pub fn simulate_single_battle(config: &SimConfig, rng: &mut impl Rng) -> BattleRun {
    let mut player = Player::new();
    player.potions = config.potions;
    let start_gold = player.gold;
    let mut battle = BattleState {
        in_battle: true,
        enemy: Some(create_enemy(config.enemy_kind, config.difficulty, config.in_pyramid)),
        ..Default::default()
    };
    let mut sink = NullSink;
    let mut run = BattleRun::default();

    while run.rounds < config.max_rounds {
        let symbols = spin_reels(rng);
        let result = resolve_round(&mut player, &mut battle, config.difficulty, symbols, rng, &mut sink);
        run.rounds += 1;

        if result.enemy_defeated {
            if let Some(enemy) = battle.enemy.take() {
                let (rewards, loot) = award_victory(
                    &mut player,
                    &enemy,
                    config.difficulty,
                    config.in_pyramid,
                    rng,
                    &mut sink,
                );
                run.xp_gained = rewards.xp;
                run.drops = loot.len() as u32;
            }
            battle.in_battle = false;
            run.won = true;
            break;
        }

        if let Some(DeathOutcome::RunOver) = check_death(&mut player, &mut run, &mut sink) {
            break;
        }
        if result.enemy_attack_due {
            enemy_auto_attack(&mut player, &mut battle, rng, &mut sink);
            if let Some(DeathOutcome::RunOver) = check_death(&mut player, &mut run, &mut sink) {
                break;
            }
        }
    }

    run.timed_out = !run.won && !run.died;
    run.gold_gained = player.gold.saturating_sub(start_gold);
    run.final_hp = player.hp;
    run
}

fn check_death(player: &mut Player, run: &mut BattleRun, sink: &mut NullSink) -> Option<DeathOutcome> {
    let outcome = resolve_death(player, sink);
    match outcome {
        Some(DeathOutcome::Revived { .. }) => run.revives += 1,
        Some(DeathOutcome::RunOver) => run.died = true,
        None => {}
    }
    outcome
}
