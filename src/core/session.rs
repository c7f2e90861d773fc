//! The session orchestrator: movement, battles, panels, deferred tasks and
//! persistence behind one owner.
//!
//! Every public operation is safe to call in any state. Calls that do not
//! make sense right now leave a message in the sink and change nothing.

use super::config::SessionConfig;
use super::game_state::{MapState, WorldState};
use super::messages::{MessageLog, MessageSink};
use super::rng::chance;
use super::scheduler::{DeferredAction, DeferredQueue, ScheduledTask};
use super::snapshot::Snapshot;
use crate::character::Player;
use crate::combat::{
    award_victory, create_enemy, enemy_auto_attack, flee_chance, resolve_death, resolve_round,
    spin_reels, BattleState, DeathOutcome, EnemyKind, RoundResult, Symbol,
};
use crate::dungeon::DungeonState;
use crate::enhancement::{EnhancementOutcome, EnhancementRecord};
use crate::events::{
    generate_direction_hints, run_path, ChoicePrompt, Direction, DirectionHints, Encounter,
    EncounterCtx, EventRegistry, ShopSession,
};
use crate::items::EquipmentSlot;
use crate::save_manager::PersistenceError;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// Upper bound on tasks fired by one `settle` call. Auto-play keeps
/// rescheduling itself for as long as a battle lasts.
pub const SETTLE_TASK_LIMIT: usize = 10_000;

/// A panel waiting for player input. Movement is refused while one is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Choice(ChoicePrompt),
    Shop(ShopSession),
}

pub struct GameSession<R: Rng, S: MessageSink = MessageLog> {
    pub player: Player,
    pub world: WorldState,
    pub battle: BattleState,
    pub enhancement: EnhancementRecord,
    directions: Option<DirectionHints>,
    panel: Option<Panel>,
    auto_play: bool,
    queue: DeferredQueue,
    registry: EventRegistry,
    config: SessionConfig,
    rng: R,
    sink: S,
    run_id: Uuid,
}

impl<R: Rng> GameSession<R, MessageLog> {
    /// Standard catalog, default config, bounded message log.
    pub fn with_rng(rng: R) -> Self {
        let config = SessionConfig::default();
        let sink = MessageLog::new(config.message_history_limit);
        Self::new(EventRegistry::standard(), rng, sink, config)
    }
}

impl<R: Rng, S: MessageSink> GameSession<R, S> {
    pub fn new(registry: EventRegistry, rng: R, sink: S, config: SessionConfig) -> Self {
        let mut session = Self {
            player: Player::new(),
            world: fresh_world(&config),
            battle: BattleState::default(),
            enhancement: EnhancementRecord::default(),
            directions: None,
            panel: None,
            auto_play: false,
            queue: DeferredQueue::new(),
            registry,
            config,
            rng,
            sink,
            run_id: Uuid::new_v4(),
        };
        tracing::info!(run_id = %session.run_id, "session started");
        session.refresh_hints();
        session
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn directions(&self) -> Option<&DirectionHints> {
        self.directions.as_ref()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// True once the run has ended with no potions left.
    pub fn is_run_over(&self) -> bool {
        self.battle.controls_locked
    }

    fn say(&mut self, text: &str) {
        self.sink.display(text);
    }

    fn build_hints(&mut self) -> DirectionHints {
        let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
        generate_direction_hints(&self.registry, self.config.early_game_guard_steps, &mut ctx)
    }

    /// Precompute the next three paths.
    pub fn refresh_hints(&mut self) {
        let hints = self.build_hints();
        self.directions = Some(hints);
    }

    // ── Movement ───────────────────────────────────────────────────────

    /// Commit to a direction and run the path fixed for it.
    pub fn choose_direction(&mut self, direction: Direction) -> bool {
        if self.battle.controls_locked {
            self.say("Your journey has ended.");
            return false;
        }
        if self.battle.in_battle {
            tracing::debug!("move ignored during battle");
            self.say("You cannot move during a battle.");
            return false;
        }
        if self.panel.is_some() {
            tracing::debug!("move ignored while a panel is open");
            self.say("Finish what is in front of you first.");
            return false;
        }
        let hints = match self.directions.take() {
            Some(hints) => hints,
            None => self.build_hints(),
        };
        let path = hints.take(direction);
        self.world.advance_step();
        self.say(&format!("You head {}.", direction.label().to_lowercase()));

        let encounter = {
            let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
            run_path(&self.registry, &path, &mut ctx)
        };
        self.apply_encounter(encounter);
        self.after_move();
        true
    }

    fn apply_encounter(&mut self, encounter: Encounter) {
        match encounter {
            Encounter::Resolved => {}
            Encounter::Battle(kind) => {
                self.battle(kind);
            }
            Encounter::Choice(prompt) => {
                for (idx, option) in prompt.options.iter().enumerate() {
                    self.sink.display(&format!("[{}] {}", idx, option.replace('_', " ")));
                }
                self.panel = Some(Panel::Choice(prompt));
            }
            Encounter::Shop(shop) => {
                self.panel = Some(Panel::Shop(shop));
            }
            Encounter::EnterDungeon => {
                self.enter_pyramid();
            }
        }
    }

    /// Death check, pyramid completion, then map completion, then fresh
    /// hints once nothing is waiting on the player.
    fn after_move(&mut self) {
        // Sandstorms, quicksand and choice outcomes can kill outside battle.
        self.check_death();
        if self.battle.in_battle || self.battle.controls_locked {
            return;
        }
        if self.world.dungeon.is_complete() {
            self.say("You have reached the heart of the pyramid and find the way out.");
            self.leave_pyramid();
        } else if !self.world.in_pyramid() && self.world.map.goal_reached() {
            self.say("You crossed this stretch of desert! The sands ahead grow harsher.");
            self.world.next_map(self.config.map_goal_increment);
        }
        if self.panel.is_none() {
            self.refresh_hints();
        }
    }

    // ── Battle ─────────────────────────────────────────────────────────

    /// Start a battle. Refused while one is already running.
    pub fn battle(&mut self, kind: EnemyKind) -> bool {
        if self.battle.controls_locked {
            self.say("Your journey has ended.");
            return false;
        }
        if self.battle.in_battle {
            self.say("You are already fighting.");
            return false;
        }
        self.auto_play = false;
        self.queue.clear();
        self.battle.epoch += 1;
        self.battle.attack_pending = false;
        self.battle.reset_combo();
        let enemy = create_enemy(kind, self.world.difficulty(), self.world.in_pyramid());
        self.say(&format!(
            "A {} appears! HP {}, ATK {}.",
            enemy.name, enemy.max_hp, enemy.base_attack
        ));
        tracing::info!(
            enemy = %enemy.name,
            hp = enemy.max_hp,
            attack = enemy.base_attack,
            in_pyramid = self.world.in_pyramid(),
            "battle started"
        );
        self.battle.enemy = Some(enemy);
        self.battle.in_battle = true;
        self.directions = None;
        true
    }

    fn end_battle(&mut self) {
        self.battle.in_battle = false;
        self.battle.enemy = None;
        self.battle.epoch += 1;
        self.battle.attack_pending = false;
        self.battle.reset_combo();
        self.auto_play = false;
        self.queue.clear();
    }

    /// Resolve one round from three slot symbols.
    pub fn submit_slot_result(&mut self, symbols: [Symbol; 3]) -> Option<RoundResult> {
        if !self.battle.accepts_input() {
            tracing::debug!("slot result ignored outside battle");
            self.say("There is nothing to fight right now.");
            return None;
        }
        let result = resolve_round(
            &mut self.player,
            &mut self.battle,
            self.world.difficulty(),
            symbols,
            &mut self.rng,
            &mut self.sink,
        );
        if result.enemy_defeated {
            self.victory();
        } else {
            if result.enemy_attack_due {
                self.schedule_enemy_attack();
            }
            self.check_death();
        }
        Some(result)
    }

    /// Same as `submit_slot_result`, from reel glyphs.
    pub fn submit_glyphs(&mut self, glyphs: [&str; 3]) -> Option<RoundResult> {
        self.submit_slot_result(glyphs.map(Symbol::from_glyph))
    }

    /// Spin the reels once and resolve the result.
    pub fn spin(&mut self) -> Option<RoundResult> {
        if !self.battle.accepts_input() {
            self.say("There is nothing to fight right now.");
            return None;
        }
        let symbols = spin_reels(&mut self.rng);
        self.say(&format!(
            "The reels stop: {} {} {}",
            symbols[0].glyph(),
            symbols[1].glyph(),
            symbols[2].glyph()
        ));
        self.submit_slot_result(symbols)
    }

    fn schedule_enemy_attack(&mut self) {
        if self.battle.attack_pending {
            return;
        }
        self.battle.attack_pending = true;
        self.queue.schedule(
            self.config.enemy_attack_delay_ms,
            self.battle.epoch,
            DeferredAction::EnemyAttack,
        );
    }

    fn victory(&mut self) {
        let Some(enemy) = self.battle.enemy.clone() else {
            return;
        };
        let in_pyramid = self.world.in_pyramid();
        let (rewards, loot) = award_victory(
            &mut self.player,
            &enemy,
            self.world.difficulty(),
            in_pyramid,
            &mut self.rng,
            &mut self.sink,
        );
        let bandits_loot = std::mem::take(&mut self.world.buffs.bandits_loot);
        if bandits_loot > 0 {
            self.player.gold += bandits_loot;
            self.say(&format!("You also claim the bandits' stash: {} gold.", bandits_loot));
        }
        tracing::info!(
            enemy = %enemy.name,
            gold = rewards.gold,
            xp = rewards.xp,
            drops = loot.len(),
            "victory"
        );
        self.end_battle();
        self.after_move();
    }

    fn check_death(&mut self) {
        match resolve_death(&mut self.player, &mut self.sink) {
            Some(DeathOutcome::Revived { potions_left }) => {
                tracing::info!(potions_left, "player revived");
            }
            Some(DeathOutcome::RunOver) => {
                tracing::info!(run_id = %self.run_id, "run over");
                self.end_battle();
                self.battle.controls_locked = true;
                self.directions = None;
                self.panel = None;
            }
            None => {}
        }
    }

    /// Try to run. Success ends the battle with no rewards; failure gives
    /// the enemy an immediate attack.
    pub fn attempt_flee(&mut self) -> bool {
        if !self.battle.accepts_input() {
            tracing::debug!("flee ignored outside battle");
            self.say("There is nothing to flee from.");
            return false;
        }
        if chance(&mut self.rng, flee_chance(self.player.luck_combat)) {
            if let Some(enemy) = self.battle.enemy.as_mut() {
                enemy.hp = 0;
            }
            self.say("You slip away into the dunes.");
            tracing::info!("fled from battle");
            self.end_battle();
            self.after_move();
            true
        } else {
            self.say("You failed to escape!");
            enemy_auto_attack(&mut self.player, &mut self.battle, &mut self.rng, &mut self.sink);
            self.check_death();
            false
        }
    }

    // ── Auto-play and deferred tasks ───────────────────────────────────

    pub fn start_auto_play(&mut self) -> bool {
        if !self.battle.accepts_input() {
            self.say("Auto-play only works during a battle.");
            return false;
        }
        if !self.auto_play {
            self.auto_play = true;
            self.queue.schedule(
                self.config.auto_spin_interval_ms,
                self.battle.epoch,
                DeferredAction::AutoSpin,
            );
            self.say("Auto-play on.");
        }
        true
    }

    pub fn stop_auto_play(&mut self) {
        if self.auto_play {
            self.auto_play = false;
            self.say("Auto-play off.");
        }
    }

    /// Move the virtual clock forward, firing due tasks in order.
    pub fn advance_time(&mut self, ms: u64) {
        let deadline = self.queue.now_ms() + ms;
        while let Some(task) = self.queue.pop_due(deadline) {
            self.run_task(task);
        }
        self.queue.set_now(deadline);
    }

    /// Fire pending tasks until the queue drains.
    pub fn settle(&mut self) {
        let mut fired = 0;
        while let Some(due) = self.queue.last_due() {
            while let Some(task) = self.queue.pop_due(due) {
                self.run_task(task);
                fired += 1;
                if fired >= SETTLE_TASK_LIMIT {
                    tracing::warn!(fired, "settle stopped at task limit");
                    return;
                }
            }
        }
    }

    fn task_is_live(&self, task: &ScheduledTask) -> bool {
        task.battle_epoch == self.battle.epoch && self.battle.in_battle && self.battle.enemy_alive()
    }

    fn run_task(&mut self, task: ScheduledTask) {
        let live = self.task_is_live(&task);
        match task.action {
            DeferredAction::EnemyAttack => {
                if task.battle_epoch == self.battle.epoch {
                    self.battle.attack_pending = false;
                }
                if !live {
                    tracing::debug!(epoch = task.battle_epoch, "dropped stale enemy attack");
                    return;
                }
                enemy_auto_attack(&mut self.player, &mut self.battle, &mut self.rng, &mut self.sink);
                self.check_death();
            }
            DeferredAction::AutoSpin => {
                if !live || !self.auto_play {
                    tracing::debug!(epoch = task.battle_epoch, "dropped auto-spin");
                    if task.battle_epoch == self.battle.epoch {
                        self.auto_play = false;
                    }
                    return;
                }
                self.spin();
                if self.auto_play && self.battle.accepts_input() {
                    self.queue.schedule(
                        self.config.auto_spin_interval_ms,
                        self.battle.epoch,
                        DeferredAction::AutoSpin,
                    );
                } else {
                    self.auto_play = false;
                }
            }
        }
    }

    // ── Equipment ──────────────────────────────────────────────────────

    pub fn equip(&mut self, index: usize) -> bool {
        self.player.equip(index, &mut self.sink)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> bool {
        self.player.unequip(slot, &mut self.sink)
    }

    // ── Pyramid ────────────────────────────────────────────────────────

    fn enter_pyramid(&mut self) -> bool {
        if !self.world.dungeon.enter(self.world.map.map_steps) {
            self.say("You are already inside the pyramid.");
            return false;
        }
        self.world.dungeon.pyramid_max_steps = self.config.pyramid_length;
        self.say(&format!(
            "You step into the pyramid. {} chambers lie ahead.",
            self.world.dungeon.pyramid_max_steps
        ));
        tracing::info!(map_steps = self.world.map.map_steps, "entered pyramid");
        true
    }

    fn leave_pyramid(&mut self) -> bool {
        match self.world.dungeon.exit() {
            Some(steps) => {
                self.world.map.map_steps = steps;
                self.say("You return to the desert.");
                tracing::info!(map_steps = steps, "left pyramid");
                true
            }
            None => false,
        }
    }

    pub fn enter_dungeon(&mut self) -> bool {
        if self.battle.in_battle || self.battle.controls_locked {
            self.say("You cannot do that right now.");
            return false;
        }
        if !self.enter_pyramid() {
            return false;
        }
        if self.panel.is_none() {
            self.refresh_hints();
        }
        true
    }

    pub fn exit_dungeon(&mut self) -> bool {
        if self.battle.in_battle || self.battle.controls_locked {
            self.say("You cannot do that right now.");
            return false;
        }
        if !self.leave_pyramid() {
            self.say("You are not inside the pyramid.");
            return false;
        }
        if self.panel.is_none() {
            self.refresh_hints();
        }
        true
    }

    // ── Panels ─────────────────────────────────────────────────────────

    /// Answer the open choice panel. An invalid option keeps it open.
    pub fn choose(&mut self, option: usize) -> bool {
        let event = match &self.panel {
            Some(Panel::Choice(prompt)) => prompt.event,
            _ => {
                self.say("There is no choice to make.");
                return false;
            }
        };
        let outcome = {
            let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
            event.resolve(option, &mut ctx)
        };
        let Some(encounter) = outcome else {
            return false;
        };
        self.panel = None;
        self.apply_encounter(encounter);
        self.after_move();
        true
    }

    pub fn shop_buy(&mut self, index: usize) -> bool {
        let Some(Panel::Shop(shop)) = self.panel.as_mut() else {
            self.sink.display("No shop is open.");
            return false;
        };
        let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
        shop.buy(index, &mut ctx)
    }

    pub fn shop_sell(&mut self, index: usize) -> bool {
        let Some(Panel::Shop(shop)) = self.panel.as_mut() else {
            self.sink.display("No shop is open.");
            return false;
        };
        let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
        shop.sell(index, &mut ctx)
    }

    pub fn shop_enhance(&mut self, slot: EquipmentSlot) -> Option<EnhancementOutcome> {
        let Some(Panel::Shop(shop)) = self.panel.as_mut() else {
            self.sink.display("No shop is open.");
            return None;
        };
        let mut ctx = EncounterCtx::new(&mut self.player, &mut self.world, &mut self.rng, &mut self.sink);
        shop.enhance(slot, &mut self.enhancement, &mut ctx)
    }

    pub fn leave_shop(&mut self) -> bool {
        if !matches!(self.panel, Some(Panel::Shop(_))) {
            self.say("No shop is open.");
            return false;
        }
        self.panel = None;
        self.say("You leave the shop.");
        self.after_move();
        true
    }

    // ── Persistence ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_id: self.run_id,
            saved_at: Utc::now(),
            player: self.player.clone(),
            world: self.world.clone(),
            battle: self.battle.clone(),
            enhancement: self.enhancement.clone(),
            hints: self.directions.clone(),
        }
    }

    pub fn save(&self) -> Result<String, PersistenceError> {
        Ok(self.snapshot().to_json()?)
    }

    /// Restore from a JSON blob. On error the session is left untouched.
    pub fn load(&mut self, blob: &str) -> Result<(), PersistenceError> {
        match Snapshot::from_json(blob) {
            Ok(snapshot) => {
                self.restore(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "snapshot rejected");
                self.say("The save could not be loaded. It is missing or corrupt.");
                Err(e.into())
            }
        }
    }

    /// Replace the persistent state. Transient state (pending tasks,
    /// panels, auto-play) is dropped. Saved hints are kept as shown; an
    /// enemy attack that was already due is scheduled again.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let epoch = self.battle.epoch + 1;
        self.run_id = snapshot.run_id;
        self.player = snapshot.player;
        self.world = snapshot.world;
        self.battle = snapshot.battle;
        self.battle.epoch = epoch;
        self.battle.attack_pending = false;
        self.enhancement = snapshot.enhancement;
        self.queue.clear();
        self.auto_play = false;
        self.panel = None;
        self.directions = None;
        tracing::info!(run_id = %self.run_id, saved_at = %snapshot.saved_at, "snapshot restored");
        self.say("Save loaded.");
        if self.battle.in_battle {
            let due = self
                .battle
                .enemy
                .as_ref()
                .is_some_and(|e| e.is_alive() && e.turns_to_attack <= 0);
            if due {
                self.schedule_enemy_attack();
            }
        } else if !self.battle.controls_locked {
            match snapshot.hints {
                Some(hints) => self.directions = Some(hints),
                None => self.refresh_hints(),
            }
        }
    }

    /// Throw the run away and start over with a fresh player.
    pub fn restart(&mut self) {
        let epoch = self.battle.epoch + 1;
        self.player = Player::new();
        self.world = fresh_world(&self.config);
        self.battle = BattleState {
            epoch,
            ..Default::default()
        };
        self.enhancement = EnhancementRecord::default();
        self.queue.clear();
        self.auto_play = false;
        self.panel = None;
        self.run_id = Uuid::new_v4();
        tracing::info!(run_id = %self.run_id, "run restarted");
        self.say("A new journey begins.");
        self.refresh_hints();
    }
}

fn fresh_world(config: &SessionConfig) -> WorldState {
    WorldState {
        map: MapState::new(config.starting_map_goal),
        dungeon: DungeonState::new(config.pyramid_length),
        ..Default::default()
    }
}
