//! Game state module - the phase state machine
//!
//! This module ties together the field, the active piece, the preview queue,
//! the combo gauge and the post-clear animators. A driver calls
//! [`GameState::update`] once per frame with elapsed milliseconds and feeds
//! player commands through [`GameState::apply_action`] (or the individual
//! command methods).
//!
//! Commands issued in the wrong phase are ignored and report `false`; they are
//! ordinary input races, not faults.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::anim::AnimatingBlock;
use crate::config::{ConfigError, GameConfig};
use crate::field::Field;
use crate::gauge::Gauge;
use crate::gravity::detach_falling_blocks;
use crate::matching::find_matches;
use crate::mino::Mino;
use crate::rng::{MinoQueue, RandomSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, CellSnapshot, FallingSnapshot, GameSnapshot};
use crate::speed::{fall_interval_ms, fall_speed};
use crate::types::{GameAction, GamePhase, SoundCue};

/// Cues buffered between two drains; older cues win when full.
pub const CUE_CAPACITY: usize = 16;

/// Sound cues waiting to be picked up by the driver.
pub type Cues = ArrayVec<SoundCue, CUE_CAPACITY>;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: GameConfig,
    field: Field,
    active: Option<Mino>,
    queue: MinoQueue<R>,
    falling: Vec<AnimatingBlock>,
    gauge: Gauge,
    phase: GamePhase,
    combo: u32,
    /// Countdown for Spawning and MatchCheck.
    phase_timer_ms: f64,
    fall_timer_ms: f64,
    /// Interval the fall timer is currently measured against.
    fall_interval_ms: f64,
    soft_drop: bool,
    elapsed_ms: f64,
    cues: Cues,
}

impl<R: RandomSource> GameState<R> {
    /// Create a game in the Spawning phase.
    ///
    /// Fails when `config` cannot describe a playable field.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: GameConfig, rng: R) -> Self {
        let field = Field::new(
            config.field_width,
            config.field_height,
            config.vanishing_height,
        );
        let queue = MinoQueue::new(config.preview_depth, config.spawn_column(), rng);
        let gauge = Gauge::new(config.gauge_rise_ms, config.gauge_drop_ms);
        let phase_timer_ms = config.spawn_delay_ms;

        info!(
            "new game: {}x{} field, vanishing {}, preview {}",
            config.field_width, config.field_height, config.vanishing_height, config.preview_depth
        );

        let mut state = Self {
            config,
            field,
            active: None,
            queue,
            falling: Vec::new(),
            gauge,
            phase: GamePhase::Spawning,
            combo: 0,
            phase_timer_ms,
            fall_timer_ms: 0.0,
            fall_interval_ms: 0.0,
            soft_drop: false,
            elapsed_ms: 0.0,
            cues: Cues::new(),
        };
        state.fall_interval_ms = state.current_interval();
        state
    }

    /// Reset to a fresh game, keeping the configuration and the generator.
    pub fn restart(&mut self) {
        self.field.clear();
        self.active = None;
        self.queue.regenerate();
        self.falling.clear();
        self.gauge.reset();
        self.combo = 0;
        self.soft_drop = false;
        self.elapsed_ms = 0.0;
        self.cues.clear();
        self.fall_timer_ms = 0.0;
        self.fall_interval_ms = self.current_interval();
        self.enter(GamePhase::Spawning, self.config.spawn_delay_ms);
        info!("game restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Logical gauge value in `[0, 100)`.
    pub fn gauge_value(&self) -> f64 {
        self.gauge.value()
    }

    /// Displayed gauge value in `[0, 100]`.
    pub fn gauge_visual(&self) -> f64 {
        self.gauge.visual_value()
    }

    pub fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Game time accumulated by `update`, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn fall_timer_ms(&self) -> f64 {
        self.fall_timer_ms
    }

    /// Reference interval of the running fall timer.
    pub fn fall_interval_ms(&self) -> f64 {
        self.fall_interval_ms
    }

    pub fn active(&self) -> Option<Mino> {
        self.active
    }

    /// Copy of the preview queue, next piece first.
    pub fn next_minos(&self) -> Vec<Mino> {
        self.queue.to_vec()
    }

    /// Copy of the blocks currently falling after a clear.
    pub fn falling_blocks(&self) -> Vec<AnimatingBlock> {
        self.falling.clone()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct grid access for scripted setups such as puzzles and tests.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Drain the sound cues raised since the last call.
    pub fn take_cues(&mut self) -> Cues {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.field_width = self.field.width();
        out.field_height = self.field.visible_height();
        out.vanishing_height = self.field.vanishing_height();
        out.active = self.active.map(ActiveSnapshot::from);

        out.next.clear();
        out.next.extend(self.queue.iter().map(Mino::kinds));

        out.cells.clear();
        out.cells
            .extend(self.field.blocks().map(|(x, y, block)| CellSnapshot {
                x,
                y,
                kind: block.kind,
            }));

        out.falling.clear();
        out.falling
            .extend(self.falling.iter().map(FallingSnapshot::from));

        out.gauge = self.gauge.visual_value();
        out.gauge_value = self.gauge.value();
        out.combo = self.combo;
        out.elapsed_ms = self.elapsed_ms;
        out.soft_drop = self.soft_drop;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the game by `dt_ms` milliseconds.
    ///
    /// Does nothing once the game is over. Negative or non-finite steps count
    /// as zero.
    pub fn update(&mut self, dt_ms: f64) {
        if self.phase.is_terminal() {
            return;
        }
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        self.elapsed_ms += dt;
        self.gauge.advance(dt);

        match self.phase {
            GamePhase::Spawning => self.update_spawning(dt),
            GamePhase::MinoFalling => self.update_falling(dt),
            GamePhase::MinoLocked => self.enter(GamePhase::MatchCheck, self.config.lock_delay_ms),
            GamePhase::MatchCheck => self.update_match_check(dt),
            GamePhase::BlocksAnimating => self.update_animating(dt),
            GamePhase::GameOver => {}
        }
    }

    fn enter(&mut self, phase: GamePhase, delay_ms: f64) {
        if phase != self.phase {
            debug!("phase {} -> {}", self.phase.as_str(), phase.as_str());
        }
        self.phase = phase;
        self.phase_timer_ms = delay_ms;
    }

    fn update_spawning(&mut self, dt: f64) {
        self.phase_timer_ms -= dt;
        if self.phase_timer_ms > 0.0 || self.gauge.is_animating() {
            return;
        }
        self.spawn();
    }

    /// Take the head of the queue; a blocked spawn cell ends the game.
    fn spawn(&mut self) {
        let mino = self.queue.draw();
        if self.field.is_collision(mino.x, mino.y) {
            info!(
                "game over: spawn cell ({}, {}) blocked after {:.0} ms",
                mino.x, mino.y, self.elapsed_ms
            );
            self.enter(GamePhase::GameOver, 0.0);
            return;
        }

        self.active = Some(mino);
        self.fall_interval_ms = self.current_interval();
        self.fall_timer_ms = self.fall_interval_ms;
        self.sync_visual();
        self.enter(GamePhase::MinoFalling, 0.0);
    }

    fn update_falling(&mut self, dt: f64) {
        if self.active.is_none() {
            self.enter(GamePhase::MatchCheck, self.config.lock_delay_ms);
            return;
        }

        let interval = self.current_interval();
        self.fall_interval_ms = interval;
        self.fall_timer_ms -= dt;

        // Bounded by the field height: every pass moves a row or locks.
        while self.fall_timer_ms <= 0.0 {
            if self.try_shift(0, 1) {
                self.fall_timer_ms += interval;
            } else {
                self.lock_active();
                self.enter(GamePhase::MinoLocked, 0.0);
                return;
            }
        }
        self.sync_visual();
    }

    fn update_match_check(&mut self, dt: f64) {
        self.phase_timer_ms -= dt;
        if self.phase_timer_ms > 0.0 {
            return;
        }

        let matches = find_matches(&self.field, self.config.min_match_len);
        if matches.is_empty() {
            if self.combo > 0 {
                debug!("chain ended at combo {}", self.combo);
            }
            self.combo = 0;
            self.enter(GamePhase::Spawning, self.config.spawn_delay_ms);
            return;
        }

        self.combo += 1;
        let gain = matches.len() as f64 * self.combo as f64 * self.config.gauge_multiplier;
        let wraps = self.gauge.add(gain);
        for &(x, y) in &matches {
            self.field.take(x, y);
        }
        self.push_cue(SoundCue::Clear);
        debug!(
            "cleared {} cells, combo {}, gauge +{} -> {:.1} ({} wraps)",
            matches.len(),
            self.combo,
            gain,
            self.gauge.value(),
            wraps
        );

        self.falling = detach_falling_blocks(&mut self.field, self.config.gravity_anim_ms);
        if self.falling.is_empty() {
            self.enter(GamePhase::MatchCheck, self.config.chain_delay_ms);
        } else {
            self.enter(GamePhase::BlocksAnimating, 0.0);
        }
    }

    fn update_animating(&mut self, dt: f64) {
        let field = &mut self.field;
        self.falling.retain_mut(|anim| {
            if anim.advance(dt) {
                field.set(anim.x, anim.end_y, Some(anim.block));
                false
            } else {
                true
            }
        });

        if self.falling.is_empty() {
            self.enter(GamePhase::MatchCheck, self.config.gravity_delay_ms);
        }
    }

    fn current_interval(&self) -> f64 {
        fall_interval_ms(fall_speed(
            &self.config,
            self.gauge.value(),
            self.elapsed_ms,
            self.soft_drop,
        ))
    }

    fn fits(&self, mino: &Mino) -> bool {
        mino.cells()
            .iter()
            .all(|&(x, y, _)| !self.field.is_collision(x, y))
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        if !self.fits(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Place the active piece into the grid.
    fn lock_active(&mut self) {
        let Some(mino) = self.active.take() else {
            return;
        };
        for (x, y, block) in mino.cells() {
            if !self.field.set(x, y, Some(block)) {
                warn!("lock at ({}, {}) is outside the field, block dropped", x, y);
            }
        }
        self.push_cue(SoundCue::Lock);
        debug!("locked piece at ({}, {})", mino.x, mino.y);
    }

    fn sync_visual(&mut self) {
        let interval = self.fall_interval_ms;
        let timer = self.fall_timer_ms;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let progress = if interval.is_finite() && interval > 0.0 {
            (1.0 - timer / interval).clamp(0.0, 1.0)
        } else {
            1.0
        };
        active.visual_y = ((active.y - 1) as f64 + progress) as f32;
    }

    fn push_cue(&mut self, cue: SoundCue) {
        let _ = self.cues.try_push(cue);
    }

    /// Shift the active piece.
    ///
    /// Legal steps are `dx` in `-1..=1` and `dy` in `0..=1`, not both zero.
    /// A lateral success raises the move cue; a downward step restarts the
    /// fall timer.
    pub fn move_mino(&mut self, dx: i32, dy: i32) -> bool {
        if self.phase != GamePhase::MinoFalling {
            return false;
        }
        if !(-1..=1).contains(&dx) || !(0..=1).contains(&dy) || (dx == 0 && dy == 0) {
            return false;
        }
        if !self.try_shift(dx, dy) {
            return false;
        }

        if dx != 0 {
            self.push_cue(SoundCue::Move);
        }
        if dy != 0 {
            self.fall_timer_ms = self.fall_interval_ms;
        }
        self.sync_visual();
        true
    }

    /// Cycle the active piece colors upward.
    pub fn rotate(&mut self) -> bool {
        self.with_active(Mino::rotate_up)
    }

    /// Cycle the active piece colors downward.
    pub fn rotate_back(&mut self) -> bool {
        self.with_active(Mino::rotate_down)
    }

    fn with_active(&mut self, f: impl FnOnce(&mut Mino)) -> bool {
        if self.phase != GamePhase::MinoFalling {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => {
                f(active);
                true
            }
            None => false,
        }
    }

    /// Drop to the lowest free row, lock, and go straight to MatchCheck.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != GamePhase::MinoFalling || self.active.is_none() {
            return false;
        }
        while self.try_shift(0, 1) {}
        self.lock_active();
        self.enter(GamePhase::MatchCheck, self.config.lock_delay_ms);
        true
    }

    pub fn start_soft_drop(&mut self) -> bool {
        self.set_soft_drop(true)
    }

    pub fn stop_soft_drop(&mut self) -> bool {
        self.set_soft_drop(false)
    }

    /// Toggle the soft-drop bonus, rescaling a running fall timer so the
    /// piece keeps its visual progress through the current row.
    fn set_soft_drop(&mut self, on: bool) -> bool {
        if self.phase.is_terminal() || self.soft_drop == on {
            return false;
        }
        self.soft_drop = on;

        let old = self.fall_interval_ms;
        let new = self.current_interval();
        if self.phase == GamePhase::MinoFalling {
            self.fall_timer_ms = if old.is_finite() && old > 0.0 && new.is_finite() {
                self.fall_timer_ms / old * new
            } else {
                new
            };
        }
        self.fall_interval_ms = new;
        true
    }

    /// Rotate the next preview piece; only between pieces.
    pub fn rotate_next_up(&mut self) -> bool {
        self.with_next(Mino::rotate_up)
    }

    pub fn rotate_next_down(&mut self) -> bool {
        self.with_next(Mino::rotate_down)
    }

    fn with_next(&mut self, f: impl FnOnce(&mut Mino)) -> bool {
        if !self.phase.allows_preview_rotation() {
            return false;
        }
        match self.queue.peek_mut() {
            Some(next) => {
                f(next);
                true
            }
            None => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_mino(-1, 0),
            GameAction::MoveRight => self.move_mino(1, 0),
            GameAction::MoveDown => self.move_mino(0, 1),
            GameAction::Rotate => self.rotate(),
            GameAction::RotateBack => self.rotate_back(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::SoftDropStart => self.start_soft_drop(),
            GameAction::SoftDropStop => self.stop_soft_drop(),
            GameAction::RotateNextUp => self.rotate_next_up(),
            GameAction::RotateNextDown => self.rotate_next_down(),
        }
    }
}

impl GameState<SimpleRng> {
    /// Default configuration driven by a seeded [`SimpleRng`].
    pub fn with_seed(seed: u32) -> Self {
        Self::build(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
