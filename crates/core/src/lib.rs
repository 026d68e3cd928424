//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block match-3 game. It has no
//! dependency on terminals or input devices, so it runs the same headless, in
//! tests, or behind a renderer.
//!
//! # Module Structure
//!
//! - [`config`]: tunables and their validation
//! - [`field`]: grid with an index-shifted vanishing zone and collision queries
//! - [`mino`]: the three-cell vertical piece and its color rotation
//! - [`rng`]: injectable randomness and the preview queue
//! - [`matching`]: run detection over rows, columns and both diagonals
//! - [`gravity`]: per-column compaction after a clear
//! - [`anim`]: falling-block and tween animators
//! - [`gauge`]: combo gauge with wrap-aware display segments
//! - [`speed`]: fall speed and interval model
//! - [`game_state`]: the phase state machine
//! - [`snapshot`]: owned read-only views for renderers
//! - [`shared`]: mutex handle shared by the frame loop and the input thread
//!
//! # Phases
//!
//! | Phase | Leaves when |
//! |-------|-------------|
//! | Spawning | spawn delay elapsed and gauge display idle |
//! | MinoFalling | the piece cannot move down and locks |
//! | MinoLocked | next update |
//! | MatchCheck | delay elapsed; clears feed BlocksAnimating or another check |
//! | BlocksAnimating | every falling block has landed |
//! | GameOver | never |
//!
//! # Example
//!
//! ```
//! use tui_match3_core::GameState;
//! use tui_match3_types::{GameAction, GamePhase};
//!
//! let mut game = GameState::with_seed(12345);
//! game.update(200.0);
//! assert_eq!(game.phase(), GamePhase::MinoFalling);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.phase(), GamePhase::MatchCheck);
//! assert_eq!(game.field().occupied_count(), 3);
//! ```
//!
//! # Timing
//!
//! All delays are countdowns in the milliseconds passed to
//! [`GameState::update`](game_state::GameState::update); there is no fixed
//! tick. Large steps are handled: a piece may fall several rows in one call.

pub mod anim;
pub mod config;
pub mod field;
pub mod game_state;
pub mod gauge;
pub mod gravity;
pub mod matching;
pub mod mino;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod speed;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use anim::{AnimatingBlock, BounceOut, Tween};
pub use config::{ConfigError, GameConfig};
pub use field::{Block, Cell, Field};
pub use game_state::{Cues, GameState, CUE_CAPACITY};
pub use gauge::Gauge;
pub use gravity::detach_falling_blocks;
pub use matching::find_matches;
pub use mino::Mino;
pub use rng::{random_block, MinoQueue, RandomSource, SimpleRng};
pub use shared::SharedGame;
pub use snapshot::{ActiveSnapshot, CellSnapshot, FallingSnapshot, GameSnapshot};
pub use speed::{fall_interval_ms, fall_speed};
