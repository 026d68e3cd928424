//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 15 visible rows (indexed 0-14)
//! - **Vanishing zone**: 3 hidden rows above row 0 (indexed -3..-1)
//! - **Spawn column**: `width / 2`, bottom cell on row 0
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_DELAY_MS` | 200 | Pause before the next piece spawns |
//! | `LOCK_DELAY_MS` | 200 | Pause between lock and the first match check |
//! | `CHAIN_DELAY_MS` | 500 | Pause before re-checking after a clear with nothing to fall |
//! | `GRAVITY_DELAY_MS` | 500 | Pause before re-checking once falling blocks have landed |
//! | `GRAVITY_ANIM_MS` | 500 | Duration of a post-clear falling-block animation |
//! | `GAUGE_RISE_MS` | 400 | Duration of a rising gauge segment |
//! | `GAUGE_DROP_MS` | 150 | Duration of the 100 -> 0 wrap segment |
//!
//! # Fall Speed
//!
//! Speeds are in blocks per second:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED` | 1.0 | Speed with an empty gauge at game start |
//! | `SOFT_DROP_BONUS` | 19.0 | Added while soft drop is held (20 rows/s total) |
//! | `MAX_GAUGE_BONUS` | 3.0 | Added at a full gauge, scaled linearly |
//! | `PER_MINUTE_BONUS` | 0.25 | Added per minute of play |
//!
//! # DAS/ARR Timing
//!
//! - `DEFAULT_DAS_MS`: 150ms - time before auto-repeat starts
//! - `DEFAULT_ARR_MS`: 50ms - interval between auto-repeats
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{BlockType, GameAction, GamePhase, FIELD_WIDTH};
//!
//! let block = BlockType::from_str("red").unwrap();
//! assert_eq!(block, BlockType::Red);
//! assert!(block.is_color());
//! assert!(!BlockType::None.is_color());
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert!(GamePhase::GameOver.is_terminal());
//! assert_eq!(FIELD_WIDTH, 8);
//! ```

/// Field width in cells (8 columns)
pub const FIELD_WIDTH: u8 = 8;

/// Visible field height in cells (15 rows)
pub const FIELD_HEIGHT: u8 = 15;

/// Hidden rows above the visible field (3 rows)
pub const VANISHING_HEIGHT: u8 = 3;

/// Number of cells in a piece
pub const MINO_LEN: usize = 3;

/// Number of upcoming pieces kept in the preview queue
pub const PREVIEW_DEPTH: usize = 2;

/// Minimum run length that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Gauge gain per matched cell and combo step
pub const GAUGE_MULTIPLIER: f64 = 2.0;

/// Gauge wraps back to zero at this value
pub const GAUGE_MAX: f64 = 100.0;

/// Fixed frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

pub const SPAWN_DELAY_MS: f64 = 200.0;

pub const LOCK_DELAY_MS: f64 = 200.0;

pub const CHAIN_DELAY_MS: f64 = 500.0;

pub const GRAVITY_DELAY_MS: f64 = 500.0;

pub const GRAVITY_ANIM_MS: f64 = 500.0;

pub const GAUGE_RISE_MS: f64 = 400.0;

pub const GAUGE_DROP_MS: f64 = 150.0;

/// Base fall speed in blocks per second (one row per 1000ms)
pub const BASE_SPEED: f64 = 1.0;

/// Soft drop bonus in blocks per second (one row per 50ms with the base speed)
pub const SOFT_DROP_BONUS: f64 = 19.0;

/// Bonus at a full gauge
pub const MAX_GAUGE_BONUS: f64 = 3.0;

/// Bonus per minute of play
pub const PER_MINUTE_BONUS: f64 = 0.25;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;


/// Block colors
///
/// `None` is a sentinel: it is never stored in the field and never takes part
/// in a match. Every other variant is a playable color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl BlockType {
    /// All playable colors, in generation order.
    pub const COLORS: [BlockType; 6] = [
        BlockType::Red,
        BlockType::Green,
        BlockType::Blue,
        BlockType::Yellow,
        BlockType::Purple,
        BlockType::Orange,
    ];

    /// True for every variant except `None`.
    pub fn is_color(&self) -> bool {
        !matches!(self, BlockType::None)
    }

    /// Stable numeric id (0 for `None`, 1..=6 for colors).
    pub fn index(&self) -> u8 {
        match self {
            BlockType::None => 0,
            BlockType::Red => 1,
            BlockType::Green => 2,
            BlockType::Blue => 3,
            BlockType::Yellow => 4,
            BlockType::Purple => 5,
            BlockType::Orange => 6,
        }
    }

    /// Inverse of [`BlockType::index`] for colors only.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=6 => Some(Self::COLORS[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Parse block type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::BlockType;
    ///
    /// assert_eq!(BlockType::from_str("Blue"), Some(BlockType::Blue));
    /// assert_eq!(BlockType::from_str("none"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(BlockType::Red),
            "green" => Some(BlockType::Green),
            "blue" => Some(BlockType::Blue),
            "yellow" => Some(BlockType::Yellow),
            "purple" => Some(BlockType::Purple),
            "orange" => Some(BlockType::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::None => "none",
            BlockType::Red => "red",
            BlockType::Green => "green",
            BlockType::Blue => "blue",
            BlockType::Yellow => "yellow",
            BlockType::Purple => "purple",
            BlockType::Orange => "orange",
        }
    }
}

/// Phases of the game-logic state machine
///
/// The cycle is Spawning → MinoFalling → MinoLocked → MatchCheck, with
/// MatchCheck ⇄ BlocksAnimating repeating while chains resolve, and
/// MatchCheck → Spawning once a check finds nothing. GameOver is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Spawning,
    MinoFalling,
    MinoLocked,
    MatchCheck,
    BlocksAnimating,
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver)
    }

    /// Dead time between pieces, where only the preview can be rotated.
    pub fn allows_preview_rotation(&self) -> bool {
        matches!(self, GamePhase::MinoLocked | GamePhase::MatchCheck)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Spawning => "spawning",
            GamePhase::MinoFalling => "falling",
            GamePhase::MinoLocked => "locked",
            GamePhase::MatchCheck => "matchCheck",
            GamePhase::BlocksAnimating => "animating",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Each action maps 1:1 onto a command of the game-logic core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Cycle the piece colors upward
    Rotate,
    /// Cycle the piece colors downward
    RotateBack,
    /// Drop to the lowest free row and lock immediately
    HardDrop,
    /// Begin boosting the fall speed
    SoftDropStart,
    /// Stop boosting the fall speed
    SoftDropStop,
    /// Cycle the colors of the next piece upward
    RotateNextUp,
    /// Cycle the colors of the next piece downward
    RotateNextDown,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softDropStart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "rotateback" => Some(GameAction::RotateBack),
            "harddrop" => Some(GameAction::HardDrop),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "rotatenextup" => Some(GameAction::RotateNextUp),
            "rotatenextdown" => Some(GameAction::RotateNextDown),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::RotateBack => "rotateBack",
            GameAction::HardDrop => "hardDrop",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::RotateNextUp => "rotateNextUp",
            GameAction::RotateNextDown => "rotateNextDown",
        }
    }
}

/// Named audio cues emitted by the core.
///
/// Fire-and-forget: the core queues them and the driver drains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A lateral shift succeeded
    Move,
    /// The active piece locked into the field
    Lock,
    /// A non-empty set of cells was cleared
    Clear,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Lock => "lock",
            SoundCue::Clear => "clear",
        }
    }
}
