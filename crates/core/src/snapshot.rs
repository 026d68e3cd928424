//! Read-only views of a game for renderers and other threads.
//!
//! Everything here is owned data: a snapshot taken under a lock stays valid
//! after the lock is released, no matter what the game does next.

use crate::anim::AnimatingBlock;
use crate::mino::Mino;
use crate::types::{BlockType, GamePhase, MINO_LEN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSnapshot {
    pub x: i32,
    pub y: i32,
    pub visual_y: f32,
    /// Top to bottom.
    pub kinds: [BlockType; MINO_LEN],
}

impl From<Mino> for ActiveSnapshot {
    fn from(value: Mino) -> Self {
        Self {
            x: value.x,
            y: value.y,
            visual_y: value.visual_y,
            kinds: value.kinds(),
        }
    }
}

/// One occupied grid cell in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub x: i32,
    pub y: i32,
    pub kind: BlockType,
}

/// A block on its way down after a clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingSnapshot {
    pub x: i32,
    pub visual_y: f32,
    pub kind: BlockType,
}

impl From<&AnimatingBlock> for FallingSnapshot {
    fn from(value: &AnimatingBlock) -> Self {
        Self {
            x: value.x,
            visual_y: value.visual_y(),
            kind: value.block.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub field_width: usize,
    pub field_height: usize,
    pub vanishing_height: usize,
    pub active: Option<ActiveSnapshot>,
    /// Preview queue, next piece first.
    pub next: Vec<[BlockType; MINO_LEN]>,
    /// Occupied cells, vanishing zone included.
    pub cells: Vec<CellSnapshot>,
    pub falling: Vec<FallingSnapshot>,
    /// Displayed gauge in `[0, 100]`.
    pub gauge: f64,
    /// Logical gauge in `[0, 100)`.
    pub gauge_value: f64,
    pub combo: u32,
    pub elapsed_ms: f64,
    pub soft_drop: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Block at a visible or vanishing cell, if any.
    pub fn cell(&self, x: i32, y: i32) -> Option<BlockType> {
        self.cells
            .iter()
            .find(|c| c.x == x && c.y == y)
            .map(|c| c.kind)
    }
}
