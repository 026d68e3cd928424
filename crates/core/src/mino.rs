//! Mino module - the three-cell vertical piece
//!
//! A mino occupies one column and three consecutive rows. Its position is the
//! logical row of its *bottom* cell; the other two cells sit directly above.
//! Rotation never moves the piece, it cycles the colors through the cells.

use crate::field::Block;
use crate::types::{BlockType, MINO_LEN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mino {
    pub x: i32,
    /// Logical row of the bottom cell.
    pub y: i32,
    /// Continuous row used for smooth rendering.
    pub visual_y: f32,
    /// Ordered top, middle, bottom.
    pub blocks: [Block; MINO_LEN],
}

impl Mino {
    /// Create a piece with its bottom cell at `(x, y)`; `kinds` are top to bottom
    pub fn new(x: i32, y: i32, kinds: [BlockType; MINO_LEN]) -> Self {
        Self {
            x,
            y,
            visual_y: y as f32,
            blocks: kinds.map(Block::new),
        }
    }

    pub fn kinds(&self) -> [BlockType; MINO_LEN] {
        self.blocks.map(|b| b.kind)
    }

    /// Cycle colors top to middle to bottom: the old top becomes the middle,
    /// the middle the bottom, and the bottom wraps to the top.
    pub fn rotate_up(&mut self) {
        let bottom = self.blocks[2].kind;
        self.blocks[2].kind = self.blocks[1].kind;
        self.blocks[1].kind = self.blocks[0].kind;
        self.blocks[0].kind = bottom;
    }

    /// Exact inverse of [`Mino::rotate_up`].
    pub fn rotate_down(&mut self) {
        let top = self.blocks[0].kind;
        self.blocks[0].kind = self.blocks[1].kind;
        self.blocks[1].kind = self.blocks[2].kind;
        self.blocks[2].kind = top;
    }

    /// Logical cells covered by the piece, top to bottom.
    pub fn cells(&self) -> [(i32, i32, Block); MINO_LEN] {
        let top = self.y - (MINO_LEN as i32 - 1);
        [
            (self.x, top, self.blocks[0]),
            (self.x, top + 1, self.blocks[1]),
            (self.x, top + 2, self.blocks[2]),
        ]
    }

    /// Same piece shifted by `(dx, dy)`.
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
