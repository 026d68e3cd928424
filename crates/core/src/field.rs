//! Field module - manages the game grid
//!
//! The field is a `width x (visible + vanishing)` grid where each cell is empty
//! or holds a [`Block`]. Storage is a flat, row-major array; the vanishing zone
//! is the first `vanishing_height` rows of that array.
//!
//! Coordinates are *logical*: `(x, y)` where x ranges `0..width` (left to right)
//! and y ranges `-vanishing_height..visible_height` (top to bottom). Row 0 is the
//! topmost visible row; negative rows are hidden spawn headroom.

use crate::types::BlockType;

/// A single cell's content.
///
/// Exists so that a cell can be empty (`None`) distinctly from any color, and
/// so a piece can recolor its blocks in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: BlockType,
}

impl Block {
    pub fn new(kind: BlockType) -> Self {
        Self { kind }
    }
}

/// Content of one grid cell.
pub type Cell = Option<Block>;

/// The game field with an index-shifted vanishing zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    visible_height: usize,
    vanishing_height: usize,
    /// Flat array of cells, row-major order ((y + vanishing) * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create a new empty field
    pub fn new(width: usize, visible_height: usize, vanishing_height: usize) -> Self {
        Self {
            width,
            visible_height,
            vanishing_height,
            cells: vec![None; width * (visible_height + vanishing_height)],
        }
    }

    /// Calculate flat index from logical (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let row = y + self.vanishing_height as i32;
        if x < 0 || x >= self.width as i32 || row < 0 || row >= self.total_height() as i32 {
            return None;
        }
        Some((row as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    pub fn vanishing_height(&self) -> usize {
        self.vanishing_height
    }

    /// Visible plus vanishing rows.
    pub fn total_height(&self) -> usize {
        self.visible_height + self.vanishing_height
    }

    /// Topmost logical row with storage.
    pub fn top_row(&self) -> i32 {
        -(self.vanishing_height as i32)
    }

    /// Get the block at logical (x, y); empty when out of storage
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set the cell at logical (x, y)
    ///
    /// Writes outside storage are ignored. A block of type `None` is never
    /// stored; it clears the cell instead. Returns whether the write landed.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell.filter(|b| b.kind.is_color());
                true
            }
            None => false,
        }
    }

    /// Remove and return the block at logical (x, y)
    pub fn take(&mut self, x: i32, y: i32) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx].take())
    }

    /// Check if position is occupied (within storage and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Collision test used for piece movement
    ///
    /// Walls and the floor are always solid, the vanishing zone is always open,
    /// and visible cells are solid iff occupied.
    pub fn is_collision(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.visible_height as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Snapshot of every occupied cell as `(x, y, block)`
    ///
    /// Column-major, top to bottom within each column, vanishing zone included.
    pub fn all_blocks(&self) -> Vec<(i32, i32, Block)> {
        self.blocks().collect()
    }

    /// Same order as [`Field::all_blocks`], without allocating.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, Block)> + '_ {
        let rows = self.top_row()..self.visible_height as i32;
        (0..self.width as i32).flat_map(move |x| {
            rows.clone()
                .filter_map(move |y| self.get(x, y).map(|block| (x, y, block)))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a field from rows of color initials.
    ///
    /// Rows are given top to bottom for the *visible* area; `.` is empty and
    /// `R G B Y P O` map to the colors. Characters past `width` are dropped.
    pub fn from_rows(width: usize, vanishing_height: usize, rows: &[&str]) -> Self {
        let mut field = Self::new(width, rows.len(), vanishing_height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let kind = match ch {
                    'R' => BlockType::Red,
                    'G' => BlockType::Green,
                    'B' => BlockType::Blue,
                    'Y' => BlockType::Yellow,
                    'P' => BlockType::Purple,
                    'O' => BlockType::Orange,
                    _ => continue,
                };
                field.set(x as i32, y as i32, Some(Block::new(kind)));
            }
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_index_calculation() {
        let field = Field::new(8, 15, 3);
        assert_eq!(field.index(0, -3), Some(0));
        assert_eq!(field.index(7, -3), Some(7));
        assert_eq!(field.index(0, 0), Some(24));
        assert_eq!(field.index(7, 14), Some(17 * 8 + 7));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(8, 0), None);
        assert_eq!(field.index(0, -4), None);
        assert_eq!(field.index(0, 15), None);
    }

    #[test]
    fn test_vanishing_zone_storage() {
        let mut field = Field::new(4, 6, 2);

        assert!(field.set(1, -2, Some(Block::new(BlockType::Red))));
        assert_eq!(field.get(1, -2), Some(Block::new(BlockType::Red)));
        assert_eq!(field.cells[1], Some(Block::new(BlockType::Red)));

        // Stored, but never solid.
        assert!(!field.is_collision(1, -2));
        assert!(!field.set(1, -3, Some(Block::new(BlockType::Red))));
    }

    #[test]
    fn test_none_block_is_never_stored() {
        let mut field = Field::new(4, 6, 2);
        field.set(0, 0, Some(Block::new(BlockType::Blue)));
        field.set(0, 0, Some(Block::new(BlockType::None)));
        assert_eq!(field.get(0, 0), None);
    }

    #[test]
    fn test_take_empties_cell() {
        let mut field = Field::new(4, 6, 2);
        field.set(2, 3, Some(Block::new(BlockType::Green)));
        assert_eq!(field.take(2, 3), Some(Block::new(BlockType::Green)));
        assert_eq!(field.get(2, 3), None);
        assert_eq!(field.take(9, 9), None);
    }

    #[test]
    fn test_all_blocks_column_major() {
        let field = Field::from_rows(3, 2, &["R..", "..G", "B.G"]);
        let blocks: Vec<(i32, i32, BlockType)> = field
            .all_blocks()
            .into_iter()
            .map(|(x, y, b)| (x, y, b.kind))
            .collect();
        assert_eq!(
            blocks,
            vec![
                (0, 0, BlockType::Red),
                (0, 2, BlockType::Blue),
                (2, 1, BlockType::Green),
                (2, 2, BlockType::Green),
            ]
        );
        assert_eq!(field.occupied_count(), 4);
    }
}
