//! Post-clear gravity
//!
//! After a clear, every column is compacted downward independently. Blocks that
//! need to move are lifted out of the field and returned as animators; blocks
//! already resting in place stay in the field untouched.

use crate::anim::AnimatingBlock;
use crate::field::Field;

/// Detach every block that must fall and return one animator per block.
///
/// Each column is scanned from the bottom visible row up through the vanishing
/// zone, tracking the lowest row not yet filled.
pub fn detach_falling_blocks(field: &mut Field, duration_ms: f64) -> Vec<AnimatingBlock> {
    let mut falling = Vec::new();
    let bottom = field.visible_height() as i32 - 1;

    for x in 0..field.width() as i32 {
        let mut target = bottom;
        for y in (field.top_row()..=bottom).rev() {
            let Some(block) = field.get(x, y) else {
                continue;
            };
            if y != target {
                field.take(x, y);
                falling.push(AnimatingBlock::new(block, x, y, target, duration_ms));
            }
            target -= 1;
        }
    }

    falling
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Block;
    use crate::types::BlockType;

    #[test]
    fn compacts_column_with_gaps() {
        let mut field = Field::new(1, 8, 2);
        field.set(0, 2, Some(Block::new(BlockType::Red)));
        field.set(0, 5, Some(Block::new(BlockType::Green)));
        field.set(0, 7, Some(Block::new(BlockType::Blue)));

        let falling = detach_falling_blocks(&mut field, 500.0);

        assert_eq!(falling.len(), 2);
        let moves: Vec<(i32, i32)> = falling.iter().map(|a| (a.start_y, a.end_y)).collect();
        assert_eq!(moves, vec![(5, 6), (2, 5)]);
        assert!(falling.iter().all(|a| a.end_y > a.start_y));

        // The resting block stays; the movers are out of the grid.
        assert_eq!(field.get(0, 7), Some(Block::new(BlockType::Blue)));
        assert_eq!(field.occupied_count(), 1);
    }

    #[test]
    fn settled_field_produces_nothing() {
        let mut field = Field::from_rows(2, 2, &["..", "R.", "GB"]);
        assert!(detach_falling_blocks(&mut field, 500.0).is_empty());
        assert_eq!(field.occupied_count(), 3);
    }

    #[test]
    fn vanishing_zone_blocks_fall_too() {
        let mut field = Field::new(1, 3, 2);
        field.set(0, -2, Some(Block::new(BlockType::Orange)));

        let falling = detach_falling_blocks(&mut field, 100.0);
        assert_eq!(falling.len(), 1);
        assert_eq!((falling[0].start_y, falling[0].end_y), (-2, 2));
        assert_eq!(falling[0].block.kind, BlockType::Orange);
    }
}
