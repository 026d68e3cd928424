//! Match detection and post-clear gravity over realistic boards

use tui_match3::core::{detach_falling_blocks, find_matches, Block, Field};
use tui_match3::types::{BlockType, MIN_MATCH_LEN};

#[test]
fn test_no_matches_on_checkerboard() {
    let field = Field::from_rows(4, 2, &["RGRG", "GRGR", "BYBY", "YBYB"]);
    assert!(find_matches(&field, MIN_MATCH_LEN).is_empty());
}

#[test]
fn test_min_len_threshold() {
    let field = Field::from_rows(6, 2, &["......", "RRRR.."]);
    assert!(find_matches(&field, 5).is_empty());
    assert_eq!(find_matches(&field, 4).len(), 4);
    assert_eq!(find_matches(&field, 2).len(), 4);
}

#[test]
fn test_hidden_rows_do_not_match() {
    let mut field = Field::new(3, 3, 2);
    let red = Some(Block::new(BlockType::Red));
    field.set(0, -2, red);
    field.set(0, -1, red);
    field.set(0, 0, red);
    assert!(find_matches(&field, 3).is_empty());

    field.set(0, 1, red);
    field.set(0, 2, red);
    assert_eq!(find_matches(&field, 3), vec![(0, 0), (0, 1), (0, 2)]);
}

#[test]
fn test_clear_compact_and_chain() {
    let mut field = Field::from_rows(3, 2, &["G..", "RRR", "BG.", "YBG"]);

    let matches = find_matches(&field, 3);
    assert_eq!(matches, vec![(0, 1), (1, 1), (2, 1)]);
    for &(x, y) in &matches {
        field.take(x, y);
    }

    let mut falling = detach_falling_blocks(&mut field, 500.0);
    assert_eq!(falling.len(), 1);
    let anim = &mut falling[0];
    assert_eq!((anim.x, anim.start_y, anim.end_y), (0, 0, 1));
    assert_eq!(anim.block.kind, BlockType::Green);
    assert!(!field.is_occupied(0, 0));

    assert!(!anim.advance(250.0));
    assert!(anim.advance(250.0));
    assert_eq!(anim.visual_y(), 1.0);
    field.set(anim.x, anim.end_y, Some(anim.block));

    // The landed green completes a diagonal.
    assert_eq!(find_matches(&field, 3), vec![(0, 1), (1, 2), (2, 3)]);
}
