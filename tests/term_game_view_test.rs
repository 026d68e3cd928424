use tui_match3::core::{Block, GameState};
use tui_match3::term::{block_color, AnchorY, GameView, Viewport};
use tui_match3::types::{BlockType, GamePhase};

fn screen_text(fb: &tui_match3::term::FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for cell in fb.row(y) {
            all.push(cell.ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_seed(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 8 cells * 2 columns + border = 18 wide, 15 rows + border = 17 tall.
    let fb = view.render(&snap, Viewport::new(18, 17));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 16).unwrap().ch, '└');
    assert_eq!(fb.get(17, 16).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut state = GameState::with_seed(1);
    state
        .field_mut()
        .set(0, 14, Some(Block::new(BlockType::Purple)));
    let snap = state.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(18, 17));

    let (x0, y0) = (1, 1 + 14);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, block_color(BlockType::Purple).unwrap());
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut state = GameState::with_seed(1);
    state.update(200.0);
    let snap = state.snapshot();
    let view = GameView::default();

    let fb = view.render(&snap, view.min_viewport(&snap));
    let all = screen_text(&fb);
    for label in ["NEXT", "GAUGE", "COMBO", "TIME", "00:00", "falling"] {
        assert!(all.contains(label), "missing {label}");
    }

    // Too narrow: the field still renders, the panel is skipped.
    let fb = view.render(&snap, Viewport::new(18, 17));
    assert!(!screen_text(&fb).contains("NEXT"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::with_seed(1).snapshot();
    snap.phase = GamePhase::GameOver;

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(40, 20));
    let all = screen_text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("R: RESTART"));
}
