//! SharedGame: one game driven from an input thread and a frame thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tui_match3::core::{GameSnapshot, GameState, SharedGame};
use tui_match3::types::{GameAction, GamePhase};

#[test]
fn test_input_and_frame_threads_share_one_game() {
    let game = SharedGame::new(GameState::with_seed(99));
    let done = Arc::new(AtomicBool::new(false));

    let input = {
        let game = game.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let actions = [
                GameAction::MoveLeft,
                GameAction::Rotate,
                GameAction::MoveRight,
                GameAction::HardDrop,
            ];
            let mut i = 0;
            while !done.load(Ordering::Relaxed) {
                game.apply_action(actions[i % actions.len()]);
                i += 1;
                thread::yield_now();
            }
        })
    };

    let mut snap = GameSnapshot::default();
    for _ in 0..2_000 {
        game.update(16.0);
        game.snapshot_into(&mut snap);
        assert_eq!(snap.field_width, 8);
        if let Some(active) = snap.active {
            assert!((0..8).contains(&active.x));
        }
        if snap.phase == GamePhase::GameOver {
            break;
        }
    }

    done.store(true, Ordering::Relaxed);
    input.join().unwrap();

    // Time passed on the frame thread is visible through every handle.
    assert!(game.with(|state| state.elapsed_ms()) > 0.0);
}

#[test]
fn test_restart_through_clone() {
    let game = SharedGame::new(GameState::with_seed(3));
    let other = game.clone();

    game.update(200.0);
    assert_eq!(other.phase(), GamePhase::MinoFalling);

    other.restart();
    assert_eq!(game.phase(), GamePhase::Spawning);
    assert!(game.snapshot().active.is_none());
}
