//! DAS/ARR input handler for terminal environments.
//!
//! Lateral keys repeat after a delay (DAS) at a fixed rate (ARR). The down key
//! does not repeat: pressing it starts the core's soft drop and releasing it
//! stops it.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Actions produced by one handler update.
pub type InputActions = ArrayVec<GameAction, 32>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left,
    Right,
    Down,
}

fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(HeldKey::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(HeldKey::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(HeldKey::Down),
        _ => None,
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// Terminals without release events would otherwise keep a tapped key held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn is_down_held(&self) -> bool {
        self.down_held
    }

    /// Feed a key press; returns the immediate action, if any.
    ///
    /// Repeated press events for a key already held (terminal auto-repeat)
    /// only refresh the release timeout.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let key = held_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            HeldKey::Left | HeldKey::Right => {
                let (direction, action) = if key == HeldKey::Left {
                    (HorizontalDirection::Left, GameAction::MoveLeft)
                } else {
                    (HorizontalDirection::Right, GameAction::MoveRight)
                };
                if self.horizontal == direction {
                    return None;
                }
                self.horizontal = direction;
                self.das_timer = 0;
                self.arr_accumulator = 0;
                Some(action)
            }
            HeldKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                Some(GameAction::SoftDropStart)
            }
        }
    }

    /// Feed a key release; releasing the down key stops the soft drop.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match held_key(code)? {
            HeldKey::Left if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
                None
            }
            HeldKey::Right if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
                None
            }
            HeldKey::Down if self.down_held => {
                self.down_held = false;
                Some(GameAction::SoftDropStop)
            }
            _ => None,
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance repeat timers by `elapsed_ms` and collect the repeats due.
    pub fn update(&mut self, elapsed_ms: u32) -> InputActions {
        let mut actions = InputActions::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.down_held = false;
                let _ = actions.try_push(GameAction::SoftDropStop);
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => GameAction::MoveLeft,
            HorizontalDirection::Right => GameAction::MoveRight,
            HorizontalDirection::None => return actions,
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer >= self.das_delay {
            let excess = if prev_das < self.das_delay {
                self.das_timer - self.das_delay
            } else {
                elapsed_ms
            };
            self.arr_accumulator += excess;

            while self.arr_accumulator >= self.arr_rate {
                let _ = actions.try_push(repeat);
                self.arr_accumulator -= self.arr_rate;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(150, 50).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(149).is_empty());

        // Exactly at DAS: still no repeats.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(50).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_terminal_auto_repeat_is_swallowed() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Char('h')), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_down_key_toggles_soft_drop() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDropStart));
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);
        assert!(ih.update(500).is_empty(), "down never repeats");

        assert_eq!(ih.handle_key_release(KeyCode::Down), Some(GameAction::SoftDropStop));
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
    }

    #[test]
    fn test_auto_release_stops_soft_drop() {
        let mut ih = InputHandler::new();
        ih.key_release_timeout_ms = 50;

        ih.handle_key_press(KeyCode::Char('s'));
        ih.handle_key_press(KeyCode::Left);
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        let actions = ih.update(0);
        assert_eq!(actions.as_slice(), &[GameAction::SoftDropStop]);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
        assert!(!ih.is_down_held());
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
