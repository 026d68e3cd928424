//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) into a plain framebuffer
//! and the renderer flushes only the changed cells through `crossterm`.
//!
//! Field cells are drawn 2 columns wide by default to keep blocks square on
//! typical terminal fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_color, AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
