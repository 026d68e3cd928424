//! TUI match-3 (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, the
//! integration tests and the benchmarks share a single import path:
//! `tui_match3::{core, input, term, types}`.

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
