//! Game engine logic and state management.
//!
//! This module orchestrates the core data structures into a playable game:
//!
//! - [`GameEngine`] - Grid, active piece, next piece, score and game-over state
//! - [`GameEvent`] - Notifications for audio/render adapters
//! - [`GameStats`] - Score and line-clear counters
//! - [`PieceBag`] - 7-bag piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`] (optionally with a seed)
//! 2. The input side calls `move_left`, `move_right`, `rotate`, `move_down`
//!    (a timer calls `move_down` periodically as gravity)
//! 3. A blocked `move_down` locks the piece, clears rows and spawns the next piece
//! 4. Repeat until the new piece collides at spawn
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameEngine, GameEvent};
//!
//! let mut engine = GameEngine::new();
//!
//! engine.move_left();
//! engine.rotate();
//! engine.hard_drop();
//!
//! for event in engine.drain_events() {
//!     match event {
//!         GameEvent::RotationAccepted => { /* play rotate cue */ }
//!         GameEvent::LinesCleared(_) => { /* play clear cue */ }
//!         GameEvent::GameOverEntered => println!("Game over!"),
//!     }
//! }
//! assert_eq!(engine.stats().completed_pieces(), 1);
//! ```

pub use self::{game_engine::*, game_event::*, game_stats::*, piece_bag::*};

mod game_engine;
mod game_event;
mod game_stats;
mod piece_bag;
