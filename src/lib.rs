//! Checkers-Rust: a two-player checkers (English draughts) rules engine.
//!
//! The engine keeps the board and whose turn it is, validates move
//! sequences (single steps and jump chains), removes captured pieces and
//! crowns pieces that reach the far row. Moves are atomic: a rejected
//! sequence changes nothing.
//!
//! ## Modules
//!
//! - [`constants`] - Default board dimensions and move geometry
//! - [`board`] - Coordinates, pieces and the square grid
//! - [`game`] - Rules engine (move validation and application)
//! - [`console`] - Text front end over stdin/stdout
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::{Coord, Player};
//! use checkers_rust::game::Game;
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_player(), Player::Black);
//!
//! // Black steps diagonally forward.
//! game.submit_move(&[Coord::new(3, 5), Coord::new(2, 4)]).unwrap();
//! assert_eq!(game.current_player(), Player::Red);
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
