//! Constants for board geometry and game setup.
//!
//! Board dimensions are runtime parameters (see [`GameConfig`](crate::game::GameConfig));
//! the values here are the defaults for standard English draughts and the
//! limits that configuration is validated against.

use crate::board::Player;

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard checkers is played on 8x8.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that still leaves room for one row per side and a gap.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board. Coordinates are stored as `i32`.
pub const MAX_BOARD_SIZE: usize = 26;

// =============================================================================
// Setup
// =============================================================================

/// Default number of rows filled with pieces on each side.
pub const DEFAULT_STARTING_ROWS: usize = 3;

/// The player who makes the first move of a game.
pub const FIRST_PLAYER: Player = Player::Black;

// =============================================================================
// Move Geometry
// =============================================================================

/// Diagonal distance of a jump (over exactly one square).
pub const JUMP_DISTANCE: i32 = 2;
