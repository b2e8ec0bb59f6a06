//! Checkers rules engine.
//!
//! [`Game`] owns the board and the turn marker. The only way to change
//! either is [`Game::submit_move`], which takes a full move sequence
//! `[origin, dest1, dest2, ...]` and either applies every leg or none.
//!
//! Legs are applied to a scratch copy of the board; the copy replaces the
//! live board only after the last leg has been validated. A rejected
//! submission therefore leaves the board, the turn and the move counter
//! exactly as they were.

use std::fmt;

use log::{debug, info, trace};

use crate::board::{Board, Coord, OutOfBounds, PieceId, Player, SquareContent};
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_STARTING_ROWS, FIRST_PLAYER, JUMP_DISTANCE, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};

// =============================================================================
// Configuration
// =============================================================================

/// Board dimensions for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Board size (NxN).
    pub size: usize,
    /// Rows of pieces per side at the start.
    pub starting_rows: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            starting_rows: DEFAULT_STARTING_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    SizeOutOfRange(usize),
    NoStartingRows,
    /// The two armies would touch or overlap.
    TooManyStartingRows { size: usize, starting_rows: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SizeOutOfRange(size) => write!(
                f,
                "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE} (got {size})"
            ),
            ConfigError::NoStartingRows => write!(f, "each side needs at least one row of pieces"),
            ConfigError::TooManyStartingRows {
                size,
                starting_rows,
            } => write!(
                f,
                "{starting_rows} starting rows per side leave no empty row on a {size}x{size} board"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(ConfigError::SizeOutOfRange(self.size));
        }
        if self.starting_rows == 0 {
            return Err(ConfigError::NoStartingRows);
        }
        if 2 * self.starting_rows >= self.size {
            return Err(ConfigError::TooManyStartingRows {
                size: self.size,
                starting_rows: self.starting_rows,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// One `(from, to)` segment of a submitted move, with its position in the sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub index: usize,
    pub from: Coord,
    pub to: Coord,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leg {} {} -> {}", self.index + 1, self.from, self.to)
    }
}

/// Why a move sequence is structurally unusable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Malformed {
    /// Fewer than two coordinates were given.
    TooFewCoordinates(usize),
    /// A leg starts and ends on the same square.
    ZeroLengthLeg(Leg),
}

/// Reason a move submission was rejected.
///
/// Every variant is recoverable: the game is untouched and the caller may
/// submit a corrected sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    MalformedMove(Malformed),
    /// A coordinate lies outside the grid.
    OutOfBounds(OutOfBounds),
    /// Destination is an out-of-play square.
    InvalidDestination(Leg),
    /// Destination already holds a piece.
    DestinationOccupied(Leg),
    NoPieceAtOrigin(Coord),
    WrongPlayer {
        origin: Coord,
        owner: Player,
        current: Player,
    },
    /// A regular piece tried to move toward its own side.
    MustMoveForward(Leg),
    NotDiagonal(Leg),
    MoveTooFar(Leg),
    /// A jump chain was followed by a simple step.
    MustContinueJumping(Leg),
    /// A simple step was followed by another leg.
    CannotChainSimpleMoves(Leg),
    /// A leg follows the one that crowned the piece.
    PromotedMidChain(Leg),
    NoPieceToCapture { leg: Leg, over: Coord },
    CannotCaptureOwnPiece { leg: Leg, over: Coord },
}

impl From<OutOfBounds> for MoveError {
    fn from(e: OutOfBounds) -> Self {
        MoveError::OutOfBounds(e)
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::MalformedMove(Malformed::TooFewCoordinates(n)) => write!(
                f,
                "Please specify a new location! (got {n} coordinate{})",
                if *n == 1 { "" } else { "s" }
            ),
            MoveError::MalformedMove(Malformed::ZeroLengthLeg(leg)) => {
                write!(f, "{leg}: a move must leave its square")
            }
            MoveError::OutOfBounds(e) => write!(f, "Move is invalid: {e}"),
            MoveError::InvalidDestination(leg) => {
                write!(f, "{leg}: {} is not a playable square", leg.to)
            }
            MoveError::DestinationOccupied(leg) => {
                write!(f, "{leg}: you cannot move there, {} is occupied", leg.to)
            }
            MoveError::NoPieceAtOrigin(c) => write!(f, "No piece at {c}"),
            MoveError::WrongPlayer {
                origin,
                owner,
                current,
            } => write!(
                f,
                "Incorrect player: the piece at {origin} belongs to {owner}, it is {current}'s turn"
            ),
            MoveError::MustMoveForward(leg) => {
                write!(f, "{leg}: this piece can only move forward")
            }
            MoveError::NotDiagonal(leg) => write!(f, "{leg}: you can only move diagonally"),
            MoveError::MoveTooFar(leg) => write!(f, "{leg}: you can't move that far"),
            MoveError::MustContinueJumping(leg) => {
                write!(f, "{leg}: once you start jumping, you must keep jumping")
            }
            MoveError::CannotChainSimpleMoves(leg) => {
                write!(f, "{leg}: you can only move once, unless you're jumping")
            }
            MoveError::PromotedMidChain(leg) => {
                write!(f, "{leg}: you cannot move after being kinged")
            }
            MoveError::NoPieceToCapture { leg, over } => {
                write!(f, "{leg}: there is no piece to jump at {over}")
            }
            MoveError::CannotCaptureOwnPiece { leg, over } => {
                write!(f, "{leg}: you cannot jump your own piece at {over}")
            }
        }
    }
}

impl std::error::Error for MoveError {}

// =============================================================================
// Direction
// =============================================================================

/// Row index as seen from `player`'s side of the board.
///
/// Row 0 is the player's home row and `size - 1` is the row where its
/// pieces are crowned. Red moves toward increasing absolute rows, Black
/// toward decreasing ones.
pub fn relative_row(player: Player, row: i32, size: usize) -> i32 {
    match player {
        Player::Red => row,
        Player::Black => size as i32 - 1 - row,
    }
}

// =============================================================================
// Game
// =============================================================================

/// Summary of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub piece: PieceId,
    pub player: Player,
    /// Square the piece ended on.
    pub destination: Coord,
    /// Squares whose pieces were jumped, in order.
    pub captured: Vec<Coord>,
    pub promoted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Player,
    /// Number of accepted moves.
    n: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard 8x8 game with three rows per side. Black moves first.
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self::from_board(
            Board::with_starting_pieces(config.size, config.starting_rows),
            FIRST_PLAYER,
        )
    }

    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_board(
            Board::with_starting_pieces(config.size, config.starting_rows),
            FIRST_PLAYER,
        ))
    }

    /// Start from an arbitrary position.
    pub fn from_board(board: Board, current: Player) -> Self {
        Self {
            board,
            current,
            n: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn move_count(&self) -> usize {
        self.n
    }

    /// Square content for rendering. Coordinates off the grid read as empty.
    pub fn get_square(&self, coord: Coord) -> &SquareContent {
        self.board.square_or_empty(coord)
    }

    /// Bounds-checked square content.
    pub fn square(&self, coord: Coord) -> Result<&SquareContent, OutOfBounds> {
        self.board.get(coord)
    }

    /// The winner, if one side has no pieces left.
    pub fn winner(&self) -> Option<Player> {
        let red = self.board.count(Player::Red);
        let black = self.board.count(Player::Black);
        match (red, black) {
            (0, 0) => None,
            (0, _) => Some(Player::Black),
            (_, 0) => Some(Player::Red),
            _ => None,
        }
    }

    /// Validate and apply a move sequence `[origin, dest1, dest2, ...]`.
    ///
    /// A sequence is either a single diagonal step or a chain of jumps by the
    /// piece at `origin`. On success the turn passes to the opponent. On
    /// failure nothing changes.
    ///
    /// # Errors
    /// See [`MoveError`]; the first failing check in sequence order wins.
    pub fn submit_move(&mut self, sequence: &[Coord]) -> Result<MoveReport, MoveError> {
        match self.try_move(sequence) {
            Ok((board, report)) => {
                self.board = board;
                self.current = self.current.opponent();
                self.n += 1;
                debug!(
                    "move {}: {} {} accepted, {} captured",
                    self.n,
                    report.player,
                    format_sequence(sequence),
                    report.captured.len()
                );
                if let Some(w) = self.winner() {
                    info!("{w} has won after {} moves", self.n);
                }
                Ok(report)
            }
            Err(e) => {
                debug!("{} {} rejected: {e}", self.current, format_sequence(sequence));
                Err(e)
            }
        }
    }

    /// Run every leg against a copy of the board and return the copy.
    fn try_move(&self, sequence: &[Coord]) -> Result<(Board, MoveReport), MoveError> {
        if sequence.len() < 2 {
            return Err(MoveError::MalformedMove(Malformed::TooFewCoordinates(
                sequence.len(),
            )));
        }

        let origin = sequence[0];
        let piece = match self.board.get(origin)? {
            SquareContent::Occupied(p) => p,
            SquareContent::Empty | SquareContent::OutOfPlay => {
                return Err(MoveError::NoPieceAtOrigin(origin));
            }
        };
        if piece.player() != self.current {
            return Err(MoveError::WrongPlayer {
                origin,
                owner: piece.player(),
                current: self.current,
            });
        }

        let size = self.board.size();
        let player = piece.player();
        let mut board = self.board.clone();
        let mut report = MoveReport {
            piece: piece.id(),
            player,
            destination: origin,
            captured: Vec::new(),
            promoted: false,
        };

        let mut is_chain_jumping = false;
        let mut was_just_promoted = false;

        for (index, pair) in sequence.windows(2).enumerate() {
            let leg = Leg {
                index,
                from: pair[0],
                to: pair[1],
            };
            trace!("checking {leg}");

            if was_just_promoted {
                return Err(MoveError::PromotedMidChain(leg));
            }
            if leg.from == leg.to {
                return Err(MoveError::MalformedMove(Malformed::ZeroLengthLeg(leg)));
            }
            match board.get(leg.to)? {
                SquareContent::Empty => {}
                SquareContent::OutOfPlay => return Err(MoveError::InvalidDestination(leg)),
                SquareContent::Occupied(_) => return Err(MoveError::DestinationOccupied(leg)),
            }

            // The mover is always at `leg.from`: origin on leg 0, the previous
            // destination afterwards.
            let Some(mut mover) = board.take(leg.from)? else {
                return Err(MoveError::NoPieceAtOrigin(leg.from));
            };

            if !mover.is_king()
                && relative_row(player, leg.to.row, size) < relative_row(player, leg.from.row, size)
            {
                return Err(MoveError::MustMoveForward(leg));
            }

            let jumped = jumped_square(leg)?;
            if index == 0 {
                is_chain_jumping = jumped.is_some();
            } else if !is_chain_jumping {
                return Err(MoveError::CannotChainSimpleMoves(leg));
            } else if jumped.is_none() {
                return Err(MoveError::MustContinueJumping(leg));
            }

            if let Some(over) = jumped {
                match board.get(over)? {
                    SquareContent::Occupied(p) if p.player() != player => {}
                    SquareContent::Occupied(_) => {
                        return Err(MoveError::CannotCaptureOwnPiece { leg, over });
                    }
                    SquareContent::Empty | SquareContent::OutOfPlay => {
                        return Err(MoveError::NoPieceToCapture { leg, over });
                    }
                }
                board.take(over)?;
                report.captured.push(over);
            }

            if !mover.is_king() && relative_row(player, leg.to.row, size) == size as i32 - 1 {
                info!("Player {player} has been KINGED at {}!", leg.to);
                mover.make_king();
                was_just_promoted = true;
                report.promoted = true;
            }

            board.set(leg.to, SquareContent::Occupied(mover))?;
            report.destination = leg.to;
        }

        Ok((board, report))
    }
}

/// Classify a leg: `Ok(None)` for a simple step, `Ok(Some(mid))` for a jump
/// over `mid`.
fn jumped_square(leg: Leg) -> Result<Option<Coord>, MoveError> {
    let col_delta = (leg.to.col - leg.from.col).abs();
    let row_delta = (leg.to.row - leg.from.row).abs();

    if col_delta != row_delta {
        return Err(MoveError::NotDiagonal(leg));
    }
    if col_delta > JUMP_DISTANCE {
        return Err(MoveError::MoveTooFar(leg));
    }
    if col_delta == JUMP_DISTANCE {
        Ok(Some(Coord::new(
            (leg.from.col + leg.to.col) / 2,
            (leg.from.row + leg.to.row) / 2,
        )))
    } else {
        Ok(None)
    }
}

/// Render a sequence in console notation, e.g. `3.5-2.4`.
pub fn format_sequence(sequence: &[Coord]) -> String {
    sequence
        .iter()
        .map(|c| format!("{}.{}", c.col, c.row))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn c(col: i32, row: i32) -> Coord {
        Coord::new(col, row)
    }

    #[test]
    fn test_relative_row_is_mirrored() {
        assert_eq!(relative_row(Player::Red, 0, 8), 0);
        assert_eq!(relative_row(Player::Red, 7, 8), 7);
        assert_eq!(relative_row(Player::Black, 7, 8), 0);
        assert_eq!(relative_row(Player::Black, 0, 8), 7);
        assert_eq!(relative_row(Player::Black, 5, 8), 2);
    }

    #[test]
    fn test_jumped_square() {
        let step = Leg {
            index: 0,
            from: c(3, 5),
            to: c(2, 4),
        };
        assert_eq!(jumped_square(step), Ok(None));

        let jump = Leg {
            index: 0,
            from: c(3, 5),
            to: c(1, 3),
        };
        assert_eq!(jumped_square(jump), Ok(Some(c(2, 4))));

        let straight = Leg {
            index: 0,
            from: c(3, 5),
            to: c(3, 3),
        };
        assert_eq!(
            jumped_square(straight),
            Err(MoveError::NotDiagonal(straight))
        );

        let far = Leg {
            index: 0,
            from: c(0, 0),
            to: c(3, 3),
        };
        assert_eq!(jumped_square(far), Err(MoveError::MoveTooFar(far)));
    }

    #[test]
    fn test_config_validation() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(
            GameConfig {
                size: 10,
                starting_rows: 4,
            }
            .validate()
            .is_ok()
        );
        assert_eq!(
            GameConfig {
                size: 2,
                starting_rows: 1,
            }
            .validate(),
            Err(ConfigError::SizeOutOfRange(2))
        );
        assert_eq!(
            GameConfig {
                size: 8,
                starting_rows: 0,
            }
            .validate(),
            Err(ConfigError::NoStartingRows)
        );
        assert_eq!(
            GameConfig {
                size: 8,
                starting_rows: 4,
            }
            .validate(),
            Err(ConfigError::TooManyStartingRows {
                size: 8,
                starting_rows: 4,
            })
        );
        assert!(
            Game::with_config(GameConfig {
                size: 6,
                starting_rows: 3,
            })
            .is_err()
        );
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.size(), 8);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_simple_step_switches_turn() {
        let mut game = Game::new();
        let report = game.submit_move(&[c(3, 5), c(2, 4)]).unwrap();
        assert_eq!(report.destination, c(2, 4));
        assert!(report.captured.is_empty());
        assert!(!report.promoted);
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_zero_length_leg_is_malformed() {
        let mut game = Game::new();
        let err = game.submit_move(&[c(3, 5), c(3, 5)]).unwrap_err();
        assert!(matches!(
            err,
            MoveError::MalformedMove(Malformed::ZeroLengthLeg(_))
        ));
    }

    #[test]
    fn test_out_of_play_destination() {
        let mut game = Game::new();
        let err = game.submit_move(&[c(3, 5), c(3, 4)]).unwrap_err();
        assert!(matches!(err, MoveError::InvalidDestination(_)));
    }

    #[test]
    fn test_out_of_bounds_origin_and_destination() {
        let mut game = Game::new();
        let err = game.submit_move(&[c(-1, 5), c(0, 4)]).unwrap_err();
        assert!(matches!(err, MoveError::OutOfBounds(_)));

        let mut board = Board::new(8);
        board
            .set(c(0, 6), SquareContent::Occupied(Piece::new(PieceId(0), Player::Black)))
            .unwrap();
        let mut game = Game::from_board(board, Player::Black);
        let err = game.submit_move(&[c(0, 6), c(-1, 5)]).unwrap_err();
        assert_eq!(
            err,
            MoveError::OutOfBounds(OutOfBounds {
                coord: c(-1, 5),
                size: 8,
            })
        );
    }

    #[test]
    fn test_king_on_far_rank_keeps_jumping() {
        let mut board = Board::new(8);
        board
            .set(c(2, 2), SquareContent::Occupied(Piece::king(PieceId(0), Player::Black)))
            .unwrap();
        board
            .set(c(3, 1), SquareContent::Occupied(Piece::new(PieceId(1), Player::Red)))
            .unwrap();
        board
            .set(c(5, 1), SquareContent::Occupied(Piece::new(PieceId(2), Player::Red)))
            .unwrap();
        let mut game = Game::from_board(board, Player::Black);

        // (4,0) is Black's crowning row; a king passes through it.
        let report = game.submit_move(&[c(2, 2), c(4, 0), c(6, 2)]).unwrap();
        assert!(!report.promoted);
        assert_eq!(report.captured, vec![c(3, 1), c(5, 1)]);
        assert_eq!(report.destination, c(6, 2));
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn test_error_messages_name_the_leg() {
        let leg = Leg {
            index: 1,
            from: c(2, 2),
            to: c(4, 4),
        };
        assert_eq!(
            MoveError::MustContinueJumping(leg).to_string(),
            "leg 2 (2,2) -> (4,4): once you start jumping, you must keep jumping"
        );
        assert_eq!(
            MoveError::MalformedMove(Malformed::TooFewCoordinates(1)).to_string(),
            "Please specify a new location! (got 1 coordinate)"
        );
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&[c(3, 5), c(2, 4)]), "3.5-2.4");
        assert_eq!(format_sequence(&[]), "");
    }
}
