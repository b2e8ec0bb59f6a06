//! Checkerboard storage.
//!
//! The board is a fixed-size NxN grid of [`SquareContent`]. It only knows
//! geometry: which squares are playable and whether a coordinate is inside
//! the grid. Turn order, ownership rules and move legality live in
//! [`game`](crate::game).

use std::fmt;

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Starts on the low rows and moves toward increasing rows.
    Red,
    /// Starts on the high rows and moves toward decreasing rows.
    Black,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "RED",
            Player::Black => "BLACK",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    /// Moves forward only.
    Regular,
    /// Moves forward and backward.
    King,
}

/// A (column, row) pair, zero-indexed.
///
/// Components are signed so that coordinates falling off the grid can be
/// represented and rejected instead of wrapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((col, row): (i32, i32)) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Stable identity of a piece for the lifetime of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    player: Player,
    rank: Rank,
}

impl Piece {
    /// Create a regular piece.
    pub fn new(id: PieceId, player: Player) -> Self {
        Self {
            id,
            player,
            rank: Rank::Regular,
        }
    }

    /// Create a piece that is already a king.
    pub fn king(id: PieceId, player: Player) -> Self {
        Self {
            id,
            player,
            rank: Rank::King,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Upgrade to king. Promotion is never reversed.
    pub fn make_king(&mut self) {
        self.rank = Rank::King;
    }

    /// Single-character rendering: lowercase for regular, uppercase for kings.
    pub fn symbol(&self) -> char {
        let c = match self.player {
            Player::Red => 'r',
            Player::Black => 'b',
        };
        if self.is_king() { c.to_ascii_uppercase() } else { c }
    }
}

/// What a square holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SquareContent {
    Empty,
    /// A square with (col + row) odd. Pieces never stand here.
    OutOfPlay,
    Occupied(Piece),
}

impl SquareContent {
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            SquareContent::Occupied(p) => Some(p),
            SquareContent::Empty | SquareContent::OutOfPlay => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SquareContent::Empty)
    }
}

static EMPTY_SQUARE: SquareContent = SquareContent::Empty;

/// A coordinate was outside the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub coord: Coord,
    pub size: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is outside the {}x{} play area",
            self.coord, self.size, self.size
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// Whether pieces may stand on `coord`, i.e. (col + row) is even.
///
/// Defined for every `Coord`, including ones far off the grid.
pub fn is_playable(coord: Coord) -> bool {
    (coord.col ^ coord.row) & 1 == 0
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<SquareContent>,
}

impl Board {
    /// An empty board: playable squares are `Empty`, the rest `OutOfPlay`.
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let coord = Coord::new(col as i32, row as i32);
                cells.push(if is_playable(coord) {
                    SquareContent::Empty
                } else {
                    SquareContent::OutOfPlay
                });
            }
        }
        Self { size, cells }
    }

    /// A board with `rows` rows of pieces on each side.
    ///
    /// Red fills rows `0..rows`, Black fills the last `rows` rows. Piece ids
    /// are assigned in row-major order starting at 0.
    pub fn with_starting_pieces(size: usize, rows: usize) -> Self {
        let mut board = Self::new(size);
        let mut next_id = 0u32;
        for row in 0..size {
            let player = if row < rows {
                Player::Red
            } else if row >= size.saturating_sub(rows) {
                Player::Black
            } else {
                continue;
            };
            for col in 0..size {
                let coord = Coord::new(col as i32, row as i32);
                if is_playable(coord) {
                    let idx = board.idx(col, row);
                    board.cells[idx] =
                        SquareContent::Occupied(Piece::new(PieceId(next_id), player));
                    next_id += 1;
                }
            }
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.size + col
    }

    fn checked_idx(&self, coord: Coord) -> Result<usize, OutOfBounds> {
        let n = self.size as i32;
        if coord.col < 0 || coord.row < 0 || coord.col >= n || coord.row >= n {
            return Err(OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(self.idx(coord.col as usize, coord.row as usize))
    }

    /// Strict read. Fails for coordinates outside the grid.
    pub fn get(&self, coord: Coord) -> Result<&SquareContent, OutOfBounds> {
        let i = self.checked_idx(coord)?;
        Ok(&self.cells[i])
    }

    /// Lenient read for rendering: anything outside the grid reads as `Empty`.
    pub fn square_or_empty(&self, coord: Coord) -> &SquareContent {
        self.get(coord).unwrap_or(&EMPTY_SQUARE)
    }

    pub fn set(&mut self, coord: Coord, content: SquareContent) -> Result<(), OutOfBounds> {
        let i = self.checked_idx(coord)?;
        self.cells[i] = content;
        Ok(())
    }

    /// Move the piece out of `coord`, leaving the square empty.
    ///
    /// Returns `None` if there was no piece; out-of-play squares stay as they are.
    pub fn take(&mut self, coord: Coord) -> Result<Option<Piece>, OutOfBounds> {
        let i = self.checked_idx(coord)?;
        match std::mem::replace(&mut self.cells[i], SquareContent::Empty) {
            SquareContent::Occupied(p) => Ok(Some(p)),
            other => {
                self.cells[i] = other;
                Ok(None)
            }
        }
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        let s = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.piece()
                .map(|p| (Coord::new((i % s) as i32, (i / s) as i32), p))
        })
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.player() == player).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every column is as wide as the largest label.
        let w = self.size.saturating_sub(1).to_string().len();
        write!(f, "{:w$}", "")?;
        for col in 0..self.size {
            write!(f, " {col:>w$}")?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{row:>w$}")?;
            for col in 0..self.size {
                let ch = match self.square_or_empty(Coord::new(col as i32, row as i32)) {
                    SquareContent::Occupied(p) => p.symbol(),
                    SquareContent::Empty => '.',
                    SquareContent::OutOfPlay => ' ',
                };
                write!(f, " {ch:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
