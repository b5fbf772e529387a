//! Board coordinate transform
//!
//! Pure mapping between the three ways a square is addressed:
//!
//! - **Algebraic** - `"e4"`, the identifier used by the rules engine and the UI
//! - **Board coordinate** - `(file, rank)` with both in `0..8`
//! - **3D position** - a point on the board plane, board centered at the origin
//!
//! # Coordinate System
//!
//! ```text
//!   z
//!   ^   a8 ........ h8      x = file - 3.5
//!   |   .            .      y = 0 (board plane)
//!   |   a1 ........ h1      z = rank - 3.5
//!   +-------------------> x
//! ```
//!
//! One square is one world unit, so a1 sits at `(-3.5, 0, -3.5)` and h8 at
//! `(3.5, 0, 3.5)`. The inverse mapping rounds to the nearest cell and rejects
//! anything that falls off the board instead of clamping.
//!
//! Nothing in here holds state.

use crate::core::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of files and ranks on the board
pub const BOARD_SIZE: u8 = 8;

/// Edge length of one square in world units
pub const SQUARE_SIZE: f32 = 1.0;

/// Offset between a coordinate index and the board-centered world axis
const CENTER_OFFSET: f32 = 3.5;

/// Board file (column), 0 = 'a' through 7 = 'h'
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from an index, `None` outside 0-7
    pub fn new(index: u8) -> Option<Self> {
        (index < BOARD_SIZE).then_some(File(index))
    }

    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board rank (row), 0 = rank 1 through 7 = rank 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from an index, `None` outside 0-7
    pub fn new(index: u8) -> Option<Self> {
        (index < BOARD_SIZE).then_some(Rank(index))
    }

    /// Create a rank from a character ('1'..='8')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank(c as u8 - b'1')),
            _ => None,
        }
    }

    /// Convert rank to character ('1'..='8')
    pub fn to_char(self) -> char {
        (b'1' + self.0) as char
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// One of the 64 board cells, identified algebraically
///
/// Always valid once constructed: parsing is the only fallible entry point.
/// Serializes as its algebraic string (`"e4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Combine a file and a rank
    pub fn from_parts(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }

    /// Create a square from file and rank indices, `None` if either is off the board
    pub fn from_indices(file: u8, rank: u8) -> Option<Self> {
        Some(Self {
            file: File::new(file)?,
            rank: Rank::new(rank)?,
        })
    }

    pub fn file(self) -> File {
        self.file
    }

    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Rank-major index: a1 = 0, h1 = 7, a8 = 56, h8 = 63
    pub fn index(self) -> u8 {
        self.rank.0 * BOARD_SIZE + self.file.0
    }

    /// Discrete board coordinate of this square
    pub fn coordinate(self) -> BoardCoordinate {
        BoardCoordinate {
            file: self.file.0,
            rank: self.rank.0,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_char())
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => File::from_char(f).zip(Rank::from_char(r)),
            _ => None,
        };
        parsed
            .map(|(file, rank)| Square { file, rank })
            .ok_or_else(|| GameError::InvalidSquare(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    /// Orders squares the way [`all_squares`] enumerates them
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

/// Discrete `(file, rank)` pair, both in 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub file: u8,
    pub rank: u8,
}

/// Continuous point in board space
///
/// Square-level logic only ever looks at `x` and `z`; `y` is height above the
/// board plane and is 0 for every position produced here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position3D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Project onto the board plane (drop the height component)
    pub fn on_board_plane(self) -> Self {
        Self { y: 0.0, ..self }
    }
}

/// Light/dark classification of a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareShade {
    Light,
    Dark,
}

/// Parse an algebraic identifier into its board coordinate
///
/// Fails with [`GameError::InvalidSquare`] unless the input is a file `a-h`
/// followed by a rank `1-8`.
pub fn square_to_coordinate(square: &str) -> GameResult<BoardCoordinate> {
    square.parse::<Square>().map(Square::coordinate)
}

/// Build the square at `(file, rank)`
///
/// Both indices must be in 0-7. Out-of-range input is a caller bug: it asserts in
/// debug builds and wraps onto the board in release builds.
pub fn coordinate_to_square(file: u8, rank: u8) -> Square {
    debug_assert!(
        file < BOARD_SIZE && rank < BOARD_SIZE,
        "coordinate ({file}, {rank}) is off the board"
    );
    Square {
        file: File(file % BOARD_SIZE),
        rank: Rank(rank % BOARD_SIZE),
    }
}

/// Center of `square` on the board plane
pub fn square_to_position(square: Square) -> Position3D {
    Position3D {
        x: (square.file.0 as f32 - CENTER_OFFSET) * SQUARE_SIZE,
        y: 0.0,
        z: (square.rank.0 as f32 - CENTER_OFFSET) * SQUARE_SIZE,
    }
}

/// Square under a board-space position, `None` when it is off the board
///
/// Rounds `x` and `z` to the nearest cell; `y` is ignored. A point exactly on a
/// cell boundary goes to the higher file/rank. Non-finite input yields `None`.
pub fn position_to_square(position: Position3D) -> Option<Square> {
    let file = (position.x / SQUARE_SIZE + CENTER_OFFSET + 0.5).floor();
    let rank = (position.z / SQUARE_SIZE + CENTER_OFFSET + 0.5).floor();
    let range = 0.0..=f32::from(BOARD_SIZE - 1);

    if range.contains(&file) && range.contains(&rank) {
        Square::from_indices(file as u8, rank as u8)
    } else {
        None
    }
}

/// True iff `(file + rank)` is even, so a1 and h8 are light
pub fn is_light_square(square: Square) -> bool {
    (square.file.0 + square.rank.0) % 2 == 0
}

pub fn is_dark_square(square: Square) -> bool {
    !is_light_square(square)
}

pub fn square_shade(square: Square) -> SquareShade {
    if is_light_square(square) {
        SquareShade::Light
    } else {
        SquareShade::Dark
    }
}

/// Validate an untrusted identifier
pub fn is_valid_square(raw: &str) -> bool {
    raw.parse::<Square>().is_ok()
}

/// All 64 squares in rank-major, file-minor order: a1, b1, ..., h1, a2, ..., h8
pub fn all_squares() -> Vec<Square> {
    (0..BOARD_SIZE)
        .flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file: File(file), rank: Rank(rank) }))
        .collect()
}
