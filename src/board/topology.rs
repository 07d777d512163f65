//! Track geometry: start squares, home-column entries and safe squares.
//!
//! Squares on the shared track are numbered `0..track_length` globally. Each
//! colour counts its own progress from its start square, so a token of colour
//! `c` with `n` track steps sits on global square
//! `(start_offset(c) + n) % track_length`.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerColor, PlayerMap};
use crate::error::BoardError;

/// Distance from each start square to the second safe square of that arm.
pub const SAFE_SQUARE_OFFSET: u8 = 8;

/// Immutable board description shared by every game using it.
///
/// ```
/// use ludo_engine::board::BoardTopology;
/// use ludo_engine::core::PlayerColor;
///
/// let board = BoardTopology::standard();
/// assert_eq!(board.start_offset(PlayerColor::Yellow), 26);
/// assert_eq!(board.home_entry(PlayerColor::Red), 51);
/// assert!(board.is_safe(8));
/// assert!(!board.is_safe(10));
/// ```
///
/// Serialized as its three dimensions; deserializing re-runs the same
/// validation as [`BoardTopology::try_new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout", into = "BoardLayout")]
pub struct BoardTopology {
    track_length: u8,
    home_column_length: u8,
    safe_offset: u8,
    start_offsets: PlayerMap<u8>,
    safe_squares: Vec<bool>,
}

impl BoardTopology {
    /// Standard board: 52-square track, 6-slot home columns.
    pub const STANDARD_TRACK_LENGTH: u8 = 52;
    /// Five coloured steps plus the final home spot.
    pub const STANDARD_HOME_COLUMN_LENGTH: u8 = 6;

    /// The standard Ludo board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_TRACK_LENGTH, Self::STANDARD_HOME_COLUMN_LENGTH)
    }

    /// Create a board with evenly spaced start squares.
    ///
    /// # Panics
    ///
    /// If the track cannot be split into four equal arms or the home column
    /// is empty. See [`BoardTopology::try_new`] for the fallible version.
    #[must_use]
    pub fn new(track_length: u8, home_column_length: u8) -> Self {
        match Self::try_new(track_length, home_column_length) {
            Ok(board) => board,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a board, rejecting dimensions the rules cannot play on.
    pub fn try_new(track_length: u8, home_column_length: u8) -> Result<Self, BoardError> {
        if track_length == 0 {
            return Err(BoardError::EmptyTrack);
        }
        if usize::from(track_length) % PlayerColor::COUNT != 0 {
            return Err(BoardError::UnevenArms(track_length));
        }
        if home_column_length == 0 {
            return Err(BoardError::EmptyHomeColumn);
        }

        let arm = track_length / PlayerColor::COUNT as u8;
        let mut board = Self {
            track_length,
            home_column_length,
            safe_offset: SAFE_SQUARE_OFFSET % track_length,
            start_offsets: PlayerMap::new(|c| c.index() as u8 * arm),
            safe_squares: Vec::new(),
        };
        board.rebuild_safe_squares();
        Ok(board)
    }

    /// Move the second safe square of each arm `offset` squares past the start.
    #[must_use]
    pub fn with_safe_offset(mut self, offset: u8) -> Self {
        self.safe_offset = offset % self.track_length;
        self.rebuild_safe_squares();
        self
    }

    fn rebuild_safe_squares(&mut self) {
        let len = self.track_length;
        let mut safe = vec![false; usize::from(len)];
        for (_, start) in self.start_offsets.iter() {
            let start = *start;
            safe[usize::from(start)] = true;
            let ahead = (u16::from(start) + u16::from(self.safe_offset)) % u16::from(len);
            safe[usize::from(ahead)] = true;
        }
        self.safe_squares = safe;
    }

    /// Number of squares on the shared track.
    #[must_use]
    pub fn track_length(&self) -> u8 {
        self.track_length
    }

    /// Number of slots in each home column, final slot included.
    #[must_use]
    pub fn home_column_length(&self) -> u8 {
        self.home_column_length
    }

    /// Index of the final home slot.
    #[must_use]
    pub fn final_home_slot(&self) -> u8 {
        self.home_column_length - 1
    }

    /// Global index of a colour's start square.
    #[must_use]
    pub fn start_offset(&self, color: PlayerColor) -> u8 {
        self.start_offsets[color]
    }

    /// Global index of the last track square before a colour's home column.
    #[must_use]
    pub fn home_entry(&self, color: PlayerColor) -> u8 {
        let len = u16::from(self.track_length);
        ((u16::from(self.start_offset(color)) + len - 1) % len) as u8
    }

    /// Global square reached after `steps` track steps from a colour's start.
    #[must_use]
    pub fn global_square(&self, color: PlayerColor, steps: u8) -> u8 {
        ((u16::from(self.start_offset(color)) + u16::from(steps)) % u16::from(self.track_length)) as u8
    }

    /// Check if captures are forbidden on a global square.
    #[must_use]
    pub fn is_safe(&self, square: u8) -> bool {
        self.safe_squares
            .get(usize::from(square))
            .copied()
            .unwrap_or(false)
    }

    /// All safe squares in ascending order.
    pub fn safe_squares(&self) -> impl Iterator<Item = u8> + '_ {
        self.safe_squares
            .iter()
            .enumerate()
            .filter(|(_, safe)| **safe)
            .map(|(i, _)| i as u8)
    }
}

/// Wire form of a board: everything else is derived from these.
#[derive(Serialize, Deserialize)]
struct BoardLayout {
    track_length: u8,
    home_column_length: u8,
    safe_offset: u8,
}

impl TryFrom<BoardLayout> for BoardTopology {
    type Error = BoardError;

    fn try_from(layout: BoardLayout) -> Result<Self, Self::Error> {
        Ok(Self::try_new(layout.track_length, layout.home_column_length)?
            .with_safe_offset(layout.safe_offset))
    }
}

impl From<BoardTopology> for BoardLayout {
    fn from(board: BoardTopology) -> Self {
        Self {
            track_length: board.track_length,
            home_column_length: board.home_column_length,
            safe_offset: board.safe_offset,
        }
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::standard()
    }
}
