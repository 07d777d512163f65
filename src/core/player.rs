//! Player colours and per-player data storage.
//!
//! ## PlayerColor
//!
//! The four canonical seats. Their order is fixed and drives turn rotation.
//!
//! ## PlayerMap
//!
//! Per-colour data storage backed by `Vec` for O(1) access, with one entry for
//! each of the four canonical colours whether or not the colour is seated.
//!
//! ## Controller
//!
//! Whether a seat is driven externally (a human at a UI) or by an AI selector.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the four canonical player colours.
///
/// The declaration order (Red, Green, Yellow, Blue) is the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl PlayerColor {
    /// All four colours in canonical order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Blue,
    ];

    /// Number of canonical seats.
    pub const COUNT: usize = 4;

    /// Get the canonical index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the colour at a canonical index.
    ///
    /// ```
    /// use ludo_engine::core::PlayerColor;
    ///
    /// assert_eq!(PlayerColor::from_index(2), Some(PlayerColor::Yellow));
    /// assert_eq!(PlayerColor::from_index(4), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerColor::Red),
            1 => Some(PlayerColor::Green),
            2 => Some(PlayerColor::Yellow),
            3 => Some(PlayerColor::Blue),
            _ => None,
        }
    }

    /// Upper-case name, as used in token identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "RED",
            PlayerColor::Green => "GREEN",
            PlayerColor::Yellow => "YELLOW",
            PlayerColor::Blue => "BLUE",
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Moves arrive from outside the engine (UI input).
    Human,
    /// Moves are chosen by a `MoveSelector`.
    Ai,
}

/// Per-colour data storage with O(1) access.
///
/// Always holds exactly one entry per canonical colour.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{PlayerColor, PlayerMap};
///
/// let mut captures: PlayerMap<u32> = PlayerMap::with_value(0);
/// captures[PlayerColor::Green] += 2;
///
/// assert_eq!(captures[PlayerColor::Green], 2);
/// assert_eq!(captures[PlayerColor::Red], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerColor) -> T) -> Self {
        Self {
            data: PlayerColor::ALL.iter().map(|&c| factory(c)).collect(),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a colour's data.
    #[must_use]
    pub fn get(&self, color: PlayerColor) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a colour's data.
    pub fn get_mut(&mut self, color: PlayerColor) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (PlayerColor, &T) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerColor, &T)> {
        PlayerColor::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<PlayerColor> for PlayerMap<T> {
    type Output = T;

    fn index(&self, color: PlayerColor) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<PlayerColor> for PlayerMap<T> {
    fn index_mut(&mut self, color: PlayerColor) -> &mut Self::Output {
        self.get_mut(color)
    }
}
