//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - `RuleConfig`: Rule toggles (base exit, exact home entry, doubles, captures)
//! - `BoardTopology`: Track and home-column geometry
//! - `GameConfig`: Combines all configuration
//!
//! The defaults reproduce the standard house rules: a six is needed to leave
//! base, home must be reached by exact roll, doubles grant another roll, and
//! captures send tokens back to base.

use serde::{Deserialize, Serialize};

use crate::board::BoardTopology;

/// Rule toggles for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleConfig {
    /// A token may only leave base on a six.
    pub six_required_to_move_out: bool,

    /// Moves overshooting the final home slot are illegal.
    ///
    /// When false, an overshooting move stops on the final home slot.
    pub exact_roll_required: bool,

    /// Rolling doubles lets the same player roll again once the dice are spent.
    pub doubles_grant_extra_roll: bool,

    /// Landing on an opposing token outside a safe square sends it to base.
    pub capture_sends_to_base: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            six_required_to_move_out: true,
            exact_roll_required: true,
            doubles_grant_extra_roll: true,
            capture_sends_to_base: true,
        }
    }
}

impl RuleConfig {
    /// Standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let any die value bring a token out of base.
    #[must_use]
    pub fn any_roll_moves_out(mut self) -> Self {
        self.six_required_to_move_out = false;
        self
    }

    /// Clamp overshooting home moves to the final slot instead of rejecting them.
    #[must_use]
    pub fn relaxed_home_entry(mut self) -> Self {
        self.exact_roll_required = false;
        self
    }

    /// Hand the turn on after doubles like any other roll.
    #[must_use]
    pub fn without_doubles_bonus(mut self) -> Self {
        self.doubles_grant_extra_roll = false;
        self
    }

    /// Disable captures entirely.
    #[must_use]
    pub fn without_captures(mut self) -> Self {
        self.capture_sends_to_base = false;
        self
    }
}

/// Complete game configuration.
///
/// ```
/// use ludo_engine::core::{GameConfig, RuleConfig};
///
/// let config = GameConfig::new()
///     .with_rules(RuleConfig::new().relaxed_home_entry())
///     .with_color_selection();
///
/// assert_eq!(config.tokens_per_player, 4);
/// assert!(!config.rules.exact_roll_required);
/// assert!(config.require_color_selection);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Track geometry.
    pub board: BoardTopology,

    /// Rule toggles.
    pub rules: RuleConfig,

    /// Tokens each player starts with in base.
    pub tokens_per_player: u8,

    /// Without a human colour, start in colour selection instead of seating
    /// every player as AI.
    pub require_color_selection: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardTopology::standard(),
            rules: RuleConfig::default(),
            tokens_per_player: 4,
            require_color_selection: false,
        }
    }
}

impl GameConfig {
    /// Standard board and rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different board.
    #[must_use]
    pub fn with_board(mut self, board: BoardTopology) -> Self {
        self.board = board;
        self
    }

    /// Use different rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set the number of tokens per player.
    ///
    /// # Panics
    ///
    /// If `count` is zero.
    #[must_use]
    pub fn with_tokens_per_player(mut self, count: u8) -> Self {
        assert!(count > 0, "Each player needs at least one token");
        self.tokens_per_player = count;
        self
    }

    /// Start games without a human colour in colour selection.
    #[must_use]
    pub fn with_color_selection(mut self) -> Self {
        self.require_color_selection = true;
        self
    }
}
