//! Token identity and lifecycle.
//!
//! Every player owns `tokens_per_player` tokens. A token's position is a
//! triple of `status`, `local_position` and `total_progress` whose meaning
//! depends on the status:
//!
//! | status  | `local_position`               | `total_progress`                 |
//! |---------|--------------------------------|----------------------------------|
//! | `Base`  | base slot `0..tokens_per_player` | `BASE_SENTINEL` (-1)           |
//! | `Track` | steps from own start square    | equal to `local_position`        |
//! | `Home`  | slot in the home column        | `track_length + local_position`  |
//!
//! Tokens only move `Base -> Track -> Home`. Captures send a `Track` token
//! back to `Base`; `Home` tokens can never be captured.

use serde::{Deserialize, Serialize};

use super::player::PlayerColor;

/// `total_progress` value of a token sitting in its base.
pub const BASE_SENTINEL: i16 = -1;

/// Stable token identifier: owner plus index within the owner's tokens.
///
/// ```
/// use ludo_engine::core::{PlayerColor, TokenId};
///
/// let id = TokenId::new(PlayerColor::Yellow, 2);
/// assert_eq!(id.owner, PlayerColor::Yellow);
/// assert_eq!(id.to_string(), "YELLOW-2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId {
    /// The player this token belongs to.
    pub owner: PlayerColor,
    /// Index within the owner's tokens.
    pub index: u8,
}

impl TokenId {
    /// Create a token identifier.
    #[must_use]
    pub const fn new(owner: PlayerColor, index: u8) -> Self {
        Self { owner, index }
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.owner, self.index)
    }
}

/// Where a token currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    /// Waiting in the owner's base.
    Base,
    /// On the shared track.
    Track,
    /// In the owner's private home column.
    Home,
}

/// A single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Stable identifier.
    pub id: TokenId,
    /// Lifecycle location.
    pub status: TokenStatus,
    /// Base slot, track steps, or home slot depending on `status`.
    pub local_position: u8,
    /// Total steps advanced from the owner's start, or `BASE_SENTINEL`.
    pub total_progress: i16,
}

impl Token {
    /// Create a token sitting in base slot `slot`.
    #[must_use]
    pub const fn in_base(id: TokenId, slot: u8) -> Self {
        Self {
            id,
            status: TokenStatus::Base,
            local_position: slot,
            total_progress: BASE_SENTINEL,
        }
    }

    /// The player this token belongs to.
    #[must_use]
    pub const fn owner(&self) -> PlayerColor {
        self.id.owner
    }

    /// Check if the token sits on the final home slot and can no longer move.
    #[must_use]
    pub fn is_finished(&self, home_column_length: u8) -> bool {
        self.status == TokenStatus::Home && self.local_position + 1 >= home_column_length
    }

    /// Send this token back to base slot `slot`.
    pub fn send_to_base(&mut self, slot: u8) {
        self.status = TokenStatus::Base;
        self.local_position = slot;
        self.total_progress = BASE_SENTINEL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::new(PlayerColor::Red, 0).to_string(), "RED-0");
        assert_eq!(TokenId::new(PlayerColor::Blue, 3).to_string(), "BLUE-3");
    }

    #[test]
    fn test_token_id_ordering_groups_by_owner() {
        let red_3 = TokenId::new(PlayerColor::Red, 3);
        let green_0 = TokenId::new(PlayerColor::Green, 0);
        assert!(red_3 < green_0);
    }

    #[test]
    fn test_in_base() {
        let token = Token::in_base(TokenId::new(PlayerColor::Green, 1), 1);

        assert_eq!(token.status, TokenStatus::Base);
        assert_eq!(token.local_position, 1);
        assert_eq!(token.total_progress, BASE_SENTINEL);
        assert_eq!(token.owner(), PlayerColor::Green);
    }

    #[test]
    fn test_is_finished() {
        let mut token = Token::in_base(TokenId::new(PlayerColor::Red, 0), 0);
        assert!(!token.is_finished(6));

        token.status = TokenStatus::Home;
        token.local_position = 4;
        token.total_progress = 56;
        assert!(!token.is_finished(6));

        token.local_position = 5;
        token.total_progress = 57;
        assert!(token.is_finished(6));
    }

    #[test]
    fn test_send_to_base() {
        let mut token = Token {
            id: TokenId::new(PlayerColor::Yellow, 2),
            status: TokenStatus::Track,
            local_position: 17,
            total_progress: 17,
        };

        token.send_to_base(0);

        assert_eq!(token, Token::in_base(TokenId::new(PlayerColor::Yellow, 2), 0));
    }

    #[test]
    fn test_serialization() {
        let token = Token::in_base(TokenId::new(PlayerColor::Blue, 3), 3);
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, deserialized);
    }
}
