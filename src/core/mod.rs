//! Core engine types: players, tokens, moves, state, dice, configuration.
//!
//! This module holds the data the rule modules operate on. It contains no
//! rule logic beyond keeping each value internally consistent.

pub mod player;
pub mod token;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Controller, PlayerColor, PlayerMap};
pub use token::{Token, TokenId, TokenStatus, BASE_SENTINEL};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice, DIE_FACES};
pub use config::{GameConfig, RuleConfig};
pub use action::{Move, TurnEvent, TurnRecord};
pub use state::{GameState, PendingDice, Phase, Seats};
