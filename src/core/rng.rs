//! Dice sources: a deterministic forkable RNG and a scripted sequence.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Forkable**: Independent but reproducible streams for parallel games
//! - **Checkpointable**: O(1) state capture and restore
//! - **Scriptable**: `ScriptedDice` replays fixed rolls for tests and replays
//!
//! ```
//! use ludo_engine::core::{DiceSource, GameRng};
//!
//! let mut rng1 = GameRng::new(7);
//! let mut rng2 = GameRng::new(7);
//! assert_eq!(rng1.roll_pair(), rng2.roll_pair());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Anything that can produce a roll of two dice.
pub trait DiceSource {
    /// Roll two independent dice, each in `1..=6`.
    fn roll_pair(&mut self) -> [u8; 2];
}

/// Seeded dice and tie-breaking randomness for automated play.
///
/// ChaCha8 keeps rolls identical across platforms, and the stream position
/// can be saved and resumed mid-game.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    /// Seed a new dice stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Split off an independent stream, e.g. dice for one game and move
    /// choices for another. Repeated forks of equal parents agree.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed ^ self.forks.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Roll a single die.
    pub fn roll_die(&mut self) -> u8 {
        self.stream.gen_range(1..=DIE_FACES)
    }

    /// Uniform index below `len`. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        self.stream.gen_range(0..len)
    }

    /// Save the stream position.
    #[must_use]
    pub fn checkpoint(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Continue a stream from a saved position.
    #[must_use]
    pub fn resume(saved: &GameRngState) -> Self {
        let mut rng = Self::new(saved.seed);
        rng.stream.set_word_pos(saved.word_pos);
        rng.forks = saved.forks;
        rng
    }
}

impl DiceSource for GameRng {
    fn roll_pair(&mut self) -> [u8; 2] {
        [self.roll_die(), self.roll_die()]
    }
}

/// Saved position of a `GameRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha word position.
    pub word_pos: u128,
    pub forks: u64,
}

/// Replays a fixed sequence of rolls, then falls back to a seeded RNG.
///
/// ```
/// use ludo_engine::core::{DiceSource, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([[6, 3], [4, 4]]);
/// assert_eq!(dice.roll_pair(), [6, 3]);
/// assert_eq!(dice.roll_pair(), [4, 4]);
/// assert_eq!(dice.remaining(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<[u8; 2]>,
    fallback: GameRng,
}

impl ScriptedDice {
    /// Create a scripted source; once the script runs out, rolls come from
    /// `GameRng::new(0)`.
    pub fn new(rolls: impl IntoIterator<Item = [u8; 2]>) -> Self {
        Self::with_fallback(rolls, GameRng::new(0))
    }

    /// Create a scripted source with an explicit fallback RNG.
    pub fn with_fallback(rolls: impl IntoIterator<Item = [u8; 2]>, fallback: GameRng) -> Self {
        Self {
            script: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// Number of scripted rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_pair(&mut self) -> [u8; 2] {
        match self.script.pop_front() {
            Some(roll) => roll,
            None => self.fallback.roll_pair(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls(rng: &mut GameRng, n: usize) -> Vec<[u8; 2]> {
        (0..n).map(|_| rng.roll_pair()).collect()
    }

    #[test]
    fn test_same_seed_same_rolls() {
        assert_eq!(rolls(&mut GameRng::new(42), 100), rolls(&mut GameRng::new(42), 100));
        assert_ne!(rolls(&mut GameRng::new(1), 20), rolls(&mut GameRng::new(2), 20));
    }

    #[test]
    fn test_every_face_appears() {
        let mut rng = GameRng::new(9);
        let mut seen = [false; 6];

        for _ in 0..1000 {
            let face = rng.roll_die();
            assert!((1..=DIE_FACES).contains(&face));
            seen[usize::from(face - 1)] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_forks() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        let mut fork_a = a.fork();
        let mut fork_b = b.fork();

        assert_eq!(rolls(&mut fork_a, 10), rolls(&mut fork_b, 10));
        assert_ne!(rolls(&mut a, 20), rolls(&mut fork_a, 20));
        assert_ne!(rolls(&mut b.fork(), 20), rolls(&mut b.fork(), 20));
    }

    #[test]
    fn test_pick_in_range() {
        let mut rng = GameRng::new(5);
        assert!((0..200).all(|_| rng.pick(3) < 3));
        assert_eq!(rng.pick(1), 0);
    }

    #[test]
    fn test_resume_mid_game() {
        let mut rng = GameRng::new(42);
        rolls(&mut rng, 50);

        let saved = rng.checkpoint();
        let expected = rolls(&mut rng, 10);

        let json = serde_json::to_string(&saved).unwrap();
        let saved: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(rolls(&mut GameRng::resume(&saved), 10), expected);
    }

    #[test]
    fn test_scripted_dice_then_fallback() {
        let mut dice = ScriptedDice::with_fallback([[2, 5]], GameRng::new(3));
        assert_eq!(dice.roll_pair(), [2, 5]);
        assert_eq!(dice.remaining(), 0);

        let mut reference = GameRng::new(3);
        assert_eq!(dice.roll_pair(), reference.roll_pair());
    }
}
