//! Dice rolls and dice sources.
//!
//! The engine never generates randomness itself; it asks a [`Dice`]
//! implementation for a validated [`DiceRoll`]. Games inject either
//! [`RandomDice`] (seeded ChaCha8) or [`ScriptedDice`] (fixed rolls,
//! for replays and tests).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::rng::{GameRng, GameRngState};

/// Lowest face on a die.
pub const MIN_FACE: u8 = 1;
/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// Errors produced while rolling or building rolls.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("at least one die must be rolled")]
    NoDice,

    #[error("face value {0} is outside 1..=6")]
    FaceOutOfRange(u8),

    #[error("a single die has nothing to compare against")]
    SingleDie,

    #[error("asked for {requested} dice but the scripted roll has {available}")]
    CountMismatch { requested: usize, available: usize },

    #[error("scripted dice have no rolls left")]
    Exhausted,
}

/// The faces showing after one throw, in throw order.
///
/// Immutable: the faces are copied in on construction and only exposed
/// as a slice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DiceRoll {
    faces: SmallVec<[u8; 4]>,
}

impl DiceRoll {
    /// Validate and copy a set of faces.
    pub fn new(faces: &[u8]) -> Result<Self, DiceError> {
        if faces.is_empty() {
            return Err(DiceError::NoDice);
        }
        if let Some(&bad) = faces.iter().find(|f| !(MIN_FACE..=MAX_FACE).contains(*f)) {
            return Err(DiceError::FaceOutOfRange(bad));
        }
        Ok(Self {
            faces: SmallVec::from_slice(faces),
        })
    }

    #[must_use]
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    /// Number of dice thrown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; a roll has at least one die.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sum of all faces.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.faces.iter().map(|&f| u32::from(f)).sum()
    }

    /// Check if every die shows the same face ("doubles").
    ///
    /// Only meaningful for two or more dice; a single die fails with
    /// `SingleDie`.
    pub fn all_equal(&self) -> Result<bool, DiceError> {
        match self.faces.split_first() {
            Some((first, rest)) if !rest.is_empty() => Ok(rest.iter().all(|f| f == first)),
            _ => Err(DiceError::SingleDie),
        }
    }
}

impl TryFrom<Vec<u8>> for DiceRoll {
    type Error = DiceError;

    fn try_from(faces: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&faces)
    }
}

impl From<DiceRoll> for Vec<u8> {
    fn from(roll: DiceRoll) -> Self {
        roll.faces.into_vec()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{face}")?;
        }
        if self.faces.len() > 1 {
            write!(f, " = {}", self.total())?;
        }
        Ok(())
    }
}

/// A source of dice rolls.
pub trait Dice {
    /// Throw `count` dice. Fails with `NoDice` when `count < 1`.
    fn roll(&mut self, count: usize) -> Result<DiceRoll, DiceError>;
}

/// Six-sided dice driven by a seeded [`GameRng`].
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: GameRng,
}

impl RandomDice {
    /// Create dice from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Resume dice from a saved RNG state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }

    /// Capture the RNG position so a saved game rolls the same dice.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self, count: usize) -> Result<DiceRoll, DiceError> {
        if count == 0 {
            return Err(DiceError::NoDice);
        }
        let faces: SmallVec<[u8; 4]> = (0..count).map(|_| self.rng.roll_die(MAX_FACE)).collect();
        DiceRoll::new(&faces)
    }
}

/// Dice that replay a fixed list of rolls, in order.
///
/// Used for replays, tutorials and deterministic tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<DiceRoll>,
}

impl ScriptedDice {
    /// Replay the given rolls.
    pub fn new(rolls: impl IntoIterator<Item = DiceRoll>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Replay one-die rolls with the given faces.
    pub fn single(faces: &[u8]) -> Result<Self, DiceError> {
        let rolls = faces
            .iter()
            .map(|&f| DiceRoll::new(&[f]))
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { rolls })
    }

    /// Replay multi-die rolls, one slice of faces per throw.
    pub fn from_faces(throws: &[&[u8]]) -> Result<Self, DiceError> {
        let rolls = throws
            .iter()
            .map(|faces| DiceRoll::new(faces))
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { rolls })
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, count: usize) -> Result<DiceRoll, DiceError> {
        if count == 0 {
            return Err(DiceError::NoDice);
        }
        let next = self.rolls.front().ok_or(DiceError::Exhausted)?;
        if next.len() != count {
            return Err(DiceError::CountMismatch {
                requested: count,
                available: next.len(),
            });
        }
        self.rolls.pop_front().ok_or(DiceError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_total() {
        let roll = DiceRoll::new(&[3, 4]).unwrap();
        assert_eq!(roll.total(), 7);
        assert_eq!(roll.len(), 2);
        assert_eq!(format!("{}", roll), "3 + 4 = 7");
    }

    #[test]
    fn test_roll_rejects_bad_faces() {
        assert_eq!(DiceRoll::new(&[]), Err(DiceError::NoDice));
        assert_eq!(DiceRoll::new(&[0]), Err(DiceError::FaceOutOfRange(0)));
        assert_eq!(DiceRoll::new(&[2, 7]), Err(DiceError::FaceOutOfRange(7)));
    }

    #[test]
    fn test_roll_copies_input() {
        let mut faces = vec![1, 2];
        let roll = DiceRoll::new(&faces).unwrap();
        faces[0] = 6;
        assert_eq!(roll.faces(), &[1, 2]);
    }

    #[test]
    fn test_all_equal() {
        assert_eq!(DiceRoll::new(&[5, 5]).unwrap().all_equal(), Ok(true));
        assert_eq!(DiceRoll::new(&[5, 5, 4]).unwrap().all_equal(), Ok(false));
        assert_eq!(DiceRoll::new(&[5]).unwrap().all_equal(), Err(DiceError::SingleDie));
    }

    #[test]
    fn test_roll_deserialize_validates() {
        let ok: DiceRoll = serde_json::from_str("[2,6]").unwrap();
        assert_eq!(ok.total(), 8);
        assert!(serde_json::from_str::<DiceRoll>("[2,9]").is_err());
        assert!(serde_json::from_str::<DiceRoll>("[]").is_err());
    }

    #[test]
    fn test_random_dice() {
        let mut dice = RandomDice::new(42);
        for count in 1..=4 {
            let roll = dice.roll(count).unwrap();
            assert_eq!(roll.len(), count);
            assert!(roll.faces().iter().all(|f| (1..=6).contains(f)));
        }
        assert_eq!(dice.roll(0), Err(DiceError::NoDice));
    }

    #[test]
    fn test_random_dice_resume() {
        let mut dice = RandomDice::new(9);
        dice.roll(2).unwrap();
        let saved = dice.state();

        let expected = dice.roll(2).unwrap();
        let mut resumed = RandomDice::from_state(&saved);
        assert_eq!(resumed.roll(2).unwrap(), expected);
    }

    #[test]
    fn test_scripted_dice() {
        let mut dice = ScriptedDice::single(&[1, 6]).unwrap();
        assert_eq!(dice.remaining(), 2);
        assert_eq!(dice.roll(1).unwrap().total(), 1);
        assert_eq!(dice.roll(1).unwrap().total(), 6);
        assert_eq!(dice.roll(1), Err(DiceError::Exhausted));
    }

    #[test]
    fn test_scripted_dice_count_mismatch() {
        let mut dice = ScriptedDice::from_faces(&[&[3, 3]]).unwrap();
        assert_eq!(
            dice.roll(1),
            Err(DiceError::CountMismatch { requested: 1, available: 2 })
        );
        // The roll is still there for a correct request
        assert_eq!(dice.roll(2).unwrap().faces(), &[3, 3]);
    }
}
