//! A toy game played on six-letter words over the alphabet `{B, O, N}`.
//!
//! Each command pushes a letter onto the front of the word, dropping the
//! last one. The observation is the word together with its reward:
//! `-10.0` for a palindrome, which ends the game, `100.0` for `BONOBO`, and
//! `0.0` for anything else.
//! Each step reports the reward of the word it produced.

use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use skein_core::{System, TransparentSystem};
use thiserror::Error;
use tracing::debug;

/// Reward of a palindrome, which is also a terminal word.
pub const PALINDROME_REWARD: f64 = -10.0;

/// Reward of [`Word::BONOBO`].
pub const BONOBO_REWARD: f64 = 100.0;

/// A letter of the game's alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    B,
    O,
    N,
}

impl Letter {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Letter::B => 'B',
            Letter::O => 'O',
            Letter::N => 'N',
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = ParseWordError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'B' => Ok(Letter::B),
            'O' => Ok(Letter::O),
            'N' => Ok(Letter::N),
            other => Err(ParseWordError::InvalidLetter(other)),
        }
    }
}

impl Distribution<Letter> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Letter {
        match rng.random_range(0..3) {
            0 => Letter::B,
            1 => Letter::O,
            _ => Letter::N,
        }
    }
}

/// Errors that can occur when parsing a [`Word`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("a word has exactly 6 letters, got {0}")]
    WrongLength(usize),

    #[error("'{0}' is not one of B, O, N")]
    InvalidLetter(char),
}

/// A six-letter word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(pub [Letter; 6]);

impl Word {
    pub const BONOBO: Word = Word([
        Letter::B,
        Letter::O,
        Letter::N,
        Letter::O,
        Letter::B,
        Letter::O,
    ]);

    #[must_use]
    pub fn is_palindrome(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }

    /// The reward earned by landing on this word.
    #[must_use]
    pub fn reward(&self) -> f64 {
        if self.is_palindrome() {
            PALINDROME_REWARD
        } else if *self == Self::BONOBO {
            BONOBO_REWARD
        } else {
            0.0
        }
    }

    /// Pushes a letter onto the front, dropping the last letter.
    #[must_use]
    pub fn push_front(self, letter: Letter) -> Self {
        let mut letters = self.0;
        letters.rotate_right(1);
        letters[0] = letter;
        Word(letters)
    }
}

impl Default for Word {
    /// `BONBON`.
    fn default() -> Self {
        Word([
            Letter::B,
            Letter::O,
            Letter::N,
            Letter::B,
            Letter::O,
            Letter::N,
        ])
    }
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != 6 {
            return Err(ParseWordError::WrongLength(count));
        }

        let mut letters = [Letter::B; 6];
        for (slot, c) in letters.iter_mut().zip(s.chars()) {
            *slot = Letter::try_from(c)?;
        }

        Ok(Word(letters))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|l| write!(f, "{}", l.as_char()))
    }
}

impl Distribution<Word> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        Word(std::array::from_fn(|_| rng.random()))
    }
}

/// The word game simulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordGame {
    word: Word,
}

impl WordGame {
    #[must_use]
    pub fn new(word: Word) -> Self {
        Self { word }
    }
}

impl System for WordGame {
    type State = Word;
    type Observation = (Word, f64);
    type Command = Letter;
    type Report = f64;

    fn assign(&mut self, word: Word) {
        self.word = word;
    }

    fn observe(&self) -> (Word, f64) {
        (self.word, self.word.reward())
    }

    fn step(&mut self, letter: Letter) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }

        self.word = self.word.push_front(letter);
        if self.word.is_palindrome() {
            debug!(word = %self.word, "landed on a palindrome");
        }

        self.word.reward()
    }

    fn is_alive(&self) -> bool {
        !self.word.is_palindrome()
    }
}

impl TransparentSystem for WordGame {
    fn state(&self) -> Word {
        self.word
    }
}
