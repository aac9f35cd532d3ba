//! Vocabulary word cards.

use serde::{Deserialize, Serialize};

use crate::error::WordCardError;

/// Number of words on every card offered during a session.
pub const WORDS_PER_CARD: usize = 4;

/// An ordered set of vocabulary words the author must use in one episode.
///
/// The cardinality is fixed at [`WORDS_PER_CARD`]; cards of any other size
/// are rejected at construction and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WordCard(Vec<String>);

impl WordCard {
    /// Creates a card from its words.
    ///
    /// # Errors
    ///
    /// Returns `WordCardError` if `words` does not hold exactly
    /// [`WORDS_PER_CARD`] entries.
    pub fn new(words: Vec<String>) -> Result<Self, WordCardError> {
        if words.len() != WORDS_PER_CARD {
            return Err(WordCardError {
                expected: WORDS_PER_CARD,
                actual: words.len(),
            });
        }
        Ok(Self(words))
    }

    /// Returns the words in card order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for WordCard {
    type Error = WordCardError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<WordCard> for Vec<String> {
    fn from(card: WordCard) -> Self {
        card.0
    }
}
