//! Small builders for values most tests need.

use storyweave_core::document::{Document, Node};
use storyweave_core::story::ThumbnailTemplate;
use storyweave_core::word_card::WordCard;

/// Builds a word card from four words.
#[must_use]
pub fn word_card(words: [&str; 4]) -> WordCard {
    WordCard::new(words.iter().map(|&w| w.to_owned()).collect()).unwrap()
}

/// A document holding `text` as a single paragraph.
#[must_use]
pub fn text_document(text: &str) -> Document {
    Document::new(vec![Node::paragraph(vec![Node::text(text)])])
}

/// A thumbnail template named `id`.
#[must_use]
pub fn thumbnail(id: &str) -> ThumbnailTemplate {
    ThumbnailTemplate {
        thumbnail_id: id.to_owned(),
        thumbnail_path: format!("https://images.example/{id}.png"),
    }
}
