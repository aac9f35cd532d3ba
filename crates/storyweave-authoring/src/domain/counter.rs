//! Character counting for episode drafts.

use storyweave_core::document::{Document, Node};

/// Counts the characters a document renders to.
///
/// Text and locked words count their length in UTF-16 code units, so a
/// character outside the Basic Multilingual Plane counts two. Every hard
/// break counts one, and every paragraph after the first counts one for its implicit
/// separator. An absent document counts zero, as does the editor's initial
/// single empty paragraph.
#[must_use]
pub fn count<'a>(document: impl Into<Option<&'a Document>>) -> usize {
    let Some(document) = document.into() else {
        return 0;
    };

    let mut text_chars = 0;
    let mut hard_breaks = 0;
    let mut paragraphs: usize = 0;

    for node in document.walk() {
        match node {
            Node::Text { text } => text_chars += text.encode_utf16().count(),
            Node::AtomicWord { attrs } => text_chars += attrs.text.encode_utf16().count(),
            Node::HardBreak => hard_breaks += 1,
            Node::Paragraph { .. } => paragraphs += 1,
            Node::Doc { .. } => {}
        }
    }

    text_chars + hard_breaks + paragraphs.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyweave_core::document::DropId;

    #[test]
    fn test_absent_document_counts_zero() {
        assert_eq!(count(None::<&Document>), 0);
    }

    #[test]
    fn test_initial_empty_paragraph_counts_zero() {
        assert_eq!(count(&Document::empty()), 0);
    }

    #[test]
    fn test_document_without_paragraphs_counts_zero() {
        assert_eq!(count(&Document::new(Vec::new())), 0);
    }

    #[test]
    fn test_single_paragraph_counts_text_length() {
        let document = Document::new(vec![Node::paragraph(vec![Node::text("abc")])]);

        assert_eq!(count(&document), 3);
    }

    #[test]
    fn test_second_paragraph_adds_separator() {
        let document = Document::new(vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ]);

        assert_eq!(count(&document), 3);
    }

    #[test]
    fn test_hard_breaks_and_locked_words_are_counted() {
        let document = Document::new(vec![Node::paragraph(vec![
            Node::text("I saw a "),
            Node::locked_word("rabbit", Some(DropId::Text("w-1".to_owned()))),
            Node::HardBreak,
            Node::text("!"),
        ])]);

        // 8 + 6 + 1 + 1
        assert_eq!(count(&document), 16);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let document = Document::new(vec![Node::paragraph(vec![Node::text("ねこがすき")])]);

        assert_eq!(count(&document), 5);
    }

    #[test]
    fn test_supplementary_plane_characters_count_two() {
        // Arrange
        let document = Document::new(vec![Node::paragraph(vec![
            Node::text("😀".repeat(101)),
            Node::locked_word("𠮷", None),
        ])]);

        // Act
        let total = count(&document);

        // Assert
        assert_eq!(total, 204);
    }

    #[test]
    fn test_nested_paragraphs_are_traversed() {
        let document = Document::new(vec![Node::Doc {
            content: vec![Node::paragraph(vec![Node::paragraph(vec![Node::text(
                "xy",
            )])])],
        }]);

        // 2 text + (2 paragraphs - 1)
        assert_eq!(count(&document), 3);
    }

    #[test]
    fn test_empty_trailing_paragraphs_still_count_as_separators() {
        let document = Document::new(vec![
            Node::paragraph(vec![Node::text("hi")]),
            Node::paragraph(Vec::new()),
            Node::paragraph(Vec::new()),
        ]);

        assert_eq!(count(&document), 4);
    }
}
