//! Tracking which card words a draft already uses.

use std::collections::BTreeSet;

use serde::Serialize;
use storyweave_core::document::{Document, Node};

/// Which candidate words a document uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordUsage {
    /// Candidates found in the document, spelled as on the card.
    pub used: BTreeSet<String>,
    /// Whether every candidate was found.
    pub all_used: bool,
}

/// Reports which `candidates` occur in `document` as whole tokens.
///
/// Matching is case-insensitive. Tokens are maximal runs of alphanumeric
/// characters; locked words, hard breaks and paragraph boundaries always
/// end a token, while adjacent text runs join. Kana and kanji are written
/// without spaces, so each such character is a token of its own and a
/// Japanese candidate matches wherever its characters appear in sequence.
/// A multi-token candidate matches when its tokens appear consecutively.
/// A candidate with no alphanumeric characters never matches.
#[must_use]
pub fn usage<S: AsRef<str>>(document: &Document, candidates: &[S]) -> WordUsage {
    let tokens = tokenize(document);

    let used: BTreeSet<String> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| {
            let needle = split_tokens(candidate);
            !needle.is_empty()
                && tokens
                    .windows(needle.len())
                    .any(|window| window == needle.as_slice())
        })
        .map(str::to_owned)
        .collect();

    let all_used = candidates
        .iter()
        .all(|candidate| used.contains(candidate.as_ref()));

    WordUsage { used, all_used }
}

fn tokenize(document: &Document) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run = String::new();

    for node in document.walk() {
        match node {
            Node::Text { text } => run.push_str(text),
            Node::AtomicWord { attrs } => {
                tokens.extend(split_tokens(&run));
                run.clear();
                tokens.extend(split_tokens(&attrs.text));
            }
            Node::HardBreak | Node::Paragraph { .. } | Node::Doc { .. } => {
                tokens.extend(split_tokens(&run));
                run.clear();
            }
        }
    }
    tokens.extend(split_tokens(&run));

    tokens
}

fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for run in text.split(|c: char| !c.is_alphanumeric()) {
        let mut start = 0;
        for (index, c) in run.char_indices() {
            if is_unspaced_script(c) {
                if start < index {
                    tokens.push(run[start..index].to_lowercase());
                }
                tokens.push(c.to_string());
                start = index + c.len_utf8();
            }
        }
        if start < run.len() {
            tokens.push(run[start..].to_lowercase());
        }
    }

    tokens
}

/// Kana and CJK ideographs, which are written without word spaces.
fn is_unspaced_script(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF66}'..='\u{FF9F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(children: Vec<Node>) -> Document {
        Document::new(vec![Node::paragraph(children)])
    }

    #[test]
    fn test_all_used_when_every_candidate_present() {
        let document = paragraph(vec![Node::text("The Cat sat on the moon.")]);

        let result = usage(&document, &["cat", "MOON"]);

        assert!(result.all_used);
        assert_eq!(result.used, BTreeSet::from(["cat".to_owned(), "MOON".to_owned()]));
    }

    #[test]
    fn test_missing_candidate_is_reported() {
        let document = paragraph(vec![Node::text("the cat sat")]);

        let result = usage(&document, &["cat", "dog"]);

        assert!(!result.all_used);
        assert_eq!(result.used, BTreeSet::from(["cat".to_owned()]));
    }

    #[test]
    fn test_partial_token_does_not_match() {
        let document = paragraph(vec![Node::text("concatenate cats")]);

        let result = usage(&document, &["cat"]);

        assert!(result.used.is_empty());
        assert!(!result.all_used);
    }

    #[test]
    fn test_locked_words_are_tokens_of_their_own() {
        let document = paragraph(vec![
            Node::text("big"),
            Node::locked_word("apple", None),
            Node::text("pie"),
        ]);

        let result = usage(&document, &["apple", "bigapple"]);

        assert_eq!(result.used, BTreeSet::from(["apple".to_owned()]));
    }

    #[test]
    fn test_adjacent_text_runs_join_into_one_token() {
        let document = paragraph(vec![Node::text("rain"), Node::text("bow")]);

        let result = usage(&document, &["rainbow"]);

        assert!(result.all_used);
    }

    #[test]
    fn test_paragraph_boundary_splits_tokens() {
        let document = Document::new(vec![
            Node::paragraph(vec![Node::text("rain")]),
            Node::paragraph(vec![Node::text("bow")]),
        ]);

        let result = usage(&document, &["rainbow"]);

        assert!(!result.all_used);
    }

    #[test]
    fn test_multi_word_candidate_matches_consecutive_tokens() {
        let document = paragraph(vec![
            Node::text("we ate ice"),
            Node::HardBreak,
            Node::text("cream"),
        ]);

        let result = usage(&document, &["ice cream", "ate ice"]);

        assert_eq!(
            result.used,
            BTreeSet::from(["ice cream".to_owned(), "ate ice".to_owned()])
        );
    }

    #[test]
    fn test_repeated_occurrences_count_once() {
        let document = paragraph(vec![Node::text("cat cat cat")]);

        let result = usage(&document, &["cat"]);

        assert_eq!(result.used.len(), 1);
        assert!(result.all_used);
    }

    #[test]
    fn test_unrelated_words_never_break_full_usage() {
        let base = vec![Node::text("a fox and a hen")];
        let mut extended = base.clone();
        extended.push(Node::text(" plus an unrelated owl"));

        let before = usage(&paragraph(base), &["fox", "hen"]);
        let after = usage(&paragraph(extended), &["fox", "hen"]);

        assert!(before.all_used);
        assert!(after.all_used);
    }

    #[test]
    fn test_japanese_locked_words_match() {
        let document = paragraph(vec![
            Node::locked_word("ねこ", None),
            Node::text("が"),
            Node::locked_word("そら", None),
            Node::text("をとんだ。"),
        ]);

        let result = usage(&document, &["ねこ", "そら"]);

        assert!(result.all_used);
    }

    #[test]
    fn test_typed_japanese_words_match_without_spaces() {
        // Arrange
        let document = paragraph(vec![Node::text("ねこがそらをとんだ。")]);

        // Act
        let result = usage(&document, &["ねこ", "そら", "いぬ"]);

        // Assert
        assert_eq!(
            result.used,
            BTreeSet::from(["ねこ".to_owned(), "そら".to_owned()])
        );
        assert!(!result.all_used);
    }

    #[test]
    fn test_kanji_between_latin_letters_splits_tokens() {
        let document = paragraph(vec![Node::text("Tokyo東京Tower")]);

        let result = usage(&document, &["tokyo", "東京", "tower"]);

        assert!(result.all_used);
    }

    #[test]
    fn test_no_candidates_is_trivially_all_used() {
        let result = usage::<&str>(&Document::empty(), &[]);

        assert!(result.all_used);
        assert!(result.used.is_empty());
    }

    #[test]
    fn test_blank_candidate_never_matches() {
        let document = paragraph(vec![Node::text("anything")]);

        let result = usage(&document, &["  "]);

        assert!(!result.all_used);
    }
}
