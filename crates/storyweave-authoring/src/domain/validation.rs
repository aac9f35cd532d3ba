//! Per-phase transition rules.

use storyweave_core::word_card::WordCard;

use super::errors::ValidationErrorKind;
use super::workflow::Phase;

/// Longest draft, in counted characters, an episode may commit.
pub const MAX_EPISODE_CHARS: usize = 200;

/// Facts about the workflow the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Counted length of the draft.
    pub char_count: usize,
    /// Whether the draft uses every selected word.
    pub all_words_used: bool,
    /// The chosen word card, if any.
    pub selected_words: Option<&'a WordCard>,
    /// Story title as entered.
    pub title: &'a str,
    /// Chosen cover image, if any.
    pub thumbnail_id: Option<&'a str>,
}

/// Checks whether the workflow may leave `phase`.
///
/// At most one failure is reported. For drafts the order is empty, too
/// long, then incomplete word usage.
///
/// # Errors
///
/// Returns the first `ValidationErrorKind` whose rule fails.
pub fn validate(
    phase: Phase,
    context: &ValidationContext<'_>,
) -> Result<(), ValidationErrorKind> {
    match phase {
        Phase::SelectWords => {
            if context.selected_words.is_none() {
                return Err(ValidationErrorKind::NoWordsSelected);
            }
        }
        Phase::WriteEpisode => {
            if context.char_count < 1 {
                return Err(ValidationErrorKind::EmptyContent);
            }
            if context.char_count > MAX_EPISODE_CHARS {
                return Err(ValidationErrorKind::TooLong);
            }
            if !context.all_words_used {
                return Err(ValidationErrorKind::IncompleteWordUsage);
            }
        }
        Phase::SetTitleAndThumbnail => {
            if context.title.trim().is_empty() {
                return Err(ValidationErrorKind::MissingTitle);
            }
            if context.thumbnail_id.is_none_or(str::is_empty) {
                return Err(ValidationErrorKind::MissingThumbnail);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ValidationContext<'static> {
        ValidationContext {
            char_count: 10,
            all_words_used: true,
            selected_words: None,
            title: "",
            thumbnail_id: None,
        }
    }

    #[test]
    fn test_select_words_requires_a_card() {
        assert_eq!(
            validate(Phase::SelectWords, &context()),
            Err(ValidationErrorKind::NoWordsSelected)
        );
    }

    #[test]
    fn test_select_words_passes_with_a_card() {
        let card = WordCard::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]).unwrap();
        let ctx = ValidationContext {
            selected_words: Some(&card),
            ..context()
        };

        assert_eq!(validate(Phase::SelectWords, &ctx), Ok(()));
    }

    #[test]
    fn test_draft_boundaries() {
        for (count, expected) in [
            (0, Err(ValidationErrorKind::EmptyContent)),
            (1, Ok(())),
            (200, Ok(())),
            (201, Err(ValidationErrorKind::TooLong)),
        ] {
            let ctx = ValidationContext {
                char_count: count,
                ..context()
            };
            assert_eq!(validate(Phase::WriteEpisode, &ctx), expected, "count {count}");
        }
    }

    #[test]
    fn test_empty_content_outranks_word_usage() {
        let ctx = ValidationContext {
            char_count: 0,
            all_words_used: false,
            ..context()
        };

        assert_eq!(
            validate(Phase::WriteEpisode, &ctx),
            Err(ValidationErrorKind::EmptyContent)
        );
    }

    #[test]
    fn test_too_long_outranks_word_usage() {
        let ctx = ValidationContext {
            char_count: 250,
            all_words_used: false,
            ..context()
        };

        assert_eq!(
            validate(Phase::WriteEpisode, &ctx),
            Err(ValidationErrorKind::TooLong)
        );
    }

    #[test]
    fn test_incomplete_word_usage_is_reported_last() {
        let ctx = ValidationContext {
            all_words_used: false,
            ..context()
        };

        assert_eq!(
            validate(Phase::WriteEpisode, &ctx),
            Err(ValidationErrorKind::IncompleteWordUsage)
        );
    }

    #[test]
    fn test_publish_requires_non_blank_title() {
        let ctx = ValidationContext {
            title: "   ",
            thumbnail_id: Some("thumb-1"),
            ..context()
        };

        assert_eq!(
            validate(Phase::SetTitleAndThumbnail, &ctx),
            Err(ValidationErrorKind::MissingTitle)
        );
    }

    #[test]
    fn test_publish_requires_thumbnail() {
        for thumbnail_id in [None, Some("")] {
            let ctx = ValidationContext {
                title: "The Moon Cat",
                thumbnail_id,
                ..context()
            };

            assert_eq!(
                validate(Phase::SetTitleAndThumbnail, &ctx),
                Err(ValidationErrorKind::MissingThumbnail)
            );
        }
    }

    #[test]
    fn test_publish_passes_with_title_and_thumbnail() {
        let ctx = ValidationContext {
            title: "The Moon Cat",
            thumbnail_id: Some("thumb-1"),
            ..context()
        };

        assert_eq!(validate(Phase::SetTitleAndThumbnail, &ctx), Ok(()));
    }
}
