//! Whitespace normalization and boilerplate stripping for scraped article text.

use regex::Regex;
use std::sync::LazyLock;

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid horizontal whitespace regex"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline run regex"));
// "Unauthorized reproduction and redistribution prohibited", plus everything after it.
static DISCLAIMER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)무단\s*전재\s*및\s*재배포\s*금지.*$").expect("valid disclaimer regex")
});

/// Normalize article text before chunking.
///
/// - `\r\n` and lone `\r` become `\n`.
/// - Runs of spaces and tabs collapse to one space.
/// - Three or more consecutive newlines collapse to a blank line.
/// - Leading and trailing whitespace is trimmed.
/// - The reprint disclaimer and all text after it are removed.
///
/// Whitespace-only input yields an empty string.
pub fn clean_news_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(&unified, " ");
    let collapsed = EXCESS_NEWLINES.replace_all(&collapsed, "\n\n");
    let trimmed = collapsed.trim();
    DISCLAIMER.replace(trimmed, "").trim().to_string()
}

/// Collapse every whitespace run to one space. Used by the single-call summarizer.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings_and_spacing() {
        let cleaned = clean_news_text("  첫 문단\r\n\r\n\r\n\r\n둘째\t\t 문단\r셋째  ");
        assert_eq!(cleaned, "첫 문단\n\n둘째 문단\n셋째");
        assert!(!cleaned.contains('\r'));
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn strips_disclaimer_and_trailing_text() {
        let cleaned = clean_news_text("기사 본문. 무단 전재 및 재배포 금지. 추가텍스트");
        assert_eq!(cleaned, "기사 본문.");
    }

    #[test]
    fn disclaimer_match_tolerates_missing_or_extra_whitespace() {
        assert_eq!(clean_news_text("본문\n무단전재및재배포금지"), "본문");
        assert_eq!(
            clean_news_text("본문\n\n무단  전재\n및 재배포   금지\n기자 연락처"),
            "본문"
        );
    }

    #[test]
    fn blank_input_cleans_to_empty() {
        assert_eq!(clean_news_text(""), "");
        assert_eq!(clean_news_text(" \t\r\n\n "), "");
        assert_eq!(clean_news_text("무단 전재 및 재배포 금지"), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "",
            "plain",
            " a \t b \r\n\r\n\r\n c ",
            "line one \n \n\n \n line two",
            "본문.\n\n\n\n무단 전재 및 재배포 금지 뒤",
            "\u{a0}leading nbsp and trailing tab\t",
        ];
        for sample in samples {
            let once = clean_news_text(sample);
            assert_eq!(clean_news_text(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn collapse_whitespace_flattens_newlines() {
        assert_eq!(collapse_whitespace("  a\n\n b\t c  "), "a b c");
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
