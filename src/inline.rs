//! Inline markup detection.
//!
//! Three matchers run over the original line text: bold (`**x**` or `__x__`),
//! inline code (`` `x` ``) and links (`[text](url)`). Where their matches
//! collide the higher-priority format wins, in that order. Italic markup is
//! never recognised.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("bold pattern regex should compile")
});

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("code pattern regex should compile"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(.+?)\]\((.+?)\)").expect("link pattern regex should compile")
});

static STAR_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*").expect("star bold pattern regex should compile")
});

/// Inline formats in priority order: earlier variants win overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Format {
    Bold,
    Code,
    Link,
}

struct Candidate {
    format: Format,
    range: Range<usize>,
    span: Span,
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

fn candidates(text: &str) -> Vec<Candidate> {
    let mut out = Vec::new();

    for caps in BOLD_RE.captures_iter(text) {
        let whole = caps.get_match();
        if let Some(inner) = caps.get(1).or_else(|| caps.get(2)) {
            out.push(Candidate {
                format: Format::Bold,
                range: whole.range(),
                span: Span::Bold(inner.as_str().to_string()),
            });
        }
    }

    for caps in CODE_RE.captures_iter(text) {
        let whole = caps.get_match();
        if let Some(inner) = caps.get(1) {
            out.push(Candidate {
                format: Format::Code,
                range: whole.range(),
                span: Span::Code(inner.as_str().to_string()),
            });
        }
    }

    for caps in LINK_RE.captures_iter(text) {
        let whole = caps.get_match();
        if let (Some(label), Some(url)) = (caps.get(1), caps.get(2)) {
            out.push(Candidate {
                format: Format::Link,
                range: whole.range(),
                span: Span::Link {
                    text: label.as_str().to_string(),
                    url: url.as_str().to_string(),
                },
            });
        }
    }

    out
}

/// Split one line of text into ordered, non-overlapping spans.
///
/// Plain gaps are sliced straight from `text`; styled spans carry the
/// captured inner content with the markers removed.
pub fn spans(text: &str) -> Vec<Span> {
    let mut candidates = candidates(text);
    candidates.sort_by_key(|c| (c.format, c.range.start));

    let mut accepted: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if !accepted.iter().any(|a| overlaps(&a.range, &candidate.range)) {
            accepted.push(candidate);
        }
    }
    accepted.sort_by_key(|c| c.range.start);

    let mut spans = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut last_end = 0;
    for candidate in accepted {
        if candidate.range.start > last_end {
            spans.push(Span::Text(text[last_end..candidate.range.start].to_string()));
        }
        last_end = candidate.range.end;
        spans.push(candidate.span);
    }
    if last_end < text.len() {
        spans.push(Span::Text(text[last_end..].to_string()));
    }

    spans
}

/// Remove `**` bold markers, keeping the enclosed text.
pub fn strip_bold(text: &str) -> String {
    STAR_BOLD_RE.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_text() {
        assert_eq!(spans("Hello world"), vec![text("Hello world")]);
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert_eq!(spans(""), vec![]);
    }

    #[rstest]
    #[case("**bold**")]
    #[case("__bold__")]
    fn bold(#[case] input: &str) {
        assert_eq!(spans(input), vec![Span::Bold("bold".to_string())]);
    }

    #[test]
    fn bold_between_plain_text() {
        assert_eq!(
            spans("a **b** c"),
            vec![text("a "), Span::Bold("b".to_string()), text(" c")]
        );
    }

    #[test]
    fn asterisks_never_leak_into_output() {
        let joined: String = spans("x **one** y **two** z")
            .iter()
            .map(Span::text)
            .collect();
        assert_eq!(joined, "x one y two z");
    }

    #[test]
    fn inline_code() {
        assert_eq!(
            spans("run `cargo test` now"),
            vec![text("run "), Span::Code("cargo test".to_string()), text(" now")]
        );
    }

    #[test]
    fn link() {
        assert_eq!(
            spans("see [docs](https://example.com)."),
            vec![
                text("see "),
                Span::Link {
                    text: "docs".to_string(),
                    url: "https://example.com".to_string(),
                },
                text("."),
            ]
        );
    }

    #[test]
    fn italic_is_not_recognised() {
        assert_eq!(spans("*slanted*"), vec![text("*slanted*")]);
    }

    #[test]
    fn bold_wins_over_earlier_code() {
        // The code span starts first but collides with the bold span.
        assert_eq!(
            spans("`a **b` c**"),
            vec![text("`a "), Span::Bold("b` c".to_string())]
        );
    }

    #[test]
    fn code_wins_over_link() {
        assert_eq!(
            spans("`[x](y)`"),
            vec![Span::Code("[x](y)".to_string())]
        );
    }

    #[test]
    fn bold_wins_over_enclosing_link() {
        assert_eq!(
            spans("[**a**](u)"),
            vec![text("["), Span::Bold("a".to_string()), text("](u)")]
        );
    }

    #[test]
    fn mixed_formats_in_order() {
        assert_eq!(
            spans("`c` then **b** then [l](u)"),
            vec![
                Span::Code("c".to_string()),
                text(" then "),
                Span::Bold("b".to_string()),
                text(" then "),
                Span::Link {
                    text: "l".to_string(),
                    url: "u".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(spans("a ** b ` c"), vec![text("a ** b ` c")]);
    }

    #[test]
    fn strip_bold_keeps_content() {
        assert_eq!(strip_bold("The **big** title"), "The big title");
        assert_eq!(strip_bold("__init__"), "__init__");
    }
}
