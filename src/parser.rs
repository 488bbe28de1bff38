use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, List, ListItem};
use crate::inline::strip_bold;

const MAX_HEADING_LEVEL: usize = 6;

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(---|\*\*\*|___)$").expect("rule pattern regex should compile"));

static TABLE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[|\s\-:]+$").expect("table separator pattern regex should compile")
});

/// Matches a bullet item anywhere after leading whitespace. The first line of
/// a list must additionally start at column 0 once trimmed.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)[*+-]\s(.*)$").expect("bullet pattern regex should compile")
});

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)\d+\.\s(.*)$").expect("numbered pattern regex should compile")
});

const FENCE: &str = "```";

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (block, consumed) = classify(&lines, i);
        log::debug!("line {}: {} line(s) -> {:?}", i + 1, consumed, block);
        blocks.push(block);
        i += consumed;
    }

    blocks
}

/// Classify the block starting at `lines[index]`.
///
/// Returns the block and the number of source lines it consumed, always at
/// least one.
pub fn classify(lines: &[&str], index: usize) -> (Block, usize) {
    let line = lines[index].trim();

    if line.starts_with('#') {
        let level = line.chars().take_while(|&c| c == '#').count();
        if level <= MAX_HEADING_LEVEL {
            let text = strip_bold(line[level..].trim());
            return (
                Block::Heading {
                    level: level as u8,
                    text,
                },
                1,
            );
        }
        return (
            Block::Paragraph {
                text: line.to_string(),
            },
            1,
        );
    }

    if RULE_RE.is_match(line) {
        return (Block::Rule, 1);
    }

    if line.starts_with('|') && lines.get(index + 1).is_some_and(|l| l.trim().starts_with('|')) {
        return table(lines, index);
    }

    if BULLET_RE.is_match(line) {
        return list(lines, index, &BULLET_RE, false);
    }

    if NUMBERED_RE.is_match(line) {
        return list(lines, index, &NUMBERED_RE, true);
    }

    if line.starts_with(FENCE) {
        return code_block(lines, index);
    }

    if line.starts_with('>') {
        return quote(lines, index);
    }

    if line.is_empty() {
        (Block::Blank, 1)
    } else {
        (
            Block::Paragraph {
                text: line.to_string(),
            },
            1,
        )
    }
}

fn table(lines: &[&str], index: usize) -> (Block, usize) {
    let mut rows: Vec<&str> = lines[index..]
        .iter()
        .map(|l| l.trim())
        .take_while(|l| l.starts_with('|'))
        .collect();
    let consumed = rows.len();

    if rows.len() > 1 && TABLE_SEPARATOR_RE.is_match(rows[1]) {
        rows.remove(1);
    }

    let rows: Vec<Vec<String>> = rows.into_iter().map(split_row).collect();
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    (Block::Table { columns, rows }, consumed)
}

/// Split a table row on `|` into its non-empty cells. Empty cells, including
/// the edge artifacts of enclosing pipes, are dropped.
fn split_row(row: &str) -> Vec<String> {
    row.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

fn list(lines: &[&str], index: usize, marker: &Regex, ordered: bool) -> (Block, usize) {
    let items: Vec<ListItem> = lines[index..]
        .iter()
        .map_while(|line| {
            let caps = marker.captures(line)?;
            Some(ListItem {
                text: caps[2].trim_end().to_string(),
                indent: caps[1].len(),
            })
        })
        .collect();
    let consumed = items.len();

    (Block::List(List { ordered, items }), consumed)
}

fn code_block(lines: &[&str], index: usize) -> (Block, usize) {
    let body: Vec<&str> = lines[index + 1..]
        .iter()
        .copied()
        .take_while(|l| !l.starts_with(FENCE))
        .collect();

    let closed = index + 1 + body.len() < lines.len();
    let consumed = 1 + body.len() + usize::from(closed);

    (
        Block::CodeBlock {
            content: body.join("\n"),
        },
        consumed,
    )
}

fn quote(lines: &[&str], index: usize) -> (Block, usize) {
    let parts: Vec<&str> = lines[index..]
        .iter()
        .map(|l| l.trim())
        .take_while(|l| l.starts_with('>'))
        .map(|l| l[1..].trim())
        .collect();
    let consumed = parts.len();

    (
        Block::Quote {
            text: parts.join(" "),
        },
        consumed,
    )
}
