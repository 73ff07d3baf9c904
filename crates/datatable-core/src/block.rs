//! Locating directive blocks in a text document.
//!
//! A block looks like
//!
//! ```text
//! ---- datatable wide ----
//! cols: %pageid%, color
//! sort: color
//! ----
//! ```
//!
//! The opening line is four or more dashes, optional spaces, the word
//! `datatable`, an optional space-led class suffix of `[ a-zA-Z0-9_]`, then at
//! least one dash. The block ends at the first later line that starts with
//! four dashes; at least one body line must precede it.

use regex::Regex;
use std::{ops::Range, sync::OnceLock};

///
/// DirectiveBlock
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectiveBlock<'a> {
    pub classes: String,
    pub lines: Vec<&'a str>,

    /// Byte range in the source, opening line through closing dashes.
    pub range: Range<usize>,
}

fn block_regex() -> &'static Regex {
    static BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

    BLOCK_REGEX.get_or_init(|| {
        Regex::new(r"(?ms)^----+ *datatable((?: [ a-zA-Z0-9_]*)?)-+\r?\n(.*?)\r?\n----+")
            .expect("valid directive block regex")
    })
}

/// Find all directive blocks in `text`, in document order.
#[must_use]
pub fn find_blocks(text: &str) -> Vec<DirectiveBlock<'_>> {
    block_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let block = caps.get(0)?;
            let body = caps.get(2)?;
            let classes = caps.get(1).map_or("", |m| m.as_str());

            Some(DirectiveBlock {
                classes: classes.trim().to_string(),
                lines: body
                    .as_str()
                    .split('\n')
                    .map(|line| line.strip_suffix('\r').unwrap_or(line))
                    .collect(),
                range: block.range(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_block_with_classes() {
        let text = "intro\n---- datatable wide striped ----\ncols: a\nsort: a\n----\noutro";
        let blocks = find_blocks(text);

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.classes, "wide striped");
        assert_eq!(block.lines, ["cols: a", "sort: a"]);
        assert_eq!(
            &text[block.range.clone()],
            "---- datatable wide striped ----\ncols: a\nsort: a\n----"
        );
    }

    #[test]
    fn class_suffix_is_optional() {
        let blocks = find_blocks("------datatable--\ncols: a\n-----\n");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].classes, "");
    }

    #[test]
    fn finds_consecutive_blocks() {
        let text = "---- datatable ----\ncols: a\n----\n---- datatable x ----\ncols: b\n----";
        let blocks = find_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].classes, "x");
        assert_eq!(blocks[1].lines, ["cols: b"]);
    }

    #[test]
    fn handles_crlf_lines() {
        let blocks = find_blocks("---- datatable ----\r\ncols: a\r\n----\r\n");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines, ["cols: a"]);
    }

    #[test]
    fn rejects_malformed_openers() {
        let openers = [
            "--- datatable ----",
            "---- datatables ----",
            "---- datatable",
            "---- datatable bad-class ----",
            "---- datatable ---- trailing",
            "---- dataentry ----",
            "text ---- datatable ----",
        ];

        for opener in openers {
            let text = format!("{opener}\ncols: a\n----");
            assert!(find_blocks(&text).is_empty(), "opener {opener:?}");
        }
    }

    #[test]
    fn unclosed_block_is_ignored() {
        assert!(find_blocks("---- datatable ----\ncols: a\n").is_empty());
    }

    #[test]
    fn closing_rule_needs_a_body_line() {
        let blocks = find_blocks("---- datatable ----\n----\ncols: a\n----");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines, ["----", "cols: a"]);
    }
}
