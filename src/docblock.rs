//! Doc comment parsing.
//!
//! Turns the raw text of a comment attached to a declaration into a
//! [`DocBlock`]: a short description plus a mapping from tag name to the
//! ordered bodies of every occurrence of that tag. The parser is
//! deliberately small: it recovers the handful of tags the indexer cares
//! about (`@param`, `@return`, `@since`, `@ignore`) and preserves anything
//! else untouched in the tag map.
//!
//! Malformed input degrades gracefully: an unparsable tag body yields an
//! empty string for that tag, never an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// A tag opener: `@name` at the start of a line or after whitespace.
static TAG_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\s)@([A-Za-z][A-Za-z0-9_-]*)").expect("tag pattern should be valid")
});

/// Parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    short_description: String,
    tags: BTreeMap<String, Vec<String>>,
}

/// Position and name of one `@tag` occurrence within a line.
struct TagMatch {
    name: String,
    start: usize,
    end: usize,
}

impl DocBlock {
    /// Parse the raw text of a comment (decorations included).
    ///
    /// The short description is the first block of prose before any tag or
    /// blank line; internal whitespace and newlines are collapsed to single
    /// spaces. Tag bodies may continue across lines until the next tag or a
    /// blank line.
    pub fn parse(raw: &str) -> Self {
        let mut description = String::new();
        let mut description_done = false;
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut open_tag: Option<String> = None;

        for raw_line in raw.lines() {
            let line = strip_decoration(raw_line);

            if line.is_empty() {
                // A blank line ends the summary paragraph and any open tag
                // body.
                if !description.is_empty() {
                    description_done = true;
                }
                open_tag = None;
                continue;
            }

            let found = find_tags(line);
            let leading = found.first().map_or(line, |m| &line[..m.start]).trim();

            if !leading.is_empty() {
                if !description_done {
                    if !description.is_empty() {
                        description.push(' ');
                    }
                    description.push_str(&collapse_whitespace(leading));
                } else if let Some(name) = &open_tag
                    && let Some(bodies) = tags.get_mut(name)
                    && let Some(last) = bodies.last_mut()
                {
                    // Continuation of a multi-line tag body.
                    if !last.is_empty() {
                        last.push(' ');
                    }
                    last.push_str(&collapse_whitespace(leading));
                }
            }

            for (i, m) in found.iter().enumerate() {
                let body_end = found.get(i + 1).map_or(line.len(), |next| next.start);
                let body = collapse_whitespace(line[m.end..body_end].trim());
                tags.entry(m.name.clone()).or_default().push(body);
                open_tag = Some(m.name.clone());
                description_done = true;
            }
        }

        // Residue of comment markers can survive at the front of the
        // description (e.g. a lone `/` from a `/**` opener); trim it the way
        // the editor-facing output always has.
        let short_description = description.trim_start_matches(['/', ' ']).to_string();

        DocBlock {
            short_description,
            tags,
        }
    }

    /// The first-paragraph summary; empty when the comment has none.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// Whether the comment carries at least one occurrence of `@name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// The body of the first occurrence of `@name`, if any.
    pub fn first_tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name)?.first().map(String::as_str)
    }

    /// All bodies recorded for `@name`, in order of appearance.
    pub fn tag_values(&self, name: &str) -> &[String] {
        self.tags.get(name).map_or(&[], Vec::as_slice)
    }

    /// The `|`-delimited types of the first `@return` tag, each with one
    /// leading namespace separator stripped.
    ///
    /// Only the leading separator of each type goes; interior separators of
    /// a fully-qualified name stay put, so `\Foo\Bar` renders as `Foo\Bar`.
    /// This matches what the editor has always displayed.
    pub fn return_types(&self) -> Vec<String> {
        let Some(body) = self.first_tag("return") else {
            return Vec::new();
        };
        let Some(types) = body.split_whitespace().next() else {
            return Vec::new();
        };
        types
            .split('|')
            .map(|t| {
                let t = t.trim();
                t.strip_prefix('\\').unwrap_or(t).to_string()
            })
            .collect()
    }

    /// The body of the first `@since` tag, if any.
    pub fn since(&self) -> Option<&str> {
        self.first_tag("since")
    }
}

/// Locate every tag opener in a line.
fn find_tags(line: &str) -> Vec<TagMatch> {
    TAG_START
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(2)?;
            Some(TagMatch {
                name: name.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Strip comment decorations from one line: `/**`, `/*`, `//`, `#` openers,
/// a trailing `*/`, and the leading `*` of docblock body lines.
fn strip_decoration(line: &str) -> &str {
    let mut s = line.trim();
    if let Some(rest) = s.strip_suffix("*/") {
        s = rest.trim_end();
    }
    for marker in ["/**", "/*", "//", "#"] {
        if let Some(rest) = s.strip_prefix(marker) {
            s = rest;
            break;
        }
    }
    let s = s.trim_start();
    let s = s.strip_prefix('*').unwrap_or(s);
    s.trim()
}

/// Collapse runs of whitespace to single spaces.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_description_from_docblock() {
        let doc = DocBlock::parse("/**\n * Greets someone.\n */");
        assert_eq!(doc.short_description(), "Greets someone.");
    }

    #[test]
    fn single_line_docblock_with_inline_tag() {
        let doc = DocBlock::parse("/** Greets someone. @return void */");
        assert_eq!(doc.short_description(), "Greets someone.");
        assert_eq!(doc.return_types(), vec!["void"]);
    }

    #[test]
    fn description_newlines_collapse_to_spaces() {
        let doc = DocBlock::parse("/**\n * Does a thing\n * across lines.\n */");
        assert_eq!(doc.short_description(), "Does a thing across lines.");
    }

    #[test]
    fn description_stops_at_blank_line() {
        let doc = DocBlock::parse(
            "/**\n * Short summary.\n *\n * Much longer prose that is not\n * part of the summary.\n */",
        );
        assert_eq!(doc.short_description(), "Short summary.");
    }

    #[test]
    fn description_stops_at_first_tag() {
        let doc = DocBlock::parse("/**\n * Summary.\n * @param string $x\n */");
        assert_eq!(doc.short_description(), "Summary.");
        assert_eq!(doc.tag_values("param"), &["string $x".to_string()]);
    }

    #[test]
    fn line_comment_decoration_stripped() {
        let doc = DocBlock::parse("// Just a line comment.");
        assert_eq!(doc.short_description(), "Just a line comment.");
    }

    #[test]
    fn hash_comment_decoration_stripped() {
        let doc = DocBlock::parse("# Old-style comment.");
        assert_eq!(doc.short_description(), "Old-style comment.");
    }

    #[test]
    fn repeated_tags_keep_order() {
        let doc = DocBlock::parse(
            "/**\n * @param string $a\n * @param int $b\n * @param $c\n */",
        );
        assert_eq!(
            doc.tag_values("param"),
            &[
                "string $a".to_string(),
                "int $b".to_string(),
                "$c".to_string()
            ]
        );
    }

    #[test]
    fn multi_line_tag_body_continues() {
        let doc = DocBlock::parse(
            "/**\n * @param string $a the first\n *        argument of many\n */",
        );
        assert_eq!(
            doc.tag_values("param"),
            &["string $a the first argument of many".to_string()]
        );
    }

    #[test]
    fn return_types_split_on_pipe() {
        let doc = DocBlock::parse("/** @return int|string */");
        assert_eq!(doc.return_types(), vec!["int", "string"]);
    }

    #[test]
    fn return_type_leading_separator_stripped() {
        let doc = DocBlock::parse("/** @return \\WP_Error|\\Foo\\Bar */");
        assert_eq!(doc.return_types(), vec!["WP_Error", "Foo\\Bar"]);
    }

    #[test]
    fn return_type_ignores_trailing_prose() {
        let doc = DocBlock::parse("/** @return bool True on success. */");
        assert_eq!(doc.return_types(), vec!["bool"]);
    }

    #[test]
    fn empty_return_tag_yields_nothing() {
        let doc = DocBlock::parse("/** @return */");
        assert!(doc.return_types().is_empty());
        assert!(doc.has_tag("return"));
    }

    #[test]
    fn no_return_tag_yields_nothing() {
        let doc = DocBlock::parse("/** Summary only. */");
        assert!(doc.return_types().is_empty());
    }

    #[test]
    fn since_tag_body() {
        let doc = DocBlock::parse("/**\n * Do a thing.\n * @since 5.2\n */");
        assert_eq!(doc.since(), Some("5.2"));
    }

    #[test]
    fn ignore_tag_without_argument() {
        let doc = DocBlock::parse("/**\n * Internal helper.\n * @ignore\n */");
        assert!(doc.has_tag("ignore"));
        assert_eq!(doc.tag_values("ignore"), &[String::new()]);
    }

    #[test]
    fn unrecognized_tags_preserved() {
        let doc = DocBlock::parse("/** @deprecated use something_else() */");
        assert!(doc.has_tag("deprecated"));
        assert_eq!(doc.first_tag("deprecated"), Some("use something_else()"));
    }

    #[test]
    fn email_in_prose_is_not_a_tag() {
        let doc = DocBlock::parse("/** Mail admin@example.com about it. */");
        assert_eq!(doc.short_description(), "Mail admin@example.com about it.");
        assert!(!doc.has_tag("example"));
    }

    #[test]
    fn empty_comment_parses_to_defaults() {
        let doc = DocBlock::parse("/**\n */");
        assert_eq!(doc.short_description(), "");
        assert!(doc.return_types().is_empty());
        assert!(doc.since().is_none());
    }

    #[test]
    fn two_tags_on_one_line() {
        let doc = DocBlock::parse("/** @since 4.0 @ignore */");
        assert_eq!(doc.since(), Some("4.0"));
        assert!(doc.has_tag("ignore"));
    }
}
