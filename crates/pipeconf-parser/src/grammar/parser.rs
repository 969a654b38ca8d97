//! Recursive-descent parser over indented lines

use super::lines::{scan, Line};
use super::node::{Entry, Item, Node};
use super::SyntaxIssue;

/// Nesting levels below the root before deeper blocks are skipped
const MAX_DEPTH: usize = 128;

/// Parse document text into a tree.
///
/// The root is always a mapping (empty for blank input). Lines that do
/// not fit the grammar are skipped and returned as issues.
pub fn parse_tree(text: &str) -> (Node, Vec<SyntaxIssue>) {
    let lines = scan(text);
    let root_indent = lines
        .iter()
        .filter(|line| !line.is_insignificant())
        .map(|line| line.indent)
        .min()
        .unwrap_or(0);

    let mut parser = Parser {
        lines,
        pos: 0,
        depth: 0,
        issues: Vec::new(),
    };

    let mut entries = Vec::new();
    loop {
        entries.extend(parser.parse_mapping(root_indent));
        // Whatever stopped the root mapping is out of place; skip it and go on
        match parser.peek() {
            Some(line) => {
                let (number, indent) = (line.number, line.indent);
                parser.skip_block(number, indent, "unexpected sequence item at top level");
            }
            None => break,
        }
    }

    (Node::Mapping(entries), parser.issues)
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    depth: usize,
    issues: Vec<SyntaxIssue>,
}

impl<'a> Parser<'a> {
    /// Next line that carries structure, skipping blanks and comments
    fn peek(&mut self) -> Option<Line<'a>> {
        while let Some(line) = self.lines.get(self.pos) {
            if !line.is_insignificant() {
                return Some(*line);
            }
            self.pos += 1;
        }
        None
    }

    /// Skip a line and everything nested under it, recording one issue
    fn skip_block(&mut self, number: usize, indent: usize, message: &str) {
        self.issues.push(SyntaxIssue::new(number, message));
        self.pos += 1;
        while let Some(line) = self.peek() {
            if line.indent <= indent {
                break;
            }
            self.pos += 1;
        }
    }

    /// Entries at exactly `indent`, stopping at the first shallower line
    /// or at a sequence item (which belongs to the caller)
    fn parse_mapping(&mut self, indent: usize) -> Vec<Entry> {
        let mut entries = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                self.skip_block(line.number, line.indent, "unexpected indentation");
                continue;
            }
            if line.is_sequence_item() {
                break;
            }
            self.pos += 1;
            match self.parse_entry(indent, line.text, line.number) {
                Some(entry) => entries.push(entry),
                None => {
                    self.pos -= 1;
                    self.skip_block(line.number, indent, "expected 'key: value'");
                }
            }
        }
        entries
    }

    /// A mapping whose first entry sat on a sequence item's dash line
    fn parse_mapping_after(&mut self, indent: usize, first: Entry) -> Vec<Entry> {
        let mut entries = vec![first];
        entries.extend(self.parse_mapping(indent));
        entries
    }

    /// Items at exactly `indent`
    fn parse_sequence(&mut self, indent: usize) -> Vec<Item> {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                self.skip_block(line.number, line.indent, "unexpected indentation");
                continue;
            }
            if !line.is_sequence_item() {
                break;
            }
            self.pos += 1;

            let after_dash = &line.text[1..];
            let rest = after_dash.trim_start();
            let value = if rest.is_empty() {
                self.parse_nested(indent, false)
            } else if let Some((key, _)) = split_key(rest) {
                // `- key: value` opens a mapping at the column of `key`
                let column = indent + 1 + (after_dash.len() - rest.len());
                log::trace!("line {}: mapping item '{}' at column {}", line.number, key, column);
                match self.parse_entry(column, rest, line.number) {
                    Some(first) => Node::Mapping(self.parse_mapping_after(column, first)),
                    None => Node::Scalar(unquote(rest)),
                }
            } else {
                Node::Scalar(unquote(rest))
            };

            items.push(Item {
                value,
                line: line.number,
            });
        }
        items
    }

    /// The value under a `key:` or `-` that had nothing after it.
    ///
    /// All recursion passes through here, so nesting past [`MAX_DEPTH`]
    /// is skipped as one issue instead of descending further.
    fn parse_nested(&mut self, indent: usize, allow_same_column_sequence: bool) -> Node {
        let Some(line) = self.peek() else {
            return Node::Scalar(String::new());
        };
        let same_column_sequence =
            allow_same_column_sequence && line.indent == indent && line.is_sequence_item();
        if line.indent <= indent && !same_column_sequence {
            return Node::Scalar(String::new());
        }

        if self.depth >= MAX_DEPTH {
            self.issues.push(SyntaxIssue::new(
                line.number,
                format!("nesting deeper than {} levels", MAX_DEPTH),
            ));
            while let Some(next) = self.peek() {
                let inside = next.indent > indent
                    || (same_column_sequence && next.indent == indent && next.is_sequence_item());
                if !inside {
                    break;
                }
                self.pos += 1;
            }
            return Node::Scalar(String::new());
        }

        self.depth += 1;
        let node = if line.is_sequence_item() {
            Node::Sequence(self.parse_sequence(line.indent))
        } else {
            Node::Mapping(self.parse_mapping(line.indent))
        };
        self.depth -= 1;
        node
    }

    /// Parse `key: ...` whose key starts at column `indent`.
    /// The cursor is already past the key's line.
    fn parse_entry(&mut self, indent: usize, text: &str, number: usize) -> Option<Entry> {
        let (key, value) = split_key(text)?;

        let value = if value.is_empty() {
            self.parse_nested(indent, true)
        } else if let Some(explicit) = block_header(value) {
            Node::Block(self.parse_block_scalar(indent, explicit))
        } else {
            Node::Scalar(unquote(value))
        };

        Some(Entry {
            key: unquote(key),
            value,
            line: number,
        })
    }

    /// Body of a literal block scalar whose key sits at `key_indent`.
    ///
    /// Content indentation comes from the explicit indicator when present,
    /// otherwise from the first non-blank line. Trailing blank lines are
    /// dropped and the value carries no final newline.
    fn parse_block_scalar(&mut self, key_indent: usize, explicit: Option<usize>) -> String {
        let block_indent = match explicit {
            Some(offset) => key_indent + offset,
            None => {
                let first = self.lines[self.pos..].iter().find(|line| !line.is_blank());
                match first {
                    Some(line) if line.indent > key_indent => line.indent,
                    _ => return String::new(),
                }
            }
        };

        let mut body: Vec<&str> = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            if line.is_blank() {
                body.push(line.content_from(block_indent));
            } else if line.indent >= block_indent {
                body.push(line.content_from(block_indent));
            } else {
                break;
            }
            self.pos += 1;
        }

        while body.last().is_some_and(|line| line.trim().is_empty()) {
            body.pop();
        }
        body.join("\n")
    }
}

/// Split `key: value` / `key:` at the first separator.
///
/// Only the first `": "` separates, so values may contain further colons.
/// A quoted key is skipped whole before looking for the separator.
fn split_key(text: &str) -> Option<(&str, &str)> {
    let from = quoted_len(text).unwrap_or(0);
    let (key, value) = match text[from..].find(": ") {
        Some(at) => (&text[..from + at], text[from + at + 2..].trim()),
        None => (text.strip_suffix(':')?, ""),
    };
    let key = key.trim_end();
    if key.is_empty() || key.starts_with("- ") || key == "-" {
        return None;
    }
    Some((key, value))
}

/// Byte length of a leading quoted token, closing quote included
fn quoted_len(text: &str) -> Option<usize> {
    let quote = text.chars().next().filter(|ch| matches!(ch, '"' | '\''))?;
    let mut chars = text.char_indices().skip(1).peekable();
    while let Some((at, ch)) = chars.next() {
        if quote == '"' && ch == '\\' {
            chars.next();
        } else if ch == quote {
            if quote == '\'' && chars.peek().is_some_and(|(_, next)| *next == '\'') {
                chars.next();
            } else {
                return Some(at + 1);
            }
        }
    }
    None
}

/// Recognise a block scalar header: `|` plus an optional chomping
/// indicator (`-`/`+`, accepted and treated as strip) and an optional
/// indentation digit, optionally followed by a comment.
///
/// Returns `Some(explicit_indent)` for a header, `None` for any other value.
fn block_header(value: &str) -> Option<Option<usize>> {
    let rest = value.strip_prefix('|')?;
    let (indicators, comment) = match rest.find(char::is_whitespace) {
        Some(at) => (&rest[..at], rest[at..].trim_start()),
        None => (rest, ""),
    };
    if !comment.is_empty() && !comment.starts_with('#') {
        return None;
    }

    let mut explicit = None;
    let mut chomping = false;
    for ch in indicators.chars() {
        match ch {
            '-' | '+' if !chomping => chomping = true,
            '1'..='9' if explicit.is_none() => explicit = ch.to_digit(10).map(|d| d as usize),
            _ => return None,
        }
    }
    Some(explicit)
}

/// Strip one level of matching quotes from an inline value
pub(crate) fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == b'"' && last == b'"' {
            return unescape_double(&value[1..value.len() - 1]);
        }
        if first == b'\'' && last == b'\'' {
            return value[1..value.len() - 1].replace("''", "'");
        }
    }
    value.to_string()
}

fn unescape_double(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Node {
        let (node, issues) = parse_tree(text);
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
        node
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("id: a"), Some(("id", "a")));
        assert_eq!(split_key("path: s3://bucket/x: y"), Some(("path", "s3://bucket/x: y")));
        assert_eq!(split_key("steps:"), Some(("steps", "")));
        assert_eq!(split_key("url:http://x"), None);
        assert_eq!(split_key(": orphan"), None);
        assert_eq!(split_key("\"a: b\": c"), Some(("\"a: b\"", "c")));
        assert_eq!(split_key("'it''s: x':"), Some(("'it''s: x'", "")));
        assert_eq!(split_key("\"stage:\""), None);
        assert_eq!(split_key("\"open: x"), Some(("\"open", "x")));
    }

    #[test]
    fn test_quoted_len() {
        assert_eq!(quoted_len("\"ab\" rest"), Some(4));
        assert_eq!(quoted_len("\"a\\\"b\""), Some(6));
        assert_eq!(quoted_len("'it''s'"), Some(7));
        assert_eq!(quoted_len("\"unclosed"), None);
        assert_eq!(quoted_len("plain"), None);
    }

    #[test]
    fn test_quoted_sequence_items_stay_scalars() {
        let root = parse("deps:\n  - \"stage:\"\n  - \"a: b\"\n  - \"'a'\"\n");
        let deps = root.get("deps").and_then(Node::as_sequence).unwrap();
        let values: Vec<_> = deps.iter().map(|item| item.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                Node::Scalar("stage:".to_string()),
                Node::Scalar("a: b".to_string()),
                Node::Scalar("'a'".to_string()),
            ]
        );
    }

    #[test]
    fn test_block_header() {
        assert_eq!(block_header("|"), Some(None));
        assert_eq!(block_header("|-"), Some(None));
        assert_eq!(block_header("|+2"), Some(Some(2)));
        assert_eq!(block_header("|4-  # sql"), Some(Some(4)));
        assert_eq!(block_header("| grep foo"), None);
        assert_eq!(block_header("||"), None);
        assert_eq!(block_header("|0"), None);
        assert_eq!(block_header("plain"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"parquet\""), "parquet");
        assert_eq!(unquote("'it''s'"), "it's");
        assert_eq!(unquote("\"a\\\"b\\n\""), "a\"b\n");
        assert_eq!(unquote("\"unbalanced"), "\"unbalanced");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn test_nested_mapping_and_sequence() {
        let root = parse(
            "id: p\nsteps:\n  - id: a\n    kind: input\n    options:\n      header: true\n  - id: b\n    dependsOn:\n      - a\n",
        );

        assert_eq!(root.get_text("id"), Some("p"));
        let steps = root.get("steps").and_then(Node::as_sequence).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].value.get_text("kind"), Some("input"));
        assert_eq!(
            steps[0].value.get("options").and_then(|o| o.get_text("header")),
            Some("true")
        );
        let deps = steps[1].value.get("dependsOn").and_then(Node::as_sequence).unwrap();
        assert_eq!(deps[0].value, Node::Scalar("a".to_string()));
        assert_eq!(steps[1].line, 7);
    }

    #[test]
    fn test_sequence_at_same_column_as_key() {
        let root = parse("steps:\n- id: a\n  kind: sql\n- id: b\n  kind: sql\nother: x\n");
        let steps = root.get("steps").and_then(Node::as_sequence).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].value.get_text("id"), Some("b"));
        assert_eq!(root.get_text("other"), Some("x"));
    }

    #[test]
    fn test_block_scalar_keeps_interior_lines() {
        let root = parse("sql: |\n  SELECT *\n\n    FROM t  \n  -- done\n\n\nnext: 1\n");
        assert_eq!(
            root.get("sql"),
            Some(&Node::Block("SELECT *\n\n  FROM t  \n-- done".to_string()))
        );
        assert_eq!(root.get_text("next"), Some("1"));
    }

    #[test]
    fn test_block_scalar_with_indentation_indicator() {
        let root = parse("  sql: |2\n      indented\n    base\n  tail: y\n");
        assert_eq!(
            root.get("sql"),
            Some(&Node::Block("  indented\nbase".to_string()))
        );
        assert_eq!(root.get_text("tail"), Some("y"));
    }

    #[test]
    fn test_empty_block_scalar() {
        let root = parse("sql: |\nnext: 1\n");
        assert_eq!(root.get("sql"), Some(&Node::Block(String::new())));
        assert_eq!(root.get_text("next"), Some("1"));
    }

    #[test]
    fn test_stray_lines_become_issues() {
        let (root, issues) = parse_tree("id: p\nthis is not a key\n      deeper: 1\nsteps:\n");
        assert_eq!(root.get_text("id"), Some("p"));
        assert!(root.get("steps").is_some());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
    }

    #[test]
    fn test_top_level_sequence_is_skipped() {
        let (root, issues) = parse_tree("- a\n- b\nid: p\n");
        assert_eq!(root.get_text("id"), Some("p"));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_comments_are_ignored_outside_blocks() {
        let root = parse("# header\nid: p # trailing text stays\n  # indented comment\nsteps:\n");
        assert_eq!(root.get_text("id"), Some("p # trailing text stays"));
    }

    #[test]
    fn test_deep_nesting_is_cut_off() {
        let mut text = String::new();
        for level in 0..5000 {
            text.push_str(&format!("{:level$}k:\n", "", level = level));
        }
        text.push_str("tail: y\n");

        let (root, issues) = parse_tree(&text);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, MAX_DEPTH + 2);
        assert_eq!(root.get_text("tail"), Some("y"));

        let mut depth = 0;
        let mut node = &root;
        while let Some(next) = node.get("k") {
            depth += 1;
            node = next;
        }
        assert_eq!(depth, MAX_DEPTH + 1);
    }

    #[test]
    fn test_blank_input() {
        let (root, issues) = parse_tree("");
        assert_eq!(root, Node::Mapping(Vec::new()));
        assert!(issues.is_empty());
    }
}
