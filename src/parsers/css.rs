use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Substring a property name must contain to be reported as a color
pub const COLOR_MARKER: &str = "color";

static IMPORTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*!\s*important\s*$").unwrap());

/// Reasons an inline style block is rejected as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("unexpected '}}' at offset {0}")]
    UnexpectedClose(usize),
    #[error("block opened at offset {0} is never closed")]
    UnclosedBlock(usize),
    #[error("unterminated comment at offset {0}")]
    UnterminatedComment(usize),
    #[error("unterminated string at offset {0}")]
    UnterminatedString(usize),
}

/// A single `name: value` pair inside a style rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// A top-level `selector { declarations }` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Values of the declarations whose property name contains [`COLOR_MARKER`]
    pub fn color_values(&self) -> impl Iterator<Item = &str> {
        self.declarations
            .iter()
            .filter(|d| d.name.contains(COLOR_MARKER))
            .map(|d| d.value.as_str())
    }
}

/// Collects color values from a sequence of inline style blocks.
///
/// A block that fails to parse is logged and skipped; the remaining blocks
/// are still scanned.
pub fn scan_colors<S: AsRef<str>>(blocks: &[S]) -> BTreeSet<String> {
    let mut colors = BTreeSet::new();

    for (index, block) in blocks.iter().enumerate() {
        match parse_stylesheet(block.as_ref()) {
            Ok(rules) => {
                for rule in &rules {
                    colors.extend(rule.color_values().map(str::to_string));
                }
            }
            Err(e) => {
                ::log::warn!("Skipping malformed style block {}: {}", index, e);
            }
        }
    }

    ::log::debug!(
        "CSS scanner found {} distinct colors in {} blocks",
        colors.len(),
        blocks.len()
    );
    colors
}

/// Parses a standalone stylesheet into its top-level style rules.
///
/// At-rules (`@media`, `@import`, ...) are consumed but not returned.
pub fn parse_stylesheet(css: &str) -> Result<Vec<StyleRule>, CssError> {
    let css = strip_comments(css)?;
    let bytes = css.as_bytes();
    let mut rules = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i)?,
            b';' => {
                // statement at-rule such as @import or @charset
                i += 1;
                start = i;
            }
            b'}' => return Err(CssError::UnexpectedClose(i)),
            b'{' => {
                let end = find_block_end(bytes, i)?;
                let prelude = css[start..i].trim();
                if !prelude.starts_with('@') {
                    rules.push(StyleRule {
                        selector: prelude.to_string(),
                        declarations: parse_declarations(&css[i + 1..end])?,
                    });
                }
                i = end + 1;
                start = i;
            }
            _ => i += 1,
        }
    }

    Ok(rules)
}

/// Replaces every comment with a single space, leaving strings untouched
fn strip_comments(css: &str) -> Result<String, CssError> {
    let bytes = css.as_bytes();
    let mut out = String::with_capacity(css.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i)?,
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let close = css[i + 2..]
                    .find("*/")
                    .ok_or(CssError::UnterminatedComment(i))?;
                out.push_str(&css[copied..i]);
                out.push(' ');
                i += close + 4;
                copied = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&css[copied..]);
    Ok(out)
}

/// Returns the offset just past the string literal opening at `open`
fn skip_string(bytes: &[u8], open: usize) -> Result<usize, CssError> {
    let quote = bytes[open];
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => break,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }

    Err(CssError::UnterminatedString(open))
}

/// Returns the offset of the `}` matching the `{` at `open`
fn find_block_end(bytes: &[u8], open: usize) -> Result<usize, CssError> {
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(CssError::UnclosedBlock(open))
}

/// Splits a rule body on top-level `;` and keeps the well-formed declarations
fn parse_declarations(body: &str) -> Result<Vec<Declaration>, CssError> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut nested = false;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'{' => {
                depth += 1;
                nested = true;
            }
            b'}' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => {
                if !nested {
                    segments.push(&body[start..i]);
                }
                nested = false;
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if !nested {
        segments.push(&body[start..]);
    }

    // nested rules are dropped along with the segment that holds them
    Ok(segments.into_iter().filter_map(parse_declaration).collect())
}

fn parse_declaration(segment: &str) -> Option<Declaration> {
    let (name, value) = segment.split_once(':')?;
    let name = name.trim();
    let value = IMPORTANT.replace(value.trim(), "");
    let value = value.trim();

    if name.is_empty() || value.is_empty() {
        return None;
    }

    Some(Declaration {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rule() {
        let rules = parse_stylesheet("p { color: red; font-size: 12px; }").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "p");
        assert_eq!(
            rules[0].declarations,
            vec![
                Declaration {
                    name: "color".to_string(),
                    value: "red".to_string()
                },
                Declaration {
                    name: "font-size".to_string(),
                    value: "12px".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_color_only_declarations() {
        let colors = scan_colors(&["p { color: red; font-size: 12px; }"]);
        assert_eq!(colors.len(), 1);
        assert!(colors.contains("red"));
    }

    #[test]
    fn test_color_substring_match() {
        let colors = scan_colors(&[
            "a { background-color: #fff; border-top-color: rgb(0, 0, 0); border: 1px solid blue }",
        ]);
        let expected: BTreeSet<String> = ["#fff", "rgb(0, 0, 0)"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(colors, expected);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let colors = scan_colors(&["a { COLOR: red; Color: blue; color: green }"]);
        assert_eq!(colors.len(), 1);
        assert!(colors.contains("green"));
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let colors = scan_colors(&["p { color: red; ", "h1 { color: blue; }"]);
        assert_eq!(colors.len(), 1);
        assert!(colors.contains("blue"));
    }

    #[test]
    fn test_duplicates_across_blocks_collapse() {
        let colors = scan_colors(&[
            "p { color: red } a { color: red }",
            "h1 { background-color: red; }",
        ]);
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_stylesheet("p { color: red; }}"),
            Err(CssError::UnexpectedClose(17))
        );
        assert_eq!(
            parse_stylesheet("p { color: red;"),
            Err(CssError::UnclosedBlock(2))
        );
        assert_eq!(
            parse_stylesheet("p { color: red; } /* open"),
            Err(CssError::UnterminatedComment(18))
        );
        assert!(matches!(
            parse_stylesheet("p { content: \"open; }"),
            Err(CssError::UnterminatedString(_))
        ));
    }

    #[test]
    fn test_comments_and_strings() {
        let rules = parse_stylesheet(
            "/* header { color: black } */ p::before { content: \"}{;\"; color: /* inline */ teal; }",
        )
        .unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "p::before");
        assert_eq!(rules[0].color_values().collect::<Vec<_>>(), vec!["teal"]);
    }

    #[test]
    fn test_at_rules_are_not_style_rules() {
        let rules = parse_stylesheet(
            "@charset \"utf-8\"; @import url(base.css); @media print { p { color: gray } } a { color: navy }",
        )
        .unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "a");
    }

    #[test]
    fn test_important_and_invalid_declarations() {
        let rules =
            parse_stylesheet("p { color: red !important; nonsense; : blue; outline-color: ; }")
                .unwrap();
        assert_eq!(rules[0].color_values().collect::<Vec<_>>(), vec!["red"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_stylesheet("").unwrap().is_empty());
        assert!(parse_stylesheet("   \n").unwrap().is_empty());
        assert!(scan_colors::<&str>(&[]).is_empty());
    }
}
