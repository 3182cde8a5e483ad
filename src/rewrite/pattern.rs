//! Rewrite pattern compilation
//!
//! A "from" pattern is a path with literal segments, `:name` captures
//! and `*` wildcards, optionally followed by `?key=value&...`. Each
//! pattern compiles once into an anchored regex plus the capture layout
//! and a specificity score.

use regex::Regex;

use super::errors::{RewriteError, RewriteResult};
use crate::query::decode_pairs;

const LITERAL_SCORE: u32 = 100;
const PARAM_SCORE: u32 = 10;
const WILDCARD_SCORE: u32 = 1;
const QUERY_BONUS: u32 = 1000;

/// One capture group of a compiled path, in left-to-right order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// `:name`, matches one path segment
    Named(String),
    /// `*`, matches anything (non-greedy)
    Wildcard,
}

/// What a declared query key requires of the incoming value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpectation {
    /// `key=*`: any value, captured positionally after path captures
    Capture,
    /// `key=value`: exact match
    Equals(String),
    /// bare `key`: present with any value
    Present,
}

/// A declared query-string requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequirement {
    pub key: String,
    pub expect: QueryExpectation,
}

/// Compiled path half of a pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    captures: Vec<Capture>,
}

impl PathPattern {
    /// Compile a path pattern (no query string).
    pub fn compile(path: &str) -> RewriteResult<Self> {
        let mut source = String::from("^");
        let mut captures = Vec::new();
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                ':' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }

                    if name.is_empty() {
                        source.push(':');
                    } else {
                        source.push_str("([^/]+)");
                        captures.push(Capture::Named(name));
                    }
                }
                '*' => {
                    source.push_str("(.*?)");
                    captures.push(Capture::Wildcard);
                }
                other => {
                    let mut buf = [0u8; 4];
                    source.push_str(&regex::escape(other.encode_utf8(&mut buf)));
                }
            }
        }

        // A trailing slash on the request is tolerated.
        if !path.ends_with('/') {
            source.push_str("/?");
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|source| RewriteError::InvalidPattern {
            pattern: path.to_string(),
            source,
        })?;

        Ok(Self {
            source: path.to_string(),
            regex,
            captures,
        })
    }

    /// Match a request path, returning every capture in order.
    pub fn match_path(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            (1..=self.captures.len())
                .map(|i| caps.get(i).map_or("", |m| m.as_str()).to_string())
                .collect(),
        )
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse the declared query half of a "from" pattern.
pub fn parse_requirements(query: &str) -> Vec<QueryRequirement> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .zip(decode_pairs(query))
        .map(|(raw, (key, value))| {
            let expect = if !raw.contains('=') {
                QueryExpectation::Present
            } else if value == "*" {
                QueryExpectation::Capture
            } else {
                QueryExpectation::Equals(value)
            };
            QueryRequirement { key, expect }
        })
        .collect()
}

/// Specificity of a "from" pattern; higher wins.
///
/// Per path segment: literal 100, `:name` 10, `*` 1. Plus the segment
/// count, plus 1000 when the pattern declares a query string.
pub fn specificity(path: &str, has_query: bool) -> u32 {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let score: u32 = segments
        .iter()
        .map(|segment| {
            if segment.contains('*') {
                WILDCARD_SCORE
            } else if has_named_capture(segment) {
                PARAM_SCORE
            } else {
                LITERAL_SCORE
            }
        })
        .sum();

    let bonus = if has_query { QUERY_BONUS } else { 0 };
    score + segments.len() as u32 + bonus
}

fn has_named_capture(segment: &str) -> bool {
    segment
        .split(':')
        .skip(1)
        .any(|rest| rest.chars().next().is_some_and(is_name_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_capture_is_single_segment() {
        let pattern = PathPattern::compile("/posts/:id").unwrap();
        assert_eq!(pattern.match_path("/posts/123"), Some(vec!["123".to_string()]));
        assert_eq!(pattern.match_path("/posts/123/"), Some(vec!["123".to_string()]));
        assert_eq!(pattern.match_path("/posts/1/comments"), None);
        assert_eq!(pattern.captures(), &[Capture::Named("id".to_string())]);
    }

    #[test]
    fn test_wildcard_spans_segments() {
        let pattern = PathPattern::compile("/api/*").unwrap();
        assert_eq!(
            pattern.match_path("/api/posts/1"),
            Some(vec!["posts/1".to_string()])
        );
        assert_eq!(pattern.match_path("/other/posts"), None);
    }

    #[test]
    fn test_captures_numbered_left_to_right() {
        let pattern = PathPattern::compile("/:resource/*/show/:id").unwrap();
        assert_eq!(
            pattern.match_path("/posts/a/b/show/7"),
            Some(vec!["posts".to_string(), "a/b".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn test_regex_characters_are_literal() {
        let pattern = PathPattern::compile("/files/report.json").unwrap();
        assert!(pattern.match_path("/files/report.json").is_some());
        assert!(pattern.match_path("/files/reportXjson").is_none());

        let pattern = PathPattern::compile("/a+b/(c)").unwrap();
        assert!(pattern.match_path("/a+b/(c)").is_some());
    }

    #[test]
    fn test_specificity_scores() {
        assert_eq!(specificity("/posts/*", false), 103);
        assert_eq!(specificity("/posts/:id", false), 112);
        assert_eq!(specificity("/posts/new", false), 202);
        assert_eq!(specificity("/posts", true), 1101);
        assert_eq!(specificity("/", false), 0);
    }

    #[test]
    fn test_parse_requirements() {
        assert_eq!(
            parse_requirements("type=post&tag=*&draft"),
            vec![
                QueryRequirement {
                    key: "type".to_string(),
                    expect: QueryExpectation::Equals("post".to_string()),
                },
                QueryRequirement {
                    key: "tag".to_string(),
                    expect: QueryExpectation::Capture,
                },
                QueryRequirement {
                    key: "draft".to_string(),
                    expect: QueryExpectation::Present,
                },
            ]
        );
    }
}
