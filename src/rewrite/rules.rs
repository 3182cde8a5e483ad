//! Compiled rewrite rule sets
//!
//! Rules are ordered by specificity once, at load time. Per request the
//! first matching rule rewrites the URL and no other rule is consulted.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::errors::{RewriteError, RewriteResult};
use super::pattern::{
    parse_requirements, specificity, Capture, PathPattern, QueryExpectation, QueryRequirement,
};
use crate::query::RawParams;
use crate::record::type_name;

/// One compiled `from → to` rule
#[derive(Debug, Clone)]
pub struct CompiledRule {
    from: String,
    to: String,
    path: PathPattern,
    query: Option<Vec<QueryRequirement>>,
    target: Vec<TemplatePart>,
    specificity: u32,
}

/// A piece of a parsed "to" pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Literal(String),
    /// `$n`, 1-based
    Positional(usize),
    /// `:name`
    Named(String),
}

impl CompiledRule {
    /// Compile a single rule.
    pub fn compile(from: &str, to: &str) -> RewriteResult<Self> {
        let (from_path, from_query) = split_url(from);
        let query = from_query.map(parse_requirements);

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            path: PathPattern::compile(from_path)?,
            target: parse_template(to),
            specificity: specificity(from_path, query.is_some()),
            query,
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn specificity(&self) -> u32 {
        self.specificity
    }

    /// Rewrite `url` if this rule matches it.
    pub fn apply(&self, url: &str) -> Option<String> {
        let (path, query) = split_url(url);
        let mut positional = self.path.match_path(path)?;

        let named: Vec<(&str, String)> = self
            .path
            .captures()
            .iter()
            .zip(&positional)
            .filter_map(|(capture, value)| match capture {
                Capture::Named(name) => Some((name.as_str(), value.clone())),
                Capture::Wildcard => None,
            })
            .collect();

        if let Some(requirements) = &self.query {
            let incoming = RawParams::parse_query_string(query.unwrap_or(""));
            for requirement in requirements {
                let value = incoming.first(&requirement.key)?;
                match &requirement.expect {
                    QueryExpectation::Capture => positional.push(value.to_string()),
                    QueryExpectation::Equals(expected) if expected != value => return None,
                    QueryExpectation::Equals(_) | QueryExpectation::Present => {}
                }
            }
        }

        let target = substitute(&self.target, &positional, &named);
        let (_, target_query) = split_url(&self.to);

        Some(match (target_query, query) {
            (None, Some(original)) if !original.is_empty() => format!("{}?{}", target, original),
            _ => target,
        })
    }
}

/// Rules in match order
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleset {
    rules: Vec<CompiledRule>,
}

impl CompiledRuleset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a JSON object of `from: to` rules.
    ///
    /// Fails if the value is not an object or any target is not a string.
    pub fn compile(rules: &Value) -> RewriteResult<Self> {
        match rules {
            Value::Object(map) => Self::from_map(map),
            other => Err(RewriteError::InvalidRuleSet(type_name(other))),
        }
    }

    /// Compile rules from a map. Equal scores keep declaration order.
    pub fn from_map(rules: &Map<String, Value>) -> RewriteResult<Self> {
        let mut compiled = rules
            .iter()
            .map(|(from, to)| match to {
                Value::String(to) => CompiledRule::compile(from, to),
                other => Err(RewriteError::NonTextualTarget {
                    pattern: from.clone(),
                    found: type_name(other),
                }),
            })
            .collect::<RewriteResult<Vec<_>>>()?;

        compiled.sort_by(|a, b| b.specificity.cmp(&a.specificity));
        Ok(Self { rules: compiled })
    }

    /// Load and compile a JSON rules file.
    pub fn load(path: &Path) -> RewriteResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RewriteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules: Value = serde_json::from_str(&content)?;
        Self::compile(&rules)
    }

    /// The first rule matching `url` and the rewritten URL.
    pub fn find(&self, url: &str) -> Option<(&CompiledRule, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(url).map(|rewritten| (rule, rewritten)))
    }

    /// Rewrite `url`, or return it unchanged when no rule matches.
    pub fn rewrite(&self, url: &str) -> String {
        self.find(url)
            .map(|(_, rewritten)| rewritten)
            .unwrap_or_else(|| url.to_string())
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Split a "to" pattern into literals, `$n` and `:name` tokens.
fn parse_template(template: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let token_start = i + c.len_utf8();
        let accepts: fn(char) -> bool = match c {
            '$' => |ch| ch.is_ascii_digit(),
            ':' => |ch| ch.is_ascii_alphanumeric() || ch == '_',
            _ => {
                literal.push(c);
                continue;
            }
        };

        let mut token_end = token_start;
        while let Some(&(j, next)) = chars.peek() {
            if !accepts(next) {
                break;
            }
            token_end = j + next.len_utf8();
            chars.next();
        }

        let token = &template[token_start..token_end];
        let part = match c {
            '$' => token.parse().ok().map(TemplatePart::Positional),
            _ if !token.is_empty() => Some(TemplatePart::Named(token.to_string())),
            _ => None,
        };

        match part {
            Some(part) => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(part);
            }
            None => {
                literal.push(c);
                literal.push_str(token);
            }
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    parts
}

/// Fill `$n` and `:name` tokens. Unknown tokens stay as written.
fn substitute(template: &[TemplatePart], positional: &[String], named: &[(&str, String)]) -> String {
    let mut out = String::new();

    for part in template {
        match part {
            TemplatePart::Literal(text) => out.push_str(text),
            TemplatePart::Positional(n) => match n.checked_sub(1).and_then(|i| positional.get(i)) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('$');
                    out.push_str(&n.to_string());
                }
            },
            TemplatePart::Named(name) => match named.iter().find(|(k, _)| *k == name.as_str()) {
                Some((_, value)) => out.push_str(value),
                None => {
                    out.push(':');
                    out.push_str(name);
                }
            },
        }
    }

    out
}
