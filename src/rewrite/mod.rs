//! # Path Rewriter
//!
//! Maps incoming URLs to new ones before routing, using user rules such
//! as `"/api/*": "/$1"` or `"/blog/:id": "/posts/:id"`.
//!
//! # Matching
//!
//! 1. Rules are compiled once and ordered by specificity (descending)
//! 2. The first rule whose path and declared query match wins
//! 3. `$n` and `:name` in the target are substituted
//! 4. Without a target query, the original query string is carried over
//!
//! Compilation is the only fallible step.

mod errors;
mod pattern;
mod rules;

pub use errors::{RewriteError, RewriteResult};
pub use pattern::{specificity, Capture, PathPattern, QueryExpectation, QueryRequirement};
pub use rules::{CompiledRule, CompiledRuleset};

use serde_json::Value;

/// Compile a JSON object of rewrite rules.
pub fn compile_rewrite_rules(rules: &Value) -> RewriteResult<CompiledRuleset> {
    CompiledRuleset::compile(rules)
}

/// Rewrite a path-and-query with a compiled rule set.
pub fn rewrite(ruleset: &CompiledRuleset, url: &str) -> String {
    ruleset.rewrite(url)
}
