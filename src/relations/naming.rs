//! Relationship field naming
//!
//! Downstream field names depend on these exact rules, including the
//! naive singular form: only one trailing `s` is removed, so
//! `categories` becomes `categorie`.

/// Drop one trailing `s`.
pub fn singularize(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}

/// Foreign-key field a child record uses to point at `parent_name`.
pub fn foreign_key(parent_name: &str, suffix: &str) -> String {
    format!("{}{}", singularize(parent_name), suffix)
}
