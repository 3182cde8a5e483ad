//! Multi-valued request parameters

use std::collections::BTreeMap;

/// Raw query-string parameters, one entry per key with every value in
/// the order it appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect already-decoded `(key, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    }

    /// Parse a raw query string (`a=1&b=2&a=3`), percent-decoding keys
    /// and values. `+` is treated as a space.
    pub fn parse_query_string(query: &str) -> Self {
        Self::from_pairs(decode_pairs(query))
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// First value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `key`, empty if absent.
    pub fn all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split and decode a query string into ordered pairs.
pub(crate) fn decode_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_keep_order() {
        let params = RawParams::from_pairs([("id", "1"), ("id", "2"), ("q", "x")]);
        assert_eq!(params.all("id"), &["1".to_string(), "2".to_string()]);
        assert_eq!(params.first("id"), Some("1"));
        assert_eq!(params.first("q"), Some("x"));
        assert!(params.all("missing").is_empty());
    }

    #[test]
    fn test_parse_query_string_decodes() {
        let params = RawParams::parse_query_string("title=hello%20world&q=a+b&flag");
        assert_eq!(params.first("title"), Some("hello world"));
        assert_eq!(params.first("q"), Some("a b"));
        assert_eq!(params.first("flag"), Some(""));
    }

    #[test]
    fn test_empty_query_string() {
        assert!(RawParams::parse_query_string("").is_empty());
    }
}
