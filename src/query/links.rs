//! Pagination `Link` header

use super::descriptor::{LIMIT_PARAM, PAGE_PARAM};

/// `X-Total-Count`: the unwindowed match count.
///
/// Lowercase so it can build a `HeaderName` at compile time; header
/// names compare case-insensitively.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `Link`: pagination links
pub const LINK_HEADER: &str = "link";

/// Build a `Link` header value for page `page` of size `limit`.
///
/// `url` is the request's path and query (optionally with scheme and
/// host). Every link keeps the original query and rewrites `_page` and
/// `_limit`. `prev` is omitted on the first page and `next` on the last.
pub fn build_link_header(url: &str, page: usize, limit: usize, total: usize) -> String {
    let limit = limit.max(1);
    let last = total.div_ceil(limit).max(1);

    let mut links = vec![("first", 1)];
    if page > 1 {
        links.push(("prev", page - 1));
    }
    if page < last {
        links.push(("next", page + 1));
    }
    links.push(("last", last));

    links
        .into_iter()
        .map(|(rel, target)| format!("<{}>; rel=\"{}\"", page_url(url, target, limit), rel))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rewrite `_page` and `_limit` in place, appending them when missing.
fn page_url(url: &str, page: usize, limit: usize) -> String {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let mut pairs: Vec<String> = Vec::new();
    let mut seen_page = false;
    let mut seen_limit = false;

    for part in query.split('&').filter(|p| !p.is_empty()) {
        let key = part.split_once('=').map_or(part, |(k, _)| k);
        if key == PAGE_PARAM {
            if !seen_page {
                pairs.push(format!("{}={}", PAGE_PARAM, page));
                seen_page = true;
            }
        } else if key == LIMIT_PARAM {
            if !seen_limit {
                pairs.push(format!("{}={}", LIMIT_PARAM, limit));
                seen_limit = true;
            }
        } else {
            pairs.push(part.to_string());
        }
    }

    if !seen_page {
        pairs.push(format!("{}={}", PAGE_PARAM, page));
    }
    if !seen_limit {
        pairs.push(format!("{}={}", LIMIT_PARAM, limit));
    }

    format!("{}?{}", path, pairs.join("&"))
}
