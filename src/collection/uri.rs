// src/collection/uri.rs
//
// Authoring side: free-text title + id box → shareable collection URL.
// Runs on every keystroke, so nothing here can fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::COLLECTION_PAGE;
use super::spec::query_string;

static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^0-9]+").expect("non-digit pattern is valid"));

/// Every run of non-digits becomes one space, then trim/split/`;`-join.
/// All runs are collapsed, not just the first one.
pub fn normalize_id_text(raw: &str) -> Vec<String> {
    NON_DIGITS
        .replace_all(raw, " ")
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Page URL without query/fragment, last path segment swapped for `page`.
pub fn sibling_page_url(page_url: &str, page: &str) -> String {
    let base = page_url
        .split(['?', '#'])
        .next()
        .unwrap_or("");

    // keep "scheme://host" intact when there is no path at all
    let path_start = base
        .find("://")
        .map(|i| i + 3)
        .and_then(|auth| base[auth..].find('/').map(|p| auth + p));

    match (path_start, base.rfind('/')) {
        (Some(ps), Some(slash)) if slash >= ps => join!(&base[..=slash], page),
        (None, _) if base.contains("://") => join!(base, "/", page),
        (_, Some(slash)) => join!(&base[..=slash], page),
        _ => s!(page),
    }
}

/// Full collection URL for the consuming page.
pub fn serialize(title: &str, raw_id_text: &str, page_url: &str) -> String {
    let ids = normalize_id_text(raw_id_text);
    let url = join!(&sibling_page_url(page_url, COLLECTION_PAGE), &query_string(title, &ids));
    logd!("Author: {} id(s) → {}", ids.len(), url);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gap_collapses() {
        assert_eq!(normalize_id_text(" 12, 13;;14\n15abc16 "), vec!["12", "13", "14", "15", "16"]);
        assert!(normalize_id_text("no ids here").is_empty());
        assert!(normalize_id_text("").is_empty());
    }

    #[test]
    fn page_swap_drops_query_and_fragment() {
        assert_eq!(
            sibling_page_url("https://bbti.example/site/create_collection.html?x=1#f", "collection.html"),
            "https://bbti.example/site/collection.html"
        );
        assert_eq!(sibling_page_url("https://bbti.example", "collection.html"), "https://bbti.example/collection.html");
        assert_eq!(sibling_page_url("create_collection.html", "collection.html"), "collection.html");
        assert_eq!(sibling_page_url("file:///srv/bbti/create_collection.html", "collection.html"), "file:///srv/bbti/collection.html");
    }

    #[test]
    fn serialize_encodes_title_as_is() {
        let url = serialize("<b>Makers</b> & co", "1 2", "http://h/create_collection.html");
        assert_eq!(url, "http://h/collection.html?collTitle=%3Cb%3EMakers%3C%2Fb%3E%20%26%20co&records=1;2");
    }
}
