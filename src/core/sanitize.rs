// src/core/sanitize.rs

use crate::config::consts::{ MIN_TITLE_CHARS, PLACEHOLDER_TITLE };
use super::html::text_content;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Render a decoded title as text only: markup dropped, references decoded,
/// leftover `<`/`>` removed. Shorter than three chars → placeholder.
/// Length is counted in `char`s, so a non-BMP symbol counts once, not twice.
pub fn sanitize_title(decoded: &str) -> String {
    let text: String = text_content(decoded)
        .chars()
        .filter(|&c| c != '<' && c != '>')
        .collect();

    if text.chars().count() < MIN_TITLE_CHARS {
        s!(PLACEHOLDER_TITLE)
    } else {
        text
    }
}

/// Filesystem-friendly stem from a collection title.
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_us = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("collection") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_markup_is_discarded() {
        assert_eq!(sanitize_title("<script>alert(1)</script>Gunmakers"), "alert(1)Gunmakers");
        assert_eq!(sanitize_title("<b>Bristol</b> &amp; Bath"), "Bristol & Bath");
    }

    #[test]
    fn short_title_counts_chars() {
        assert_eq!(sanitize_title("🎩🎩"), PLACEHOLDER_TITLE);
        assert_eq!(sanitize_title("🎩🎩🎩"), "🎩🎩🎩");
        assert_eq!(sanitize_title("Zé"), PLACEHOLDER_TITLE);
    }

    #[test]
    fn stray_angle_brackets_removed() {
        assert_eq!(sanitize_title("a < b > c"), "a  b  c");
        assert_eq!(sanitize_title("&lt;img&gt; makers"), "img makers");
    }

    #[test]
    fn short_titles_become_placeholder() {
        assert_eq!(sanitize_title(""), PLACEHOLDER_TITLE);
        assert_eq!(sanitize_title("Hi"), PLACEHOLDER_TITLE);
        assert_eq!(sanitize_title("<i></i>ab"), PLACEHOLDER_TITLE);
        assert_eq!(sanitize_title("Hey"), "Hey");
    }

    #[test]
    fn filename_from_title() {
        assert_eq!(sanitize_filename("Gunmakers of  Bristol!"), "Gunmakers_of_Bristol");
        assert_eq!(sanitize_filename("<<>>"), "collection");
    }
}
