// src/core/html.rs
//! Tolerant, allocation-light HTML scanning.
//!
//! These helpers are tailored to the BBTI page templates: they find tags,
//! read attributes and cut out element blocks without building a DOM.
//! Tag and attribute names are matched case-insensitively; attribute values
//! are entity-decoded.

use super::vischars::VisChars;

/// Case-insensitive `find` starting at `from`, returning an absolute index.
pub fn find_ci(s: &str, pat: &str, from: usize) -> Option<usize> {
    let hay = s.get(from..)?.as_bytes();
    let needle = pat.as_bytes();
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len())
        .find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
        .map(|i| i + from)
}

/// One start or end tag found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Byte offset of `<`
    pub start: usize,
    /// Byte offset one past `>`
    pub end: usize,
    pub name: &'a str,
    pub is_close: bool,
    pub self_closing: bool,
    /// Raw attribute text between the name and `>`
    pub attrs: &'a str,
}

impl<'a> Tag<'a> {
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Decoded value of an attribute; `Some("")` for bare attributes like `checked`.
    pub fn attr(&self, want: &str) -> Option<String> {
        parse_attrs(self.attrs)
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(want))
            .map(|(_, v)| v)
    }

    pub fn has_attr(&self, want: &str) -> bool {
        self.attr(want).is_some()
    }
}

/// Iterator over the tags of a document, in order.
/// Comments, doctypes and processing instructions are skipped;
/// `<script>`/`<style>` bodies are treated as raw text.
pub struct Tags<'a> {
    doc: &'a str,
    pos: usize,
}

impl<'a> Tags<'a> {
    pub fn new(doc: &'a str) -> Self {
        Self { doc, pos: 0 }
    }

    pub fn starting_at(doc: &'a str, pos: usize) -> Self {
        Self { doc, pos }
    }
}

/// Index one past the `>` that closes the tag opened before `from`, honoring quotes.
fn tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = from;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let doc = self.doc;
        let b = doc.as_bytes();

        loop {
            let lt = doc.get(self.pos..)?.find('<')? + self.pos;
            let rest = &doc[lt + 1..];

            // comments
            if rest.starts_with("!--") {
                let close = doc[lt + 4..].find("-->")?;
                self.pos = lt + 4 + close + 3;
                continue;
            }
            // doctype / bogus comments
            if rest.starts_with('!') || rest.starts_with('?') {
                self.pos = doc[lt..].find('>').map(|g| lt + g + 1)?;
                continue;
            }

            let (is_close, name_start) = if rest.starts_with('/') { (true, lt + 2) } else { (false, lt + 1) };

            // tag name: letter, then alphanumerics/dashes
            let mut name_end = name_start;
            while name_end < b.len()
                && (b[name_end].is_ascii_alphabetic()
                    || (name_end > name_start && (b[name_end].is_ascii_digit() || b[name_end] == b'-')))
            {
                name_end += 1;
            }
            if name_end == name_start {
                // literal '<' in text, or `</ ...>` junk
                self.pos = if is_close { doc[lt..].find('>').map(|g| lt + g + 1)? } else { lt + 1 };
                continue;
            }

            let end = tag_end(b, name_end)?;
            let inner = doc[name_end..end - 1].trim_end();
            let self_closing = inner.ends_with('/');
            let attrs = inner.trim_end_matches('/');
            let name = &doc[name_start..name_end];
            self.pos = end;

            // raw-text elements: jump to their end tag
            if !is_close && (name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")) {
                let close_pat = join!("</", name);
                self.pos = find_ci(doc, &close_pat, end).unwrap_or(doc.len());
            }

            return Some(Tag { start: lt, end, name, is_close, self_closing, attrs });
        }
    }
}

/// Parse `name="v" name2='v' bare name3=v` into decoded pairs.
pub fn parse_attrs(s: &str) -> Vec<(String, String)> {
    let b = s.as_bytes();
    let n = b.len();
    let mut i = 0usize;
    let mut out = Vec::new();

    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        if i >= n { break; }

        let ks = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' { i += 1; }
        let key = &s[ks..i];

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let mut value = "";
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let vs = i + 1;
                    let ve = s[vs..].find(q as char).map(|e| vs + e).unwrap_or(n);
                    value = &s[vs..ve];
                    i = (ve + 1).min(n);
                }
                Some(_) => {
                    let vs = i;
                    while i < n && !b[i].is_ascii_whitespace() { i += 1; }
                    value = &s[vs..i];
                }
                None => {}
            }
        }
        if !key.is_empty() {
            out.push((s!(key), html_escape::decode_html_entities(value).into_owned()));
        }
    }
    out
}

/// Outer HTML range of the first `<tag class="class">` element, nesting-aware.
/// `class` must equal the whole attribute value. An element left open at
/// end of input runs to the end of the document.
pub fn find_element_by_class(doc: &str, tag: &str, class: &str) -> Option<(usize, usize)> {
    find_element(doc, |t| t.is(tag) && t.attr("class").as_deref() == Some(class))
}

/// Outer HTML range of the element carrying `id="id"`, whatever its tag.
pub fn find_element_by_id(doc: &str, id: &str) -> Option<(usize, usize)> {
    find_element(doc, |t| t.attr("id").as_deref() == Some(id))
}

/// First start tag matching `pred`, through its balanced end tag.
pub fn find_element<F>(doc: &str, pred: F) -> Option<(usize, usize)>
where
    F: Fn(&Tag<'_>) -> bool,
{
    let mut tags = Tags::new(doc);
    let open = tags.by_ref().find(|t| !t.is_close && pred(t))?;

    if open.self_closing {
        return Some((open.start, open.end));
    }

    let mut depth = 1usize;
    for t in tags {
        if !t.is(open.name) { continue; }
        if t.is_close {
            depth -= 1;
            if depth == 0 {
                return Some((open.start, t.end));
            }
        } else if !t.self_closing {
            depth += 1;
        }
    }
    Some((open.start, doc.len()))
}

/// Find the next complete tag block from `from` onwards, case-insensitive.
/// A block is from the start of the opening tag to the end of the closing tag.
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_ci(s, open_tag, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let end = find_ci(s, close_tag, open_end)? + close_tag.len();
    Some((start, end))
}

/// Given a complete tag block like `<legend ...>INNER</legend>`,
/// return the INNER text without the wrapping tags (still may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return block[open_end + 1..close_start].to_string();
            }
        }
    }
    s!()
}

/// The text a browser would report as `textContent`: tags and comments
/// dropped, character references decoded, whitespace untouched.
pub fn text_content(s: &str) -> String {
    let raw: String = VisChars::new(s).collect();
    html_escape::decode_html_entities(&raw).into_owned()
}

/// Remove all HTML tags, decode entities, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    super::sanitize::normalize_ws(&text_content(s.as_ref()))
}
