// src/core/query.rs
//
// application/x-www-form-urlencoded query strings, the way the site's
// pages read them: `+` is a space, `%XX` is a byte, first key wins.

use std::borrow::Cow;

use crate::errors::ParseError;

/// Decode one component. A `%` not followed by two hex digits, or bytes
/// that are not UTF-8, is a decoding failure.
pub fn decode_component(raw: &str) -> Result<String, ParseError> {
    let b = raw.as_bytes();
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'%' {
            let ok = b.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && b.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !ok {
                return Err(ParseError::DecodingFailed(format!("bad percent escape in '{raw}'")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| ParseError::DecodingFailed(format!("'{raw}': {e}")))
}

/// Percent-encode like `encodeURIComponent`: the RFC 3986 unreserved set
/// plus `! * ' ( )` stay literal.
pub fn encode_component(s: &str) -> String {
    let enc = urlencoding::encode(s);
    let mut out = String::with_capacity(enc.len());
    let mut rest: &str = &enc;
    while let Some(p) = rest.find('%') {
        out.push_str(&rest[..p]);
        let esc = &rest[p..(p + 3).min(rest.len())];
        match esc.to_ascii_uppercase().as_str() {
            "%21" => out.push('!'),
            "%2A" => out.push('*'),
            "%27" => out.push('\''),
            "%28" => out.push('('),
            "%29" => out.push(')'),
            _ => out.push_str(esc),
        }
        rest = &rest[p + esc.len()..];
    }
    out.push_str(rest);
    out
}

/// Parsed `?a=1&b=2` pairs, kept raw until asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Accepts a bare query, a `?query`, or a full URL; any `#fragment` is ignored.
    pub fn parse(input: &str) -> Self {
        let q = match input.find('?') {
            Some(i) => &input[i + 1..],
            None if input.contains("://") => "",
            None => input,
        };
        let q = q.split('#').next().unwrap_or("");

        let pairs = q
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| match p.split_once('=') {
                Some((k, v)) => (s!(k), s!(v)),
                None => (s!(p), s!()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`, decoded. `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<Result<String, ParseError>> {
        self.pairs
            .iter()
            .find(|(k, _)| decode_component(k).map(|d| d == key).unwrap_or(false))
            .map(|(_, v)| decode_component(v))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize { self.pairs.len() }
    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent() {
        assert_eq!(decode_component("My+Collection%20%C3%A9").unwrap(), "My Collection é");
    }

    #[test]
    fn rejects_bad_escapes() {
        assert!(matches!(decode_component("%zz"), Err(ParseError::DecodingFailed(_))));
        assert!(matches!(decode_component("abc%2"), Err(ParseError::DecodingFailed(_))));
        assert!(matches!(decode_component("%C3%28"), Err(ParseError::DecodingFailed(_))));
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("Smith & Sons (Bristol)!"), "Smith%20%26%20Sons%20(Bristol)!");
        assert_eq!(encode_component("a;b/c?d"), "a%3Bb%2Fc%3Fd");
    }

    #[test]
    fn first_key_wins_and_url_prefix_ignored() {
        let q = QueryParams::parse("https://bbti.example/collection.html?records=1;2&records=3#top");
        assert_eq!(q.get("records").unwrap().unwrap(), "1;2");
        assert!(q.get("collTitle").is_none());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn bare_key_has_empty_value() {
        let q = QueryParams::parse("?collTitle&x=1");
        assert_eq!(q.get("collTitle").unwrap().unwrap(), "");
    }
}
