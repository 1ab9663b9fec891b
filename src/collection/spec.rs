// src/collection/spec.rs
//! A collection is just a query string:
//!
//! ```text
//! ?collTitle=My%20Collection&records=1234;1235;1236
//! ```
//!
//! `CollectionSpec` is the validated, immutable reading of that string.

use regex::Regex;

use crate::{
    config::consts::{ DEFAULT_ID_PATTERN, ID_SEP, PARAM_RECORDS, PARAM_TITLE },
    core::{
        query::{ encode_component, QueryParams },
        sanitize::sanitize_title,
    },
    errors::ParseError,
};

/// Compiled id validators: one for a single id, one for the whole `;` list.
#[derive(Clone, Debug)]
pub struct IdPattern {
    source: String,
    single: Regex,
    list: Regex,
}

impl IdPattern {
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        let invalid = |e: regex::Error| ParseError::InvalidIdPattern {
            pattern: s!(pattern),
            reason: e.to_string(),
        };
        let single = Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)?;
        let list = Regex::new(&format!("^(?:{pattern})(?:{ID_SEP}(?:{pattern}))*$")).map_err(invalid)?;
        Ok(Self { source: s!(pattern), single, list })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_id(&self, id: &str) -> bool {
        self.single.is_match(id)
    }

    pub fn is_id_list(&self, list: &str) -> bool {
        self.list.is_match(list)
    }
}

impl Default for IdPattern {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PATTERN).expect("built-in id pattern compiles")
    }
}

/// Sanitized title + ordered record ids (duplicates allowed).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionSpec {
    title: String,
    record_ids: Vec<String>,
}

impl CollectionSpec {
    /// Read a collection from a query string (leading `?` or full URL accepted).
    ///
    /// The title is always usable: missing or too short gives the placeholder.
    /// The id list is all-or-nothing: one bad token rejects the whole spec.
    pub fn parse(query: &str, ids: &IdPattern) -> Result<Self, ParseError> {
        let params = QueryParams::parse(query);

        let raw_title = params.get(PARAM_TITLE).transpose()?.unwrap_or_default();
        let title = sanitize_title(&raw_title);

        let record_ids = match params.get(PARAM_RECORDS).transpose()? {
            None => Vec::new(),
            Some(list) => {
                if !ids.is_id_list(&list) {
                    logd!("Collection: ill-formed id list '{}'", list);
                    return Err(ParseError::MalformedIdList(list));
                }
                list.split(ID_SEP).map(String::from).collect()
            }
        };

        Ok(Self { title, record_ids })
    }

    /// Build from already-trusted parts (title is still sanitized).
    pub fn new(title: &str, record_ids: Vec<String>) -> Self {
        Self { title: sanitize_title(title), record_ids }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn record_ids(&self) -> &[String] { &self.record_ids }
    pub fn len(&self) -> usize { self.record_ids.len() }
    pub fn is_empty(&self) -> bool { self.record_ids.is_empty() }

    /// `?collTitle=…&records=a;b;c`, omitting `records` when there are none.
    pub fn to_query_string(&self) -> String {
        query_string(&self.title, &self.record_ids)
    }
}

pub(crate) fn query_string(title: &str, ids: &[String]) -> String {
    let mut q = join!("?", PARAM_TITLE, "=", &encode_component(title));
    if !ids.is_empty() {
        q.push('&');
        q.push_str(PARAM_RECORDS);
        q.push('=');
        let sep = ID_SEP.to_string();
        q.push_str(&ids.join(sep.as_str()));
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::PLACEHOLDER_TITLE;

    #[test]
    fn custom_pattern_is_anchored() {
        let p = IdPattern::new("[a-z]{2}\\d+").unwrap();
        assert!(p.is_id("ab12"));
        assert!(!p.is_id("xab12"));
        assert!(p.is_id_list("ab1;cd22"));
        assert!(!p.is_id_list("ab1;;cd22"));
    }

    #[test]
    fn alternation_pattern_stays_grouped() {
        let p = IdPattern::new("a|b").unwrap();
        assert!(p.is_id_list("a;b;a"));
        assert!(!p.is_id_list("ab"));
    }

    #[test]
    fn bad_pattern_is_reported() {
        assert!(matches!(IdPattern::new("(\\d+"), Err(ParseError::InvalidIdPattern { .. })));
    }

    #[test]
    fn default_pattern_is_digits() {
        let p = IdPattern::default();
        assert_eq!(p.as_str(), r"\d+");
        assert!(p.is_id_list("1;22;333"));
        assert!(!p.is_id_list(""));
    }

    #[test]
    fn missing_title_is_placeholder() {
        let spec = CollectionSpec::parse("?records=4", &IdPattern::default()).unwrap();
        assert_eq!(spec.title(), PLACEHOLDER_TITLE);
        assert_eq!(spec.record_ids(), ["4"]);
    }

    #[test]
    fn empty_records_value_is_malformed() {
        let err = CollectionSpec::parse("?collTitle=abc&records=", &IdPattern::default()).unwrap_err();
        assert_eq!(err, ParseError::MalformedIdList(s!()));
    }

    #[test]
    fn query_string_omits_empty_records() {
        let spec = CollectionSpec::new("Gunmakers", vec![]);
        assert_eq!(spec.to_query_string(), "?collTitle=Gunmakers");
        let spec = CollectionSpec::new("Gun makers", vec![s!("1"), s!("2")]);
        assert_eq!(spec.to_query_string(), "?collTitle=Gun%20makers&records=1;2");
    }
}
