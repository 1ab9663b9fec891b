// src/collection/fragment.rs
//
// One record's display content, cut out of its static page.

use crate::{
    config::consts::{ RECORD_CLASS, RECORD_PREFIX, RECORD_SUFFIX },
    core::html::{ find_element_by_class, strip_tags },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Outer HTML of the record's `<div class="org">`
    Record { id: String, html: String },
    /// Page retrieved, but it had no record content
    NotFound { id: String },
}

impl Fragment {
    /// Pick the content wrapper out of a retrieved record page.
    pub fn extract(id: &str, doc: &str) -> Self {
        match find_element_by_class(doc, "div", RECORD_CLASS) {
            Some((s, e)) => Fragment::Record { id: s!(id), html: s!(&doc[s..e]) },
            None => Fragment::NotFound { id: s!(id) },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Fragment::Record { id, .. } | Fragment::NotFound { id } => id,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Fragment::Record { .. })
    }

    /// HTML to append into the collection container.
    pub fn to_html(&self) -> String {
        match self {
            Fragment::Record { html, .. } => html.clone(),
            Fragment::NotFound { id } => format!(
                "<div class=\"{RECORD_CLASS}\">{}</div>",
                html_escape::encode_text(&not_found_message(id))
            ),
        }
    }

    /// Single-line text preview for tables and status lines.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = match self {
            Fragment::Record { html, .. } => strip_tags(html),
            Fragment::NotFound { id } => not_found_message(id),
        };
        if text.chars().count() <= max_chars {
            text
        } else {
            let mut cut: String = text.chars().take(max_chars).collect();
            cut.push('…');
            cut
        }
    }
}

pub fn not_found_message(id: &str) -> String {
    format!("Record with id {id} not found.")
}

/// `<record_path>org_<id>.html`
pub fn record_page_path(record_path: &str, id: &str) -> String {
    join!(record_path, RECORD_PREFIX, id, RECORD_SUFFIX)
}
