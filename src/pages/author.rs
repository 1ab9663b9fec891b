// src/pages/author.rs
//
// create_collection.html: title + id box in, shareable link out.

use crate::{
    collection::{ normalize_id_text, serialize },
    config::consts::{ ID_COLLECTION_LINK, ID_COLLECTION_TITLE, ID_COLLECTION_URI, ID_RECORD_IDS },
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorPage {
    page_url: String,
    /// `#collectionTitle` input
    pub title: String,
    /// `#recordIds` textarea, raw as typed
    pub record_ids: String,
    link_href: String,
    uri_value: String,
}

impl AuthorPage {
    /// Bind to the page and compute the initial (empty) link.
    pub fn init(page_url: &str) -> Self {
        let mut page = Self { page_url: s!(page_url), ..Default::default() };
        page.on_input();
        logd!("Author: ready at {}", page_url);
        page
    }

    /// Input handler for both fields: recompute and publish the link.
    pub fn on_input(&mut self) -> &str {
        let url = serialize(&self.title, &self.record_ids, &self.page_url);
        self.link_href.clone_from(&url);
        self.uri_value = url;
        &self.uri_value
    }

    pub fn set_title(&mut self, title: &str) -> &str {
        self.title = s!(title);
        self.on_input()
    }

    pub fn set_record_ids(&mut self, raw: &str) -> &str {
        self.record_ids = s!(raw);
        self.on_input()
    }

    /// Input event by element id. Unknown ids are ignored.
    pub fn set_field(&mut self, element_id: &str, value: &str) -> bool {
        match element_id {
            ID_COLLECTION_TITLE => self.title = s!(value),
            ID_RECORD_IDS => self.record_ids = s!(value),
            _ => return false,
        }
        self.on_input();
        true
    }

    pub fn page_url(&self) -> &str { &self.page_url }

    /// Current `#collectionLink` href.
    pub fn link_href(&self) -> &str { &self.link_href }

    /// Current `#collectionUri` value.
    pub fn uri(&self) -> &str { &self.uri_value }

    pub fn id_count(&self) -> usize {
        normalize_id_text(&self.record_ids).len()
    }

    /// `(element id, value)` pairs this page writes on every input.
    pub fn outputs(&self) -> [(&'static str, &str); 2] {
        [(ID_COLLECTION_LINK, self.link_href.as_str()), (ID_COLLECTION_URI, self.uri_value.as_str())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_follows_input() {
        let mut page = AuthorPage::init("http://bbti.example/create_collection.html");
        assert_eq!(page.uri(), "http://bbti.example/collection.html?collTitle=");

        page.set_title("Bristol makers");
        let url = s!(page.set_record_ids("12, 13\n14"));
        assert_eq!(url, "http://bbti.example/collection.html?collTitle=Bristol%20makers&records=12;13;14");
        assert_eq!(page.link_href(), page.uri());
        assert_eq!(page.id_count(), 3);
    }

    #[test]
    fn fields_by_element_id() {
        let mut page = AuthorPage::init("create_collection.html");
        assert!(page.set_field("collectionTitle", "Sheffield"));
        assert!(page.set_field("recordIds", "4 5"));
        assert!(!page.set_field("somethingElse", "x"));
        assert_eq!(page.outputs()[1], ("collectionUri", "collection.html?collTitle=Sheffield&records=4;5"));
    }

    #[test]
    fn half_typed_input_is_safe() {
        let mut page = AuthorPage::init("create_collection.html");
        page.set_record_ids("12,,,");
        assert_eq!(page.uri(), "collection.html?collTitle=&records=12");
        page.set_title("%");
        assert_eq!(page.uri(), "collection.html?collTitle=%25&records=12");
    }
}
