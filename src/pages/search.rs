// src/pages/search.rs
//
// Search page hooks: facet filtering on the form, and a
// "view results as collection" link once a search has finished.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    collection::{ spec::query_string, uri::sibling_page_url, IdPattern },
    config::consts::{ COLLECTION_PAGE, ID_SS_RESULTS, RECORD_PREFIX, RECORD_SUFFIX, SEARCH_RESULTS_TITLE },
    core::{ html::{ find_element_by_id, Tags }, net::Fetch },
    facets::{ AlignReport, FacetDependencyFilter, FacetForm, FacetTable },
};

/// `…org_<id>.html`, optionally followed by a query or fragment.
static RECORD_HREF: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?:^|/){}([^/?#]+){}(?:[?#].*)?$",
        regex::escape(RECORD_PREFIX),
        regex::escape(RECORD_SUFFIX)
    );
    Regex::new(&pattern).expect("record href pattern is valid")
});

/// State of the `#viewResultsAsCollection` link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkState {
    pub visible: bool,
    pub href: Option<String>,
    pub record_ids: Vec<String>,
}

pub struct SearchPage {
    pub form: FacetForm,
    filter: FacetDependencyFilter,
    ids: IdPattern,
    page_url: String,
    link: LinkState,
}

impl SearchPage {
    /// Attach the facet filter. A table that cannot be loaded leaves the
    /// form usable and the filter inert.
    pub fn init(form: FacetForm, fetch: &dyn Fetch, facet_path: &str) -> Self {
        let mut filter = FacetDependencyFilter::new();
        if let Err(e) = filter.initialize(&form, fetch, facet_path) {
            loge!("Facets: {}; county filtering disabled", e);
        }
        Self::attach(form, filter)
    }

    /// Attach a filter over a table the caller already loaded.
    pub fn with_table(form: FacetForm, table: FacetTable) -> Self {
        Self::attach(form, FacetDependencyFilter::with_table(table))
    }

    fn attach(form: FacetForm, filter: FacetDependencyFilter) -> Self {
        let mut page = Self { form, filter, ids: IdPattern::default(), page_url: s!(), link: LinkState::default() };
        page.realign();
        page
    }

    /// Page URL used to derive the collection link (its last segment is replaced).
    pub fn with_page_url(mut self, page_url: &str) -> Self {
        self.page_url = s!(page_url);
        self
    }

    /// Pattern result ids must match to be linked.
    pub fn with_id_pattern(mut self, ids: IdPattern) -> Self {
        self.ids = ids;
        self
    }

    pub fn filter(&self) -> &FacetDependencyFilter { &self.filter }
    pub fn link(&self) -> &LinkState { &self.link }

    /// A county box was toggled.
    pub fn toggle_county(&mut self, county: &str, checked: bool) -> AlignReport {
        self.form.set_checked(county, checked);
        self.filter.on_county_change(&mut self.form, Some(county))
    }

    pub fn realign(&mut self) -> AlignReport {
        self.filter.on_county_change(&mut self.form, None)
    }

    /// Search completed: show the link iff there were hits, point it at a
    /// collection of the hit records, and realign the facets.
    /// With no linkable ids the href is a title-only collection.
    pub fn on_search_finished(&mut self, result_count: usize, results_html: Option<&str>) -> &LinkState {
        let visible = result_count > 0;
        let record_ids = match results_html {
            Some(html) if visible => result_record_ids(html, &self.ids),
            _ => Vec::new(),
        };
        let href = visible.then(|| {
            join!(&sibling_page_url(&self.page_url, COLLECTION_PAGE), &query_string(SEARCH_RESULTS_TITLE, &record_ids))
        });

        logd!("Search: {} result(s), {} record link(s)", result_count, record_ids.len());
        self.link = LinkState { visible, href, record_ids };
        self.realign();
        &self.link
    }
}

/// Record ids linked from the results (`…org_<id>.html`), in document
/// order, first occurrence kept. Only `#ssResults` is searched when present.
/// Ids the pattern rejects are skipped so the collection link still parses.
pub fn result_record_ids(html: &str, pattern: &IdPattern) -> Vec<String> {
    let scope = match find_element_by_id(html, ID_SS_RESULTS) {
        Some((s, e)) => &html[s..e],
        None => html,
    };

    let mut ids: Vec<String> = Vec::new();
    for tag in Tags::new(scope).filter(|t| !t.is_close && t.is("a")) {
        let Some(href) = tag.attr("href") else { continue };
        if let Some(id) = RECORD_HREF.captures(&href).and_then(|c| c.get(1)) {
            let id = id.as_str();
            if !pattern.is_id(id) {
                logd!("Search: skipping link to non-conforming id '{}'", id);
                continue;
            }
            if !ids.iter().any(|seen| seen == id) {
                ids.push(s!(id));
            }
        }
    }
    ids
}
