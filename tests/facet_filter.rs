// tests/facet_filter.rs
use std::collections::HashMap;

use bbti_collect::core::net::Fetch;
use bbti_collect::errors::{ FacetLoadError, FetchError };
use bbti_collect::facets::{ AlignReport, FacetDependencyFilter, FacetForm, FacetTable };
use bbti_collect::pages::SearchPage;

const FORM: &str = r#"
<form id="ssForm">
  <fieldset title="County">
    <input type="checkbox" name="county" value="Capital">Capital
    <input type="checkbox" name="county" value="Cowichan">Cowichan
  </fieldset>
  <fieldset title="City">
    <input type="checkbox" name="city" value="Victoria" checked>Victoria
    <input type="checkbox" name="city" value="Duncan" checked>Duncan
  </fieldset>
</form>"#;

const TABLE: &str = r#"{ "cities": { "Victoria": ["Capital"], "Duncan": ["Cowichan"] } }"#;

#[derive(Default)]
struct MapFetcher {
    files: HashMap<String, String>,
    calls: std::sync::Mutex<usize>,
}

impl MapFetcher {
    fn with(path: &str, body: &str) -> Self {
        let mut f = Self::default();
        f.files.insert(path.into(), body.into());
        f
    }
    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Fetch for MapFetcher {
    fn get_text(&self, path: &str) -> Result<String, FetchError> {
        *self.calls.lock().unwrap() += 1;
        self.files.get(path).cloned().ok_or_else(|| FetchError::NotFound(path.into()))
    }
}

#[test]
fn capital_hides_duncan_and_nothing_shows_both() {
    let site = MapFetcher::with("js/facets.json", TABLE);
    let mut page = SearchPage::init(FacetForm::from_html(FORM), &site, "js/facets.json");
    assert!(page.filter().is_ready());
    assert_eq!(page.form.visible_cities(), vec!["Victoria", "Duncan"]);

    let r = page.toggle_county("Capital", true);
    assert_eq!(r, AlignReport { shown: 1, hidden: 1, unchecked: 1 });
    assert_eq!(page.form.visible_cities(), vec!["Victoria"]);
    let duncan = page.form.city_boxes().find(|c| c.value == "Duncan").unwrap();
    assert!(!duncan.checked && duncan.disabled);

    page.toggle_county("Capital", false);
    assert_eq!(page.form.visible_cities(), vec!["Victoria", "Duncan"]);
    // cleared boxes stay cleared once shown again
    assert!(!page.form.city_boxes().find(|c| c.value == "Duncan").unwrap().checked);
}

#[test]
fn both_counties_show_both_cities() {
    let site = MapFetcher::with("js/facets.json", TABLE);
    let mut page = SearchPage::init(FacetForm::from_html(FORM), &site, "js/facets.json");
    page.toggle_county("Capital", true);
    page.toggle_county("Cowichan", true);
    assert_eq!(page.form.visible_cities(), vec!["Victoria", "Duncan"]);
}

#[test]
fn alignment_is_idempotent() {
    let site = MapFetcher::with("js/facets.json", TABLE);
    let mut page = SearchPage::init(FacetForm::from_html(FORM), &site, "js/facets.json");
    page.toggle_county("Cowichan", true);
    let snapshot = page.form.clone();
    let r = page.realign();
    assert_eq!(page.form, snapshot);
    assert_eq!(r.unchecked, 0);
}

#[test]
fn missing_table_leaves_filter_inert() {
    let site = MapFetcher::default();
    let mut page = SearchPage::init(FacetForm::from_html(FORM), &site, "js/facets.json");
    assert!(!page.filter().is_ready());

    let r = page.toggle_county("Capital", true);
    assert_eq!(r, AlignReport::default());
    assert_eq!(page.form.visible_cities(), vec!["Victoria", "Duncan"]);
}

#[test]
fn malformed_table_is_reported() {
    let site = MapFetcher::with("js/facets.json", r#"{"cities": 3}"#);
    let mut filter = FacetDependencyFilter::new();
    let err = filter.initialize(&FacetForm::from_html(FORM), &site, "js/facets.json").unwrap_err();
    assert!(matches!(err, FacetLoadError::Malformed(_)));
    assert!(!filter.is_ready());
}

#[test]
fn table_loads_once_and_only_with_county_boxes() {
    let site = MapFetcher::with("js/facets.json", TABLE);

    let mut filter = FacetDependencyFilter::new();
    filter.initialize(&FacetForm::default(), &site, "js/facets.json").unwrap();
    assert!(!filter.is_ready());
    assert_eq!(site.calls(), 0);

    let form = FacetForm::from_html(FORM);
    filter.initialize(&form, &site, "js/facets.json").unwrap();
    filter.initialize(&form, &site, "js/facets.json").unwrap();
    assert!(filter.is_ready());
    assert_eq!(site.calls(), 1);
}

#[test]
fn county_table_shape_drives_filter_too() {
    let site = MapFetcher::with(
        "js/facets.json",
        r#"{ "counties": { "Capital": ["Victoria"], "Cowichan": ["Duncan"] } }"#,
    );
    let mut page = SearchPage::init(FacetForm::from_html(FORM), &site, "js/facets.json");
    page.toggle_county("Cowichan", true);
    assert_eq!(page.form.visible_cities(), vec!["Duncan"]);
}

#[test]
fn preloaded_table_is_not_fetched_again() {
    let site = MapFetcher::with("js/facets.json", TABLE);
    let table = FacetTable::load(&site, "js/facets.json").unwrap();
    let mut page = SearchPage::with_table(FacetForm::from_table(&table), table);
    assert!(page.filter().is_ready());

    page.toggle_county("Capital", true);
    assert_eq!(page.form.visible_cities(), vec!["Victoria"]);
    assert_eq!(site.calls(), 1);
}
