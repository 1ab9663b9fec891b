// src/gui/actions/facets.rs
use crate::{
    facets::{ FacetForm, FacetTable },
    gui::app::App,
    pages::SearchPage,
};

/// Read the search page's facet form and attach the filter. Without a
/// usable form, one is built from the facet table itself.
pub fn load_facets(app: &mut App) {
    let fetch = &*app.fetch;
    let search_path = app.state.gui.search_path_text.trim();
    let table_path = &app.state.options.facets.table_path;

    let form = match fetch.get_text(search_path) {
        Ok(html) => FacetForm::from_html(&html),
        Err(e) => {
            logd!("Facets: search page {} unavailable: {}", search_path, e);
            FacetForm::default()
        }
    };

    // a table loaded here for the fallback form is reused, not fetched again
    let page = if form.has_county_boxes() {
        SearchPage::init(form, fetch, table_path)
    } else {
        match FacetTable::load(fetch, table_path) {
            Ok(table) => SearchPage::with_table(FacetForm::from_table(&table), table),
            Err(e) => {
                loge!("Facets: {}", e);
                SearchPage::init(form, fetch, table_path)
            }
        }
    };
    let mut page = page.with_page_url(&app.state.options.site.page_url);
    if let Ok(ids) = app.state.options.collection.id_pattern() {
        page = page.with_id_pattern(ids);
    }

    let msg = if page.filter().is_ready() {
        format!(
            "Facets: {} county / {} city checkbox(es)",
            page.form.county_boxes().count(),
            page.form.city_boxes().count()
        )
    } else {
        s!("Facets: table unavailable, filter inactive")
    };
    app.search = Some(page);
    app.status(msg);
}
