// src/facets/form.rs
//
// The checkbox part of a search page: fieldsets of county and city boxes.

use crate::{
    config::consts::{ CITY_FIELDSET, COUNTY_FIELDSET },
    core::{
        html::{ inner_after_open_tag, next_tag_block_ci, strip_tags, text_content, Tags },
        sanitize::normalize_ws,
    },
};

use super::table::FacetTable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkbox {
    pub value: String,
    pub label: String,
    pub checked: bool,
    pub hidden: bool,
    pub disabled: bool,
}

impl Checkbox {
    pub fn new(value: &str) -> Self {
        Self { value: s!(value), label: s!(value), ..Default::default() }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fieldset {
    pub title: String,
    pub boxes: Vec<Checkbox>,
}

impl Fieldset {
    pub fn is_county(&self) -> bool { self.title.contains(COUNTY_FIELDSET) }
    pub fn is_city(&self) -> bool { self.title.contains(CITY_FIELDSET) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetForm {
    pub fieldsets: Vec<Fieldset>,
}

impl FacetForm {
    /// One County fieldset and one City fieldset, sorted by name.
    pub fn from_table(table: &FacetTable) -> Self {
        let counties = table.counties().into_iter().map(Checkbox::new).collect();
        let cities = table.cities().map(Checkbox::new).collect();
        Self {
            fieldsets: vec![
                Fieldset { title: s!(COUNTY_FIELDSET), boxes: counties },
                Fieldset { title: s!(CITY_FIELDSET), boxes: cities },
            ],
        }
    }

    /// Read fieldsets and their checkboxes out of page HTML.
    /// A fieldset without a `title` attribute is named by its `<legend>`.
    pub fn from_html(doc: &str) -> Self {
        let mut fieldsets: Vec<Fieldset> = Vec::new();
        let mut open = false;

        for tag in Tags::new(doc) {
            if tag.is("fieldset") {
                if tag.is_close {
                    open = false;
                    continue;
                }
                let title = match tag.attr("title") {
                    Some(t) => t,
                    None => legend_after(doc, tag.end),
                };
                fieldsets.push(Fieldset { title, boxes: Vec::new() });
                open = true;
                continue;
            }

            if !open || tag.is_close || !tag.is("input") {
                continue;
            }
            if !tag.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox")) {
                continue;
            }

            let value = tag.attr("value").unwrap_or_default();
            let label = label_after(doc, tag.end);
            let cb = Checkbox {
                label: if label.is_empty() { value.clone() } else { label },
                value,
                checked: tag.has_attr("checked"),
                hidden: tag.has_attr("hidden"),
                disabled: tag.has_attr("disabled"),
            };
            if let Some(fs) = fieldsets.last_mut() {
                fs.boxes.push(cb);
            }
        }

        logd!("Facets: parsed {} fieldset(s) from page", fieldsets.len());
        Self { fieldsets }
    }

    pub fn county_boxes(&self) -> impl Iterator<Item = &Checkbox> {
        self.fieldsets.iter().filter(|f| f.is_county()).flat_map(|f| f.boxes.iter())
    }

    pub fn city_boxes(&self) -> impl Iterator<Item = &Checkbox> {
        self.fieldsets.iter().filter(|f| f.is_city()).flat_map(|f| f.boxes.iter())
    }

    pub fn city_boxes_mut(&mut self) -> impl Iterator<Item = &mut Checkbox> {
        self.fieldsets.iter_mut().filter(|f| f.is_city()).flat_map(|f| f.boxes.iter_mut())
    }

    pub fn has_county_boxes(&self) -> bool {
        self.county_boxes().next().is_some()
    }

    /// Set every box with this value. Returns how many matched.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> usize {
        let mut n = 0;
        for cb in self.fieldsets.iter_mut().flat_map(|f| f.boxes.iter_mut()) {
            if cb.value == value {
                cb.checked = checked;
                n += 1;
            }
        }
        n
    }

    pub fn visible_cities(&self) -> Vec<&str> {
        self.city_boxes().filter(|c| c.is_visible()).map(|c| c.value.as_str()).collect()
    }
}

/// Text between an `<input>` and the next tag.
fn label_after(doc: &str, from: usize) -> String {
    let rest = &doc[from..];
    let end = rest.find('<').unwrap_or(rest.len());
    normalize_ws(&text_content(&rest[..end]))
}

fn legend_after(doc: &str, from: usize) -> String {
    match next_tag_block_ci(doc, "<legend", "</legend>", from) {
        Some((s, e)) => strip_tags(inner_after_open_tag(&doc[s..e])),
        None => s!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <form id="search">
          <fieldset title="County">
            <input type="checkbox" value="Capital" checked> Capital
            <input type="checkbox" value="Cowichan"/>Cowichan Valley
          </fieldset>
          <fieldset><legend>City</legend>
            <input type="checkbox" value="Victoria">Victoria
            <input type="checkbox" value="Duncan" hidden disabled>
            <input type="text" value="ignored">
          </fieldset>
        </form>"#;

    #[test]
    fn parses_fieldsets_and_boxes() {
        let form = FacetForm::from_html(PAGE);
        assert_eq!(form.fieldsets.len(), 2);
        assert_eq!(form.fieldsets[1].title, "City");

        let counties: Vec<_> = form.county_boxes().collect();
        assert_eq!(counties.len(), 2);
        assert!(counties[0].checked);
        assert_eq!(counties[1].label, "Cowichan Valley");

        let cities: Vec<_> = form.city_boxes().collect();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].label, "Duncan");
        assert!(cities[1].hidden && cities[1].disabled);
        assert_eq!(form.visible_cities(), vec!["Victoria"]);
    }

    #[test]
    fn built_from_table() {
        let table = FacetTable::from_json(r#"{"cities":{"Victoria":["Capital"],"Duncan":["Cowichan"]}}"#).unwrap();
        let mut form = FacetForm::from_table(&table);
        assert!(form.has_county_boxes());
        assert_eq!(form.visible_cities(), vec!["Duncan", "Victoria"]);
        assert_eq!(form.set_checked("Capital", true), 1);
        assert!(form.county_boxes().any(|c| c.checked));
    }
}
