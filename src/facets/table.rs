// src/facets/table.rs
//
// city → counties membership, loaded once from the site's JSON.
//
// Accepted shapes (merged when both are present):
//   { "cities":   { "Victoria": ["Capital"], ... } }
//   { "counties": { "Capital": ["Victoria", "Sidney"], ... } }

use std::collections::{ BTreeMap, BTreeSet };

use serde::Deserialize;

use crate::{ core::net::Fetch, errors::FacetLoadError };

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    cities: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    counties: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetTable {
    membership: BTreeMap<String, BTreeSet<String>>,
}

impl FacetTable {
    pub fn from_json(text: &str) -> Result<Self, FacetLoadError> {
        let raw: RawTable = serde_json::from_str(text)?;
        if raw.cities.is_none() && raw.counties.is_none() {
            return Err(FacetLoadError::Malformed(s!("expected a \"cities\" or \"counties\" table")));
        }

        let mut table = FacetTable::default();
        for (city, counties) in raw.cities.unwrap_or_default() {
            table.membership.entry(city).or_default().extend(counties);
        }
        for (county, cities) in raw.counties.unwrap_or_default() {
            for city in cities {
                table.membership.entry(city).or_default().insert(county.clone());
            }
        }
        Ok(table)
    }

    /// Retrieve and parse the table through the site transport.
    pub fn load(fetch: &dyn Fetch, path: &str) -> Result<Self, FacetLoadError> {
        let text = fetch.get_text(path)?;
        let table = Self::from_json(&text)?;
        logf!("Facets: loaded {} cities in {} counties from {}", table.membership.len(), table.counties().len(), path);
        Ok(table)
    }

    pub fn insert(&mut self, city: &str, county: &str) {
        self.membership.entry(s!(city)).or_default().insert(s!(county));
    }

    /// Counties a city lies in; empty for cities the table does not know.
    pub fn counties_of(&self, city: &str) -> impl Iterator<Item = &str> {
        self.membership
            .get(city)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// True when the city is in at least one of `selected`.
    pub fn in_any(&self, city: &str, selected: &BTreeSet<String>) -> bool {
        self.counties_of(city).any(|c| selected.contains(c))
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.membership.keys().map(String::as_str)
    }

    pub fn counties(&self) -> BTreeSet<&str> {
        self.membership
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize { self.membership.len() }
    pub fn is_empty(&self) -> bool { self.membership.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_table() {
        let t = FacetTable::from_json(r#"{"cities":{"Victoria":["Capital"],"Duncan":["Cowichan"]}}"#).unwrap();
        assert_eq!(t.counties_of("Victoria").collect::<Vec<_>>(), vec!["Capital"]);
        assert_eq!(t.counties_of("Nanaimo").count(), 0);
        assert_eq!(t.counties().into_iter().collect::<Vec<_>>(), vec!["Capital", "Cowichan"]);
    }

    #[test]
    fn county_table_is_inverted_and_merged() {
        let t = FacetTable::from_json(
            r#"{"cities":{"Sidney":["Capital"]},"counties":{"Capital":["Victoria"],"Islands":["Sidney"]}}"#,
        )
        .unwrap();
        assert_eq!(t.counties_of("Victoria").collect::<Vec<_>>(), vec!["Capital"]);
        assert_eq!(t.counties_of("Sidney").collect::<Vec<_>>(), vec!["Capital", "Islands"]);
    }

    #[test]
    fn wrong_shape_is_malformed() {
        assert!(matches!(FacetTable::from_json("{}"), Err(FacetLoadError::Malformed(_))));
        assert!(matches!(FacetTable::from_json(r#"{"cities":["x"]}"#), Err(FacetLoadError::Malformed(_))));
        assert!(matches!(FacetTable::from_json("not json"), Err(FacetLoadError::Malformed(_))));
    }
}
