// src/pages/consumer.rs
//
// collection.html: read the query, resolve every record, show them in order.

use crate::{
    collection::{ AssembledCollection, CollectionSpec, IdPattern, Resolver },
    errors::{ ParseError, ResolveError },
    progress::Progress,
};

#[derive(Clone, Debug, Default)]
pub struct ConsumerPage {
    spec: Option<CollectionSpec>,
    collection: Option<AssembledCollection>,
    parse_error: Option<ParseError>,
    resolve_error: Option<ResolveError>,
}

impl ConsumerPage {
    /// Parse and resolve. A bad query leaves the page empty: no heading,
    /// no records, and the error logged.
    pub fn init(
        query: &str,
        ids: &IdPattern,
        resolver: &Resolver,
        progress: Option<&mut dyn Progress>,
    ) -> Self {
        let spec = match CollectionSpec::parse(query, ids) {
            Ok(spec) => spec,
            Err(e) => {
                loge!("Collection: {}", e);
                return Self { parse_error: Some(e), ..Default::default() };
            }
        };

        match resolver.resolve(&spec, progress) {
            Ok(collection) => Self { spec: Some(spec), collection: Some(collection), ..Default::default() },
            Err(e) => {
                logd!("Collection: {}", e);
                Self { spec: Some(spec), resolve_error: Some(e), ..Default::default() }
            }
        }
    }

    pub fn spec(&self) -> Option<&CollectionSpec> { self.spec.as_ref() }
    pub fn collection(&self) -> Option<&AssembledCollection> { self.collection.as_ref() }
    pub fn parse_error(&self) -> Option<&ParseError> { self.parse_error.as_ref() }
    pub fn resolve_error(&self) -> Option<&ResolveError> { self.resolve_error.as_ref() }

    /// Displayed heading, once a collection has been assembled.
    pub fn heading(&self) -> Option<&str> {
        self.collection.as_ref().map(|c| c.title.as_str())
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self.resolve_error, Some(ResolveError::Superseded { .. }))
    }

    /// Heading + record container, or nothing for an empty page.
    pub fn render_html(&self) -> Option<String> {
        self.collection.as_ref().map(AssembledCollection::render_html)
    }
}
