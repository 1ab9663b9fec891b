// src/facets/mod.rs
pub mod filter;
pub mod form;
pub mod table;

pub use filter::{ AlignReport, FacetDependencyFilter, FilterState };
pub use form::{ Checkbox, FacetForm, Fieldset };
pub use table::FacetTable;
