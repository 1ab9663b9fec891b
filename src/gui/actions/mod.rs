// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export,build,...}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod facets;  // src/gui/actions/facets.rs
mod resolve; // src/gui/actions/resolve.rs

pub use copy::copy;
pub use export::export;
pub use facets::load_facets;
pub use resolve::{ build, view_authored };
