// src/pages/mod.rs
//
// One struct per site page. Each is built explicitly by its frontend and
// passed around by reference.

pub mod author;
pub mod consumer;
pub mod search;

pub use author::AuthorPage;
pub use consumer::ConsumerPage;
pub use search::{ result_record_ids, LinkState, SearchPage };
