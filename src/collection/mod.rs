// src/collection/mod.rs
pub mod fragment;
pub mod resolve;
pub mod spec;
pub mod uri;

pub use fragment::Fragment;
pub use resolve::{ AssembledCollection, Placed, RecordResolution, Resolver };
pub use spec::{ CollectionSpec, IdPattern };
pub use uri::{ normalize_id_text, serialize };
