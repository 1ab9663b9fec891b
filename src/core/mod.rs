// src/core/mod.rs

pub mod html;
pub mod local;
pub mod net;
pub mod query;
pub mod sanitize;
pub mod vischars;

pub use net::Fetch;
pub use vischars::VisChars;
