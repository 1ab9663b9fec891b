// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod collection;
pub mod config;
pub mod core;
pub mod errors;
pub mod facets;
pub mod pages;

pub mod file;
pub mod gui;
pub mod progress;
