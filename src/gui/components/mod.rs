// src/gui/components/mod.rs
pub mod author_panel;
pub mod collection_view;
pub mod facet_panel;
pub mod site_bar;
pub mod tabs;
