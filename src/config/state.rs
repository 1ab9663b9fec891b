// src/config/state.rs
use super::{ consts::SEARCH_PAGE, options::AppOptions };

/// Which tab the GUI shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Author,
    Collection,
    Facets,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Author, Tab::Collection, Tab::Facets];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Author => "Create collection",
            Tab::Collection => "View collection",
            Tab::Facets => "Search facets",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Active tab
    pub current_tab: Tab,

    pub window_w: u32,
    pub window_h: u32,

    /// Site bar text (directory path or host[:port][/prefix])
    pub site_text: String,

    /// Query string typed on the View tab
    pub query_text: String,

    /// Search page (relative to the site) whose facet form is loaded
    pub search_path_text: String,

    /// Output path text field; mapped into ExportOptions on save
    pub out_path_text: String,
    pub out_path_dirty: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Author,
            window_w: 1100,
            window_h: 700,
            site_text: s!("."),
            query_text: s!(),
            search_path_text: s!(SEARCH_PAGE),
            out_path_text: s!(),
            out_path_dirty: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        let options = AppOptions::default();
        let gui = GuiState {
            out_path_text: options.export.out_path().to_string_lossy().into_owned(),
            ..GuiState::default()
        };
        Self { options, gui }
    }
}
