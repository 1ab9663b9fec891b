// src/gui/app.rs
use std::{
    error::Error,
    sync::{ Arc, Mutex },
};

use eframe::egui;

use crate::{
    collection::{ AssembledCollection, Resolver },
    config::{ options::SiteSource, state::{ AppState, Tab } },
    core::net::Fetch,
    pages::{ AuthorPage, ConsumerPage, SearchPage },
};

use super::components;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "BBTI Collections",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // site transport, rebuilt when the site bar changes
    pub fetch: Arc<dyn Fetch>,
    pub resolver: Resolver,

    // Create tab
    pub author: AuthorPage,

    // View tab: background resolve drops its page here, UI thread takes it
    pub pending: Arc<Mutex<Option<ConsumerPage>>>,
    pub collection: Option<AssembledCollection>,
    pub alerts: Arc<Mutex<Vec<String>>>,
    pub running: bool,

    // Facets tab
    pub search: Option<SearchPage>,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let fetch = state.options.site.fetcher(state.options.collection.fetch_timeout());
        let resolver = state.options.collection.resolver(Arc::clone(&fetch));
        let author = AuthorPage::init(&state.options.site.page_url);

        logf!("Init: site={} page_url={}", state.options.site.describe(), state.options.site.page_url);

        Self {
            state,
            fetch,
            resolver,
            author,
            pending: Arc::new(Mutex::new(None)),
            collection: None,
            alerts: Arc::new(Mutex::new(Vec::new())),
            running: false,
            search: None,
            status: Arc::new(Mutex::new(s!("Idle"))),
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_tab(&self) -> Tab { self.state.gui.current_tab }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn alert_list(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Apply the site bar: new transport, new resolver, fresh pages.
    /// Any resolve still running against the old site is made stale.
    pub fn apply_site(&mut self, source: SiteSource) {
        self.resolver.invalidate();
        self.running = false;

        self.state.options.site.set_source(source);
        let opts = &self.state.options;
        self.fetch = opts.site.fetcher(opts.collection.fetch_timeout());
        self.resolver = opts.collection.resolver(Arc::clone(&self.fetch));

        // keep what the user typed, re-derive the link from the new page URL
        let mut author = AuthorPage::init(&opts.site.page_url);
        author.title = std::mem::take(&mut self.author.title);
        author.record_ids = std::mem::take(&mut self.author.record_ids);
        author.on_input();
        self.author = author;

        self.search = None;
        logf!("UI: Site → {}", opts.site.describe());
        self.status(format!("Site: {}", opts.site.describe()));
    }

    /// Take a finished background resolve, if any.
    pub fn poll_pending(&mut self) {
        let page = match self.pending.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        let Some(page) = page else { return };
        self.running = false;

        if let Some(e) = page.parse_error() {
            self.collection = None;
            self.status(format!("Error: {e}"));
            return;
        }
        if page.is_superseded() {
            return;
        }
        self.collection = page.collection().cloned();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("site").show(ctx, |ui| {
            components::site_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);

            ui.separator();

            match self.current_tab() {
                Tab::Author => components::author_panel::draw(ui, self),
                Tab::Collection => components::collection_view::draw(ui, self),
                Tab::Facets => components::facet_panel::draw(ui, self),
            }
        });

        if self.running {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
