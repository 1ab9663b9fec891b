// src/gui/actions/resolve.rs
use std::{ sync::Arc, thread };

use eframe::egui;

use crate::{
    gui::{ app::App, progress::GuiProgress },
    pages::ConsumerPage,
};

/// Resolve the View tab's query on a worker thread. The finished page
/// lands in `app.pending`; a newer build makes this one stale.
pub fn build(app: &mut App, ctx: &egui::Context) {
    let query = app.state.gui.query_text.trim().to_owned();
    if query.is_empty() {
        app.status("Enter a collection query or URL");
        return;
    }

    let ids = match app.state.options.collection.id_pattern() {
        Ok(p) => p,
        Err(e) => {
            loge!("Build: {}", e);
            app.status(format!("Error: {e}"));
            return;
        }
    };

    if let Ok(mut a) = app.alerts.lock() {
        a.clear();
    }

    let resolver = app.resolver.clone();
    let slot = Arc::clone(&app.pending);
    let status = Arc::clone(&app.status);
    let alerts = Arc::clone(&app.alerts);
    let ctx = ctx.clone();

    logf!("Build: Begin query='{}' site={}", query, app.state.options.site.describe());
    app.running = true;

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status, alerts);
        let page = ConsumerPage::init(&query, &ids, &resolver, Some(&mut prog));
        if !page.is_superseded() {
            if let Ok(mut s) = slot.lock() {
                *s = Some(page);
            }
        }
        ctx.request_repaint();
    });
}

/// Jump from the Create tab to a view of the link just authored.
pub fn view_authored(app: &mut App, ctx: &egui::Context) {
    app.state.gui.query_text = s!(app.author.uri());
    app.state.gui.current_tab = crate::config::state::Tab::Collection;
    build(app, ctx);
}
