// src/gui/actions/copy.rs
use eframe::egui;
use crate::gui::app::App;

/// Put the authored collection link on the clipboard.
pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    if app.author.id_count() == 0 {
        app.status("Nothing to copy (no record ids)");
        logd!("Copy: Clicked, but there are no ids");
        return;
    }

    let txt = s!(app.author.uri());
    logf!("Copy: ids={} len={}", app.author.id_count(), txt.len());

    ui_ctx.copy_text(txt);
    app.status("Copied link to clipboard");
}
