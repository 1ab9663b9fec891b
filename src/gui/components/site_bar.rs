// src/gui/components/site_bar.rs
//
// Where records are read from: a static-site directory or an HTTP host.

use eframe::egui;
use crate::{ config::options::SiteSource, gui::app::App };

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Site:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.site_text)
                .hint_text("./site  or  http://host[:port]/prefix")
                .desired_width(360.0)
                .font(egui::TextStyle::Monospace),
        );
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Apply").clicked() || enter {
            match SiteSource::parse(&app.state.gui.site_text) {
                Ok(source) => app.apply_site(source),
                Err(e) => {
                    logd!("UI: Site text rejected: {}", e);
                    app.status(e);
                }
            }
        }

        ui.separator();
        ui.label(egui::RichText::new(app.state.options.site.describe()).weak());
    });
}
