// src/gui/components/facet_panel.rs
//
// County / City checkbox groups, driven by the dependency filter.

use eframe::egui;
use crate::gui::{ actions, app::App };

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Search page:");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.search_path_text).desired_width(240.0));
        ui.label("Facet table:");
        ui.add(egui::TextEdit::singleline(&mut app.state.options.facets.table_path).desired_width(200.0));
        if ui.button("Load").clicked() {
            actions::load_facets(app);
        }
    });

    ui.separator();

    let Some(search) = app.search.as_mut() else {
        ui.label(egui::RichText::new("No facets loaded.").weak());
        return;
    };

    if !search.filter().is_ready() {
        ui.label(egui::RichText::new("Facet table unavailable; city list is not filtered.").weak());
    }

    // collect toggles first; the form is borrowed while drawing
    let mut toggled: Option<(String, bool)> = None;

    ui.columns(2, |cols| {
        for fs in search.form.fieldsets.iter_mut() {
            let is_county = fs.is_county();
            let ui = if is_county { &mut cols[0] } else { &mut cols[1] };
            ui.strong(&fs.title);
            egui::ScrollArea::vertical().id_salt(("facet", fs.title.as_str())).max_height(400.0).show(ui, |ui| {
                for cb in fs.boxes.iter_mut().filter(|c| !c.hidden) {
                    let resp = ui.add_enabled(!cb.disabled, egui::Checkbox::new(&mut cb.checked, cb.label.as_str()));
                    if resp.changed() && is_county {
                        toggled = Some((cb.value.clone(), cb.checked));
                    }
                }
            });
        }
    });

    if let Some((county, checked)) = toggled {
        let report = search.toggle_county(&county, checked);
        app.status(format!(
            "{} '{}': {} shown, {} hidden",
            if checked { "Selected" } else { "Cleared" },
            county, report.shown, report.hidden
        ));
    }
}
